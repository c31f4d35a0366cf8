// Task-Modul: Enthält alle Embassy Tasks
//
// Pro Rolle ein Knoten-Task, der den Zustandsautomaten aus playground-core
// im Takt von dessen `tick()`-Rückgabewert aufruft. Die Mailbox bekommt
// zusätzlich einen Edge-Task für den Taster.

pub mod mailbox;
pub mod plushie;
pub mod relay;
pub mod trigger;

// Re-export Tasks für einfachen Import
pub use mailbox::mailbox_task;
pub use plushie::plushie_task;
pub use relay::relay_task;
pub use trigger::trigger_edge_task;
