//! Playground Core - Platform-agnostic Protocol and State Machines
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Sie definiert das Nachrichtenmodell, die drei Knoten-Zustandsautomaten
//! (Mailbox, Relay, Plushie) und die Traits für Funk, LEDs und Eingaben.
//!
//! Jeder Knoten läuft als kooperative Schleife: `tick()` pollt den Kanal,
//! schaltet den Zustandsautomaten weiter und liefert die Wartezeit bis
//! zum nächsten Tick zurück.

#![no_std]

#[macro_use]
mod fmt;

pub mod config;
pub mod door;
pub mod logic;
pub mod mailbox;
pub mod plushie;
pub mod protocol;
pub mod relay;
pub mod traits;
pub mod types;

// Re-exports für einfachen Zugriff
pub use config::ProtocolConfig;
pub use door::{CloseReason, DoorCloseDetector, DoorVerdict};
pub use logic::{color_wheel, dim, hsv_to_rgb, slider_moved, slider_to_hue};
pub use mailbox::{Mailbox, MailboxInput, MailboxSession, MailboxState};
pub use plushie::{Plushie, PlushieInput, PlushieSession};
pub use protocol::{Inbox, Payload};
pub use relay::{Relay, RelayInput, RelayPhase, RelaySession};
pub use traits::{ChannelError, MessageChannel, Pattern, VisualFeedback};
pub use types::{Address, AddressError, Color, Inbound, Message, Millis, Role, TriggerEdge};
