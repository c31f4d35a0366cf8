// Hardware Abstraction Layer (HAL) Module
//
// Dieses Modul implementiert die Traits aus playground-core
// für die echte Hardware (LED-Ring, Taster, Slider, ESP-NOW).

pub mod input;
pub mod led_writer;
pub mod radio;

pub use input::{Slider, Trigger};
pub use led_writer::{LED_BUFFER_SIZE, RmtLedStrip};
pub use radio::{EspNowChannel, init_esp_now};
