// Keine Standard-Bibliothek verwenden (Embedded System)
#![no_std]
// Kein normaler main() Einstiegspunkt (wird von esp_rtos bereitgestellt)
#![no_main]
// Verbiete mem::forget - gefährlich bei ESP HAL Types mit DMA-Buffern
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
// Verbiete große Stack-Frames (Stack ist auf Embedded Systemen begrenzt)
#![deny(clippy::large_stack_frames)]

extern crate alloc;

use defmt::info;
use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};
use esp_hal::rmt::PulseCode;
use esp_hal_smartled::smart_led_buffer;
use static_cell::StaticCell;

use {esp_backtrace as _, esp_println as _};

use smart_playground::config::{
    LED_COUNT, MAILBOX_MAC, PROTOCOL, RELAY_BUTTON_GPIO_PIN, RELAY_LED_GPIO_PIN, RMT_CLOCK_MHZ,
};
use smart_playground::hal::{EspNowChannel, LED_BUFFER_SIZE, RmtLedStrip, Trigger, init_esp_now};
use smart_playground::tasks::relay_task;
use smart_playground::{Relay, Role, board, peer_address};

esp_bootloader_esp_idf::esp_app_desc!();

/// Main Entry Point des Relays
///
/// Das Relay braucht keinen Edge-Task: der Tür-Taster wird pro Tick als
/// Pegel gelesen.
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    let peripherals = board::init_peripherals();
    board::start_runtime(peripherals.TIMG0, peripherals.SW_INTERRUPT);

    info!(
        "Relay: LED GPIO{}, button GPIO{}",
        RELAY_LED_GPIO_PIN, RELAY_BUTTON_GPIO_PIN
    );

    let mailbox = peer_address(MAILBOX_MAC);
    let esp_now = init_esp_now(peripherals.WIFI);
    let channel = EspNowChannel::new(esp_now, Role::Relay);

    static LED_BUFFER: StaticCell<[PulseCode; LED_BUFFER_SIZE]> = StaticCell::new();
    let buffer = LED_BUFFER.init(smart_led_buffer!(LED_COUNT));
    let strip = RmtLedStrip::new(peripherals.GPIO20, peripherals.RMT, RMT_CLOCK_MHZ, buffer);

    let trigger = Trigger::new(peripherals.GPIO0);
    let relay = Relay::new(mailbox, PROTOCOL);

    spawner
        .spawn(relay_task(relay, channel, strip, trigger))
        .unwrap();

    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}
