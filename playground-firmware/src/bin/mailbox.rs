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

// Heap Allocator (Funk-Stack benötigt dynamischen Speicher)
extern crate alloc;

use defmt::info;
use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};
use esp_hal::rmt::PulseCode;
use esp_hal_smartled::smart_led_buffer;
use static_cell::StaticCell;

// Backtrace bei Panic und println!() Support
use {esp_backtrace as _, esp_println as _};

use smart_playground::config::{
    LED_COUNT, MAILBOX_BUTTON_GPIO_PIN, MAILBOX_LED_GPIO_PIN, MAILBOX_SLIDER_GPIO_PIN, PROTOCOL,
    RELAY_MAC, RMT_CLOCK_MHZ,
};
use smart_playground::hal::{
    EspNowChannel, LED_BUFFER_SIZE, RmtLedStrip, Slider, Trigger, init_esp_now,
};
use smart_playground::tasks::{mailbox_task, trigger_edge_task};
use smart_playground::{Mailbox, Role, TriggerEdgeChannel, board, peer_address};

// ESP-IDF App Descriptor - erforderlich für den Bootloader!
esp_bootloader_esp_idf::esp_app_desc!();

/// Main Entry Point der Mailbox
///
/// Initialisiert Hardware und ESP-NOW, spawnt Edge-Task und Mailbox-Task.
/// Danach schläft main() - alle Arbeit läuft in Tasks.
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    let peripherals = board::init_peripherals();
    board::start_runtime(peripherals.TIMG0, peripherals.SW_INTERRUPT);

    info!(
        "Mailbox: LED GPIO{}, slider GPIO{}, button GPIO{}",
        MAILBOX_LED_GPIO_PIN, MAILBOX_SLIDER_GPIO_PIN, MAILBOX_BUTTON_GPIO_PIN
    );

    let relay = peer_address(RELAY_MAC);
    let esp_now = init_esp_now(peripherals.WIFI);
    let channel = EspNowChannel::new(esp_now, Role::Mailbox);

    // LED-Buffer muss 'static sein (Task lebt für immer)
    static LED_BUFFER: StaticCell<[PulseCode; LED_BUFFER_SIZE]> = StaticCell::new();
    let buffer = LED_BUFFER.init(smart_led_buffer!(LED_COUNT));
    let strip = RmtLedStrip::new(peripherals.GPIO2, peripherals.RMT, RMT_CLOCK_MHZ, buffer);

    let slider = Slider::new(peripherals.ADC1, peripherals.GPIO5);
    let trigger = Trigger::new(peripherals.GPIO9);

    // Flanken-Queue: Edge-Task → Mailbox-Loop
    static EDGE_CHANNEL: StaticCell<TriggerEdgeChannel> = StaticCell::new();
    let edge_channel = &*EDGE_CHANNEL.init(TriggerEdgeChannel::new());

    let mailbox = Mailbox::new(relay, PROTOCOL);

    spawner
        .spawn(trigger_edge_task(trigger, edge_channel.sender()))
        .unwrap();
    spawner
        .spawn(mailbox_task(
            mailbox,
            channel,
            strip,
            slider,
            edge_channel.receiver(),
        ))
        .unwrap();

    // Main-Loop: schläft (alle Arbeit läuft in Tasks)
    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}
