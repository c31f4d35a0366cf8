// Board-Initialisierung, identisch für alle Rollen

use esp_hal::clock::CpuClock;
use esp_hal::interrupt::software::SoftwareInterruptControl;
use esp_hal::peripherals::{Peripherals, SW_INTERRUPT, TIMG0};
use esp_hal::timer::timg::TimerGroup;

use crate::config::RADIO_HEAP_SIZE;

/// ESP32-C6 mit maximaler Taktfrequenz (160 MHz) initialisieren
pub fn init_peripherals() -> Peripherals {
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    esp_hal::init(config)
}

/// Heap und Embassy Runtime starten
///
/// Muss vor `init_esp_now()` laufen (Funk braucht Heap und Scheduler).
pub fn start_runtime(timg0: TIMG0<'static>, sw_interrupt: SW_INTERRUPT<'static>) {
    // Heap Allocator initialisieren (Funk-Stack braucht dynamischen Speicher!)
    esp_alloc::heap_allocator!(
        #[esp_hal::ram(reclaimed)]
        size: RADIO_HEAP_SIZE
    );

    // Embassy Runtime initialisieren (Timer + Software Interrupt)
    let timg0 = TimerGroup::new(timg0);
    let sw_interrupt = SoftwareInterruptControl::new(sw_interrupt);
    esp_rtos::start(timg0.timer0, sw_interrupt.software_interrupt0);
}
