// LED-Ring als VisualFeedback
//
// Kapselt den WS2812-Ring (RMT Peripheral) hinter dem VisualFeedback-Trait
// aus playground-core. Schreibfehler werden hier geloggt und nie an den
// Zustandsautomaten zurückgegeben.

use defmt::error;
use embassy_time::Instant;
use esp_hal::Blocking;
use esp_hal::gpio::interconnect::PeripheralOutput;
use esp_hal::rmt::{PulseCode, Rmt};
use esp_hal::time::Rate;
use esp_hal_smartled::SmartLedsAdapter;
use playground_core::{Color, Pattern, VisualFeedback, color_wheel, dim};
use smart_leds_trait::SmartLedsWrite;

use crate::config::{BREATHING_PERIOD_MS, LED_BRIGHTNESS, LED_COUNT, RAINBOW_STEP};

/// Buffer-Größe für den Ring (24 Bits pro LED + 1 Reset)
pub const LED_BUFFER_SIZE: usize = LED_COUNT * 24 + 1;

/// WS2812-Ring am RMT Peripheral
///
/// Hinweis: Der Buffer muss 'static sein, daher wird er im Binary erstellt
/// und als Parameter übergeben statt im Constructor allokiert.
pub struct RmtLedStrip<'a> {
    led: SmartLedsAdapter<'a, LED_BUFFER_SIZE>,
    rainbow_offset: u8,
}

impl<'a> RmtLedStrip<'a> {
    /// Erstellt einen neuen RmtLedStrip
    ///
    /// # Parameter
    /// - `data_pin`: GPIO für die LED-Datenleitung
    /// - `rmt_peripheral`: RMT Peripheral
    /// - `rmt_clock_mhz`: RMT Clock Frequenz in MHz (z.B. 80)
    /// - `buffer`: Buffer für LED-Daten (erstellt mit smart_led_buffer! Macro)
    pub fn new(
        data_pin: impl PeripheralOutput<'a>,
        rmt_peripheral: esp_hal::peripherals::RMT<'a>,
        rmt_clock_mhz: u32,
        buffer: &'a mut [PulseCode; LED_BUFFER_SIZE],
    ) -> Self {
        // RMT initialisieren
        let rmt: Rmt<'a, Blocking> = Rmt::new(rmt_peripheral, Rate::from_mhz(rmt_clock_mhz))
            .expect("Failed to initialize RMT");

        let led = SmartLedsAdapter::new(rmt.channel0, data_pin, buffer);

        Self {
            led,
            rainbow_offset: 0,
        }
    }

    fn write_frame(&mut self, frame: [Color; LED_COUNT]) {
        let frame = frame.map(|c| dim(c, LED_BRIGHTNESS));
        if self.led.write(frame.into_iter()).is_err() {
            error!("LED: failed to write frame");
        }
    }
}

impl VisualFeedback for RmtLedStrip<'_> {
    fn set_all(&mut self, color: Color) {
        self.write_frame([color; LED_COUNT]);
    }

    fn animate(&mut self, pattern: Pattern) {
        match pattern {
            Pattern::Breathing { color } => {
                // Dreieck 0 → 255 → 0 über eine Periode
                let phase = Instant::now().as_millis() % BREATHING_PERIOD_MS;
                let half = BREATHING_PERIOD_MS / 2;
                let rising = if phase < half {
                    phase
                } else {
                    BREATHING_PERIOD_MS - phase
                };
                let level = (rising * 255 / half) as u8;
                self.write_frame([dim(color, level); LED_COUNT]);
            }
            Pattern::TrailingRainbow => {
                let offset = self.rainbow_offset;
                let frame: [Color; LED_COUNT] = core::array::from_fn(|i| {
                    color_wheel(((i * 256 / LED_COUNT) as u8).wrapping_add(offset))
                });
                self.write_frame(frame);
                self.rainbow_offset = offset.wrapping_add(RAINBOW_STEP);
            }
        }
    }
}
