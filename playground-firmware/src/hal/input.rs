// Physische Eingaben: Taster (active-low) und Slider (ADC)

use esp_hal::Blocking;
use esp_hal::analog::adc::{Adc, AdcConfig, AdcPin, Attenuation};
use esp_hal::gpio::{Input, InputConfig, InputPin, Pull};
use esp_hal::peripherals::{ADC1, GPIO5};
use playground_core::TriggerEdge;

/// Taster mit Pull-Up: gedrückt = Low
pub struct Trigger<'a> {
    pin: Input<'a>,
}

impl<'a> Trigger<'a> {
    pub fn new(pin: impl InputPin + 'a) -> Self {
        let pin = Input::new(pin, InputConfig::default().with_pull(Pull::Up));
        Self { pin }
    }

    /// Pegel in diesem Tick
    pub fn is_engaged(&self) -> bool {
        self.pin.is_low()
    }

    /// Wartet auf die nächste Flanke (Interrupt-getrieben)
    pub async fn wait_for_edge(&mut self) -> TriggerEdge {
        self.pin.wait_for_any_edge().await;
        if self.pin.is_low() {
            TriggerEdge::Engaged
        } else {
            TriggerEdge::Released
        }
    }
}

/// Schiebepotentiometer an GPIO5 (ADC1, 0..=4095)
pub struct Slider<'a> {
    adc: Adc<'a, ADC1<'a>, Blocking>,
    pin: AdcPin<GPIO5<'a>, ADC1<'a>>,
}

impl<'a> Slider<'a> {
    pub fn new(adc1: ADC1<'a>, gpio5: GPIO5<'a>) -> Self {
        let mut adc_config = AdcConfig::new();
        // 11 dB Dämpfung: voller Bereich 0..3.3 V
        let pin = adc_config.enable_pin(gpio5, Attenuation::_11dB);
        let adc = Adc::new(adc1, adc_config);
        Self { adc, pin }
    }

    pub fn read(&mut self) -> u16 {
        self.adc.read_blocking(&mut self.pin)
    }
}
