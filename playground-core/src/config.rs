//! Protokoll-Konfiguration: alle einstellbaren Schwellwerte und Zeiten
//!
//! Alle Zeiten in Millisekunden.

use crate::types::Millis;

/// Maximale Anzahl Nachrichten, die ein einzelner `poll()` liefert
pub const INBOX_CAPACITY: usize = 16;

/// Schwellwerte und Zeiten des Koordinations-Protokolls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolConfig {
    /// Slider-Änderung (Rohwert), ab der Bewegung erkannt wird (strikt größer)
    pub slider_noise_threshold: u16,
    /// Slider-Vollausschlag, entspricht 360°
    pub slider_max: u16,
    /// Ohne Slider-Bewegung zurück in den Breathing-Modus
    pub inactivity_window_ms: Millis,
    /// Takt der Mailbox- und Relay-Schleife
    pub poll_interval_ms: Millis,
    /// Wartezeit nach jedem ColorOffer
    pub offer_interval_ms: Millis,
    /// Wartezeit pro Echo-Runde der Tür-Erkennung
    pub echo_interval_ms: Millis,
    /// Fehlende Echos in Folge, ab denen die Tür als geschlossen gilt
    pub silence_threshold: u8,
    /// Obergrenze der Tür-Erkennung (fail-open)
    pub door_close_timeout_ms: Millis,
    /// Anzeigedauer der Bestätigungsfarbe nach dem Broadcast
    pub confirmation_dwell_ms: Millis,
    /// Entprellzeit vor dem ResetSignal
    pub release_debounce_ms: Millis,
    /// Mailbox: Dauer der Abschluss-Animation (ein Regenbogen-Umlauf)
    pub finish_animation_ms: Millis,
    /// Plushie: Drückdauer ab der ein Long-Press erkannt wird (strikt größer)
    pub long_press_ms: Millis,
    /// Takt der Plushie-Schleife
    pub plushie_poll_interval_ms: Millis,
}

impl ProtocolConfig {
    pub const DEFAULT: Self = Self {
        slider_noise_threshold: 10,
        slider_max: 4095,
        inactivity_window_ms: 3_000,
        poll_interval_ms: 100,
        offer_interval_ms: 500,
        echo_interval_ms: 500,
        silence_threshold: 3,
        door_close_timeout_ms: 10_000,
        confirmation_dwell_ms: 2_000,
        release_debounce_ms: 100,
        finish_animation_ms: 1_200,
        long_press_ms: 1_400,
        plushie_poll_interval_ms: 50,
    };

    /// Maximale Anzahl Echo-Runden bis zum Timeout
    pub const fn max_door_rounds(&self) -> u64 {
        if self.echo_interval_ms == 0 {
            return u64::MAX;
        }
        self.door_close_timeout_ms / self.echo_interval_ms + 1
    }
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_const() {
        assert_eq!(ProtocolConfig::default(), ProtocolConfig::DEFAULT);
    }

    #[test]
    fn test_max_door_rounds() {
        let config = ProtocolConfig::DEFAULT;
        assert_eq!(config.max_door_rounds(), 21);
    }
}
