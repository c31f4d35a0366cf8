// Projekt-Konfiguration: Konstanten und Hardware-Zuordnungen
#![allow(dead_code)]

use playground_core::ProtocolConfig;

// ============================================================================
// LED Konfiguration
// ============================================================================

/// Anzahl der LEDs im Ring (alle Knoten nutzen denselben 12er-Ring)
pub const LED_COUNT: usize = 12;

/// Helligkeits-Level für die LEDs (0-255)
/// Wert ist gedimmt für Augenschonung
pub const LED_BRIGHTNESS: u8 = 64;

/// RMT Taktfrequenz in MHz
/// 80 MHz ist optimal für WS2812 LED-Timing
pub const RMT_CLOCK_MHZ: u32 = 80;

/// Periode der Breathing-Animation in Millisekunden
pub const BREATHING_PERIOD_MS: u64 = 2_000;

/// Schrittweite der Regenbogen-Animation pro Frame
/// (12 Frames à 100 ms ergeben einen Umlauf, passend zu `finish_animation_ms`)
pub const RAINBOW_STEP: u8 = 21;

// ============================================================================
// Pin-Zuordnung pro Rolle
// ============================================================================
//
// Mailbox: LED-Ring an GPIO2, Slider (Poti) an GPIO5, Taster an GPIO9
// Relay:   LED-Ring an GPIO20, Tür-Taster an GPIO0
// Plushie: LED-Ring an GPIO20, Taster an GPIO0
//
// Die Pins selbst werden in den Binaries als Peripherals übergeben,
// die Nummern hier dienen der Dokumentation und dem Logging.

pub const MAILBOX_LED_GPIO_PIN: u8 = 2;
pub const MAILBOX_SLIDER_GPIO_PIN: u8 = 5;
pub const MAILBOX_BUTTON_GPIO_PIN: u8 = 9;

pub const RELAY_LED_GPIO_PIN: u8 = 20;
pub const RELAY_BUTTON_GPIO_PIN: u8 = 0;

pub const PLUSHIE_LED_GPIO_PIN: u8 = 20;
pub const PLUSHIE_BUTTON_GPIO_PIN: u8 = 0;

/// Kapazität der Taster-Flanken-Queue (Edge-Task → Mailbox-Loop)
pub const TRIGGER_EDGE_QUEUE_SIZE: usize = 8;

// ============================================================================
// Funk Konfiguration (ESP-NOW)
// ============================================================================

/// MAC-Adresse des Relays
/// Wird zur Build-Zeit aus der Environment Variable RELAY_MAC geladen
/// Setze diese in .env file (siehe .env.example)
pub const RELAY_MAC: &str = env!(
    "RELAY_MAC",
    "RELAY_MAC nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// MAC-Adresse der Mailbox
/// Wird zur Build-Zeit aus der Environment Variable MAILBOX_MAC geladen
/// Setze diese in .env file (siehe .env.example)
pub const MAILBOX_MAC: &str = env!(
    "MAILBOX_MAC",
    "MAILBOX_MAC nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// WiFi-Kanal für ESP-NOW (alle Knoten müssen denselben nutzen)
pub const ESPNOW_CHANNEL: u8 = 1;

/// Heap-Größe für den Funk-Stack (Bytes)
pub const RADIO_HEAP_SIZE: usize = 65536; // 64 KB

// ============================================================================
// Protokoll-Zeiten
// ============================================================================

/// Schwellwerte und Zeiten aller Knoten
pub const PROTOCOL: ProtocolConfig = ProtocolConfig::DEFAULT;
