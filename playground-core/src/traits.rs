//! Hardware Abstraction Traits
//!
//! Diese Traits definieren die Schnittstellen zu Funk und LEDs
//! ohne konkrete Implementierung.

use crate::protocol::Inbox;
use crate::types::{Address, Color, Message, OFF};

/// Fehler-Typ für Sende-Operationen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelError {
    /// Funk-Treiber hat das Senden abgelehnt
    SendFailed,
    /// Ziel ist nicht als Peer registriert
    PeerUnknown,
    /// Nutzlast passt nicht in ein Paket
    PayloadTooLarge,
}

/// Trait für den Nachrichtenkanal (best-effort, unzuverlässig)
///
/// # Implementierungen
/// - **Production:** EspNowChannel (ESP-NOW über esp-radio)
/// - **Testing:** MockChannel / SimNetwork (in-memory)
pub trait MessageChannel {
    /// Unicast an eine Adresse, ohne Zustellbestätigung
    fn send(&mut self, to: Address, message: &Message) -> Result<(), ChannelError>;

    /// An alle erreichbaren Peers
    fn broadcast(&mut self, message: &Message) -> Result<(), ChannelError>;

    /// Non-blocking: alle seit dem letzten Aufruf gepufferten Nachrichten
    ///
    /// Die Reihenfolge muss nicht der Sende-Reihenfolge entsprechen.
    fn poll(&mut self) -> Inbox;
}

/// Animations-Muster für [`VisualFeedback::animate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// Langsames Auf- und Abdimmen (Mailbox wartet auf den Slider)
    Breathing { color: Color },
    /// Umlaufender Regenbogen (Abschluss eines Zyklus)
    TrailingRainbow,
}

/// Trait für LED-Ausgabe (fire-and-forget)
///
/// Fehler werden von der Implementierung selbst behandelt
/// und nie an den Zustandsautomaten zurückgemeldet.
pub trait VisualFeedback {
    /// Alle LEDs auf eine Farbe setzen
    fn set_all(&mut self, color: Color);

    /// Alle LEDs aus
    fn clear(&mut self) {
        self.set_all(OFF);
    }

    /// Animation anstoßen
    fn animate(&mut self, pattern: Pattern);
}

#[cfg(feature = "defmt")]
impl defmt::Format for Pattern {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Pattern::Breathing { color } => defmt::write!(
                fmt,
                "Breathing {{ rgb: ({}, {}, {}) }}",
                color.r,
                color.g,
                color.b
            ),
            Pattern::TrailingRainbow => defmt::write!(fmt, "TrailingRainbow"),
        }
    }
}
