//! Core Types für die Knoten-Kommunikation
//!
//! Datenstrukturen ohne Hardware-Dependencies

use core::fmt;

use rgb::RGB8;

/// Farbe mit drei unabhängigen Kanälen (0-255)
pub type Color = RGB8;

/// Zeitstempel bzw. Dauer in Millisekunden (monotone Knoten-Uhr)
pub type Millis = u64;

/// Standardfarbe (weiß)
pub const WHITE: Color = RGB8 {
    r: 255,
    g: 255,
    b: 255,
};

/// Alle LEDs aus
pub const OFF: Color = RGB8 { r: 0, g: 0, b: 0 };

/// Rolle eines Knotens im System
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Role {
    /// Eingabestation mit Slider und Taster
    Mailbox,
    /// Hub zwischen Mailbox und Plushies
    Relay,
    /// Anzeige-Knoten (beliebig viele)
    Plushie,
}

/// Hardware-Adresse eines Knotens (MAC, 6 Bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address(pub [u8; 6]);

impl Address {
    /// Broadcast-Adresse (ff:ff:ff:ff:ff:ff)
    pub const BROADCAST: Address = Address([0xff; 6]);

    pub const fn new(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    pub const fn octets(&self) -> [u8; 6] {
        self.0
    }

    pub fn is_broadcast(&self) -> bool {
        *self == Self::BROADCAST
    }

    /// Parst eine MAC-Adresse im Format `aa:bb:cc:dd:ee:ff`
    ///
    /// Trennzeichen `:` oder `-`, Groß-/Kleinschreibung egal.
    ///
    /// ```
    /// # use playground_core::Address;
    /// let addr = Address::parse("AA:bb:CC:dd:EE:01").unwrap();
    /// assert_eq!(addr.octets(), [0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0x01]);
    /// ```
    pub fn parse(text: &str) -> Result<Self, AddressError> {
        let mut bytes = [0u8; 6];
        let mut count = 0;

        for part in text.trim().split(|c| c == ':' || c == '-') {
            if count == bytes.len() {
                return Err(AddressError::WrongLength);
            }
            if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(AddressError::InvalidOctet);
            }
            bytes[count] =
                u8::from_str_radix(part, 16).map_err(|_| AddressError::InvalidOctet)?;
            count += 1;
        }

        if count != bytes.len() {
            return Err(AddressError::WrongLength);
        }
        Ok(Self(bytes))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

/// Fehler beim Parsen einer MAC-Adresse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddressError {
    /// Nicht genau sechs Oktette
    WrongLength,
    /// Oktett ist kein zweistelliger Hex-Wert
    InvalidOctet,
}

/// Protokoll-Nachricht zwischen den Knoten
///
/// Der Absender steckt nicht in der Nachricht, er wird vom Kanal
/// mitgeliefert (siehe [`Inbound`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// Mailbox → Relay: vorgeschlagene (gelockte) Farbe
    ColorOffer { rgb: Color },
    /// Relay → Mailbox: Bestätigung eines ColorOffer
    Ack,
    /// Lebenszeichen, der Empfänger schickt `seq` unverändert zurück
    Echo { seq: u32 },
    /// Relay → alle Plushies: finale Farbe
    BroadcastColor { rgb: Color },
    /// Relay → Mailbox: zurück in den Ausgangszustand
    ResetSignal,
}

/// Empfangene Nachricht mit Absender und Empfangszeit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inbound {
    pub from: Address,
    pub message: Message,
    pub received_at: Millis,
}

impl Inbound {
    pub fn new(from: Address, message: Message, received_at: Millis) -> Self {
        Self {
            from,
            message,
            received_at,
        }
    }
}

/// Flanke des physischen Tasters
///
/// Wird vom Interrupt-/Edge-Task erzeugt und einmal pro Tick verarbeitet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TriggerEdge {
    Engaged,
    Released,
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for Address {
    fn format(&self, fmt: defmt::Formatter) {
        let [a, b, c, d, e, g] = self.0;
        defmt::write!(
            fmt,
            "{=u8:02x}:{=u8:02x}:{=u8:02x}:{=u8:02x}:{=u8:02x}:{=u8:02x}",
            a,
            b,
            c,
            d,
            e,
            g
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Message {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Message::ColorOffer { rgb } => {
                defmt::write!(fmt, "ColorOffer {{ rgb: ({}, {}, {}) }}", rgb.r, rgb.g, rgb.b)
            }
            Message::Ack => defmt::write!(fmt, "Ack"),
            Message::Echo { seq } => defmt::write!(fmt, "Echo {{ seq: {} }}", seq),
            Message::BroadcastColor { rgb } => {
                defmt::write!(
                    fmt,
                    "BroadcastColor {{ rgb: ({}, {}, {}) }}",
                    rgb.r,
                    rgb.g,
                    rgb.b
                )
            }
            Message::ResetSignal => defmt::write!(fmt, "ResetSignal"),
        }
    }
}
