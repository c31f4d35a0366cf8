//! Nutzlast-Format der Funk-Nachrichten
//!
//! Auf der Leitung gibt es nur vier Formen:
//! - `{"color":[r,g,b]}` für ColorOffer und BroadcastColor
//! - `{"ack":true}` und `{"reset":true}`
//! - eine nackte Zahl für Echo
//!
//! Ob eine Farbe ein Angebot oder ein Broadcast ist, entscheidet die
//! Rolle des Empfängers.

use rgb::RGB8;

use crate::config::INBOX_CAPACITY;
use crate::types::{Inbound, Message, Role};

/// Empfangspuffer eines `poll()`-Aufrufs
pub type Inbox = heapless::Vec<Inbound, INBOX_CAPACITY>;

/// Strukturierte Nutzlast wie sie der Kanal transportiert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    Color([u8; 3]),
    Ack(bool),
    Reset(bool),
    Echo(u32),
}

impl From<&Message> for Payload {
    fn from(message: &Message) -> Self {
        match *message {
            Message::ColorOffer { rgb } | Message::BroadcastColor { rgb } => {
                Payload::Color([rgb.r, rgb.g, rgb.b])
            }
            Message::Ack => Payload::Ack(true),
            Message::Echo { seq } => Payload::Echo(seq),
            Message::ResetSignal => Payload::Reset(true),
        }
    }
}

impl Payload {
    /// Interpretiert die Nutzlast aus Sicht des Empfängers
    ///
    /// Liefert `None` für alles, was diese Rolle nicht verarbeitet
    /// (z.B. Farben an die Mailbox oder `{"ack":false}`).
    pub fn into_message(self, receiver: Role) -> Option<Message> {
        match (self, receiver) {
            (Payload::Color([r, g, b]), Role::Relay) => Some(Message::ColorOffer {
                rgb: RGB8 { r, g, b },
            }),
            (Payload::Color([r, g, b]), Role::Plushie) => Some(Message::BroadcastColor {
                rgb: RGB8 { r, g, b },
            }),
            (Payload::Color(_), Role::Mailbox) => None,
            (Payload::Ack(true), _) => Some(Message::Ack),
            (Payload::Reset(true), _) => Some(Message::ResetSignal),
            (Payload::Ack(false) | Payload::Reset(false), _) => None,
            (Payload::Echo(seq), _) => Some(Message::Echo { seq }),
        }
    }
}

#[cfg(feature = "serde")]
pub use codec::{CodecError, MAX_PAYLOAD_LEN};

#[cfg(feature = "serde")]
mod codec {
    use serde::{Deserialize, Serialize};

    use super::Payload;

    /// Größte kodierte Nutzlast (`{"color":[255,255,255]}` passt locker)
    pub const MAX_PAYLOAD_LEN: usize = 64;

    /// Fehler beim Kodieren/Dekodieren der Nutzlast
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub enum CodecError {
        /// Puffer zu klein
        BufferFull,
        /// Kein bekanntes Nachrichtenformat
        Malformed,
    }

    /// JSON-Objekt-Form der Nutzlast
    ///
    /// Hinweis: flache Struktur statt untagged enum für serde-json-core Kompatibilität
    #[derive(Debug, Default, Serialize, Deserialize)]
    struct WireObject {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<[u8; 3]>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        ack: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reset: Option<bool>,
    }

    impl Payload {
        /// Kodiert die Nutzlast als JSON in `buf`, liefert die Länge
        pub fn encode(&self, buf: &mut [u8]) -> Result<usize, CodecError> {
            let result = match *self {
                Payload::Echo(seq) => serde_json_core::to_slice(&seq, buf),
                Payload::Color(rgb) => serde_json_core::to_slice(
                    &WireObject {
                        color: Some(rgb),
                        ..Default::default()
                    },
                    buf,
                ),
                Payload::Ack(ack) => serde_json_core::to_slice(
                    &WireObject {
                        ack: Some(ack),
                        ..Default::default()
                    },
                    buf,
                ),
                Payload::Reset(reset) => serde_json_core::to_slice(
                    &WireObject {
                        reset: Some(reset),
                        ..Default::default()
                    },
                    buf,
                ),
            };
            result.map_err(|_| CodecError::BufferFull)
        }

        /// Dekodiert JSON-Bytes; alles Unbekannte ist `Malformed`
        pub fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
            if let Ok((seq, _)) = serde_json_core::from_slice::<u32>(bytes) {
                return Ok(Payload::Echo(seq));
            }

            let (object, _) = serde_json_core::from_slice::<WireObject>(bytes)
                .map_err(|_| CodecError::Malformed)?;

            match (object.color, object.ack, object.reset) {
                (Some(rgb), None, None) => Ok(Payload::Color(rgb)),
                (None, Some(ack), None) => Ok(Payload::Ack(ack)),
                (None, None, Some(reset)) => Ok(Payload::Reset(reset)),
                _ => Err(CodecError::Malformed),
            }
        }
    }
}
