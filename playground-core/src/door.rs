//! Tür-Erkennung über Echo-Runden
//!
//! Die Mailbox schickt pro Runde ein `Echo{seq}` an das Relay und wertet
//! nach der Wartezeit die Antwort aus. Solange das Relay echot, ist die
//! Tür offen. Bleibt die Antwort aus oder wiederholt sich derselbe Wert,
//! zählt das als Fehlversuch. Nach `silence_threshold` Fehlversuchen in
//! Folge, spätestens aber nach dem Timeout, gilt die Tür als geschlossen.
//!
//! Eine veraltete (wiederholte) Antwort ist nicht von einer fehlenden
//! unterscheidbar. Das ist eine bewusste Näherung, kein strenges
//! Liveness-Protokoll; der Timeout begrenzt den Fehler.

use crate::config::ProtocolConfig;
use crate::types::{Message, Millis};

/// Grund, warum die Tür als geschlossen gilt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CloseReason {
    /// Genug Fehlversuche in Folge
    Silence,
    /// Gesamtzeit überschritten (fail-open)
    Timeout,
}

/// Ergebnis einer Auswertung
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DoorVerdict {
    Open,
    Closed(CloseReason),
}

/// Zustand der Tür-Erkennung
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoorCloseDetector {
    started_at: Millis,
    sequence: u32,
    last_echo: Option<u32>,
    consecutive_misses: u8,
    echo_outstanding: bool,
    rounds: u32,
    silence_threshold: u8,
    timeout_ms: Millis,
}

impl DoorCloseDetector {
    pub fn new(started_at: Millis, config: &ProtocolConfig) -> Self {
        Self {
            started_at,
            sequence: 0,
            last_echo: None,
            consecutive_misses: 0,
            echo_outstanding: false,
            rounds: 0,
            silence_threshold: config.silence_threshold,
            timeout_ms: config.door_close_timeout_ms,
        }
    }

    /// Nächstes Echo erzeugen; erhöht den Sequenzzähler
    pub fn next_echo(&mut self) -> Message {
        let seq = self.sequence;
        self.sequence = self.sequence.wrapping_add(1);
        self.echo_outstanding = true;
        self.rounds += 1;
        Message::Echo { seq }
    }

    /// Wartet das letzte Echo noch auf Auswertung?
    pub fn echo_outstanding(&self) -> bool {
        self.echo_outstanding
    }

    /// Antwort (oder deren Fehlen) der laufenden Runde verbuchen
    pub fn record_reply(&mut self, reply: Option<u32>) {
        match reply {
            Some(value) if self.last_echo == Some(value) => {
                // Gleicher Wert wie zuvor: keine echte Lebenszeichen-Änderung
                self.consecutive_misses = self.consecutive_misses.saturating_add(1);
            }
            Some(_) => self.consecutive_misses = 0,
            None => self.consecutive_misses = self.consecutive_misses.saturating_add(1),
        }
        if reply.is_some() {
            self.last_echo = reply;
        }
        self.echo_outstanding = false;
    }

    pub fn verdict(&self, now: Millis) -> DoorVerdict {
        if self.consecutive_misses >= self.silence_threshold {
            DoorVerdict::Closed(CloseReason::Silence)
        } else if now.saturating_sub(self.started_at) >= self.timeout_ms {
            DoorVerdict::Closed(CloseReason::Timeout)
        } else {
            DoorVerdict::Open
        }
    }

    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    pub fn last_echo(&self) -> Option<u32> {
        self.last_echo
    }

    pub fn consecutive_misses(&self) -> u8 {
        self.consecutive_misses
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn started_at(&self) -> Millis {
        self.started_at
    }
}
