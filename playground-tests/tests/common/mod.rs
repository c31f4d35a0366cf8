//! Gemeinsame Test-Helfer: Mock-Kanal, simuliertes Funknetz, LED-Rekorder
//!
//! Jede Test-Datei bindet dieses Modul mit `mod common;` ein und nutzt
//! nur einen Teil davon.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;

use playground_core::protocol::MAX_PAYLOAD_LEN;
use playground_core::{
    Address, ChannelError, Color, Inbound, Inbox, Message, MessageChannel, Millis, Pattern,
    Payload, Role, VisualFeedback,
};

pub const MAILBOX: Address = Address::new([0x02, 0x00, 0x00, 0x00, 0x00, 0x01]);
pub const RELAY: Address = Address::new([0x02, 0x00, 0x00, 0x00, 0x00, 0x02]);
pub const PLUSHIE_A: Address = Address::new([0x02, 0x00, 0x00, 0x00, 0x00, 0x03]);
pub const PLUSHIE_B: Address = Address::new([0x02, 0x00, 0x00, 0x00, 0x00, 0x04]);
pub const STRANGER: Address = Address::new([0x02, 0x00, 0x00, 0x00, 0x00, 0x99]);

// ============================================================================
// Mock Channel
// ============================================================================

/// Kanal mit manuell befüllter Inbox und Sende-Protokoll
#[derive(Default)]
pub struct MockChannel {
    pub inbox: VecDeque<Inbound>,
    pub sent: Vec<(Address, Message)>,
    pub broadcasts: Vec<Message>,
    pub fail_sends: bool,
}

impl MockChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nachricht für den nächsten `poll()` bereitlegen
    pub fn deliver(&mut self, from: Address, message: Message) {
        self.inbox.push_back(Inbound::new(from, message, 0));
    }

    /// Alle Unicasts einer bestimmten Art
    pub fn sent_matching(&self, predicate: impl Fn(&Message) -> bool) -> Vec<(Address, Message)> {
        self.sent
            .iter()
            .filter(|(_, m)| predicate(m))
            .copied()
            .collect()
    }

    pub fn clear_log(&mut self) {
        self.sent.clear();
        self.broadcasts.clear();
    }
}

impl MessageChannel for MockChannel {
    fn send(&mut self, to: Address, message: &Message) -> Result<(), ChannelError> {
        if self.fail_sends {
            return Err(ChannelError::SendFailed);
        }
        self.sent.push((to, *message));
        Ok(())
    }

    fn broadcast(&mut self, message: &Message) -> Result<(), ChannelError> {
        if self.fail_sends {
            return Err(ChannelError::SendFailed);
        }
        self.broadcasts.push(*message);
        Ok(())
    }

    fn poll(&mut self) -> Inbox {
        let mut inbox = Inbox::new();
        while !inbox.is_full() {
            let Some(inbound) = self.inbox.pop_front() else {
                break;
            };
            inbox.push(inbound).expect("inbox has room");
        }
        inbox
    }
}

// ============================================================================
// Simuliertes Funknetz
// ============================================================================

/// Gemeinsamer Zustand aller Endpunkte
///
/// Nachrichten laufen wie auf der Leitung durch den JSON-Codec und werden
/// beim Empfänger rollenabhängig interpretiert.
#[derive(Default)]
pub struct SimNet {
    queues: HashMap<Address, VecDeque<Inbound>>,
    roles: HashMap<Address, Role>,
    /// Empfänger, deren eingehende Pakete verworfen werden
    dropped: HashSet<Address>,
    /// Alle zugestellten Nachrichten (Absender, Empfänger, Nachricht)
    log: Vec<(Address, Address, Message)>,
    now: Millis,
}

impl SimNet {
    fn deliver(&mut self, from: Address, to: Address, message: &Message) {
        if self.dropped.contains(&to) {
            return;
        }
        let Some(role) = self.roles.get(&to).copied() else {
            return;
        };

        let mut buf = [0u8; MAX_PAYLOAD_LEN];
        let len = Payload::from(message)
            .encode(&mut buf)
            .expect("payload fits");
        let payload = Payload::decode(&buf[..len]).expect("payload decodes");

        if let Some(message) = payload.into_message(role) {
            let now = self.now;
            if let Some(queue) = self.queues.get_mut(&to) {
                queue.push_back(Inbound::new(from, message, now));
                self.log.push((from, to, message));
            }
        }
    }
}

/// Handle auf das simulierte Netz
#[derive(Clone, Default)]
pub struct SimNetwork {
    net: Rc<RefCell<SimNet>>,
}

impl SimNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Neuen Knoten anmelden
    pub fn endpoint(&self, address: Address, role: Role) -> SimEndpoint {
        let mut net = self.net.borrow_mut();
        net.queues.insert(address, VecDeque::new());
        net.roles.insert(address, role);
        SimEndpoint {
            address,
            net: Rc::clone(&self.net),
        }
    }

    /// Alle Pakete an `address` verwerfen (oder wieder zustellen)
    pub fn set_dropping(&self, address: Address, dropping: bool) {
        let mut net = self.net.borrow_mut();
        if dropping {
            net.dropped.insert(address);
        } else {
            net.dropped.remove(&address);
        }
    }

    pub fn set_time(&self, now: Millis) {
        self.net.borrow_mut().now = now;
    }

    /// Anzahl zugestellter Nachrichten von `from` an `to`, die `predicate` erfüllen
    pub fn delivered(
        &self,
        from: Address,
        to: Address,
        predicate: impl Fn(&Message) -> bool,
    ) -> usize {
        self.net
            .borrow()
            .log
            .iter()
            .filter(|(f, t, m)| *f == from && *t == to && predicate(m))
            .count()
    }
}

/// Ein Knoten im simulierten Netz
pub struct SimEndpoint {
    address: Address,
    net: Rc<RefCell<SimNet>>,
}

impl MessageChannel for SimEndpoint {
    fn send(&mut self, to: Address, message: &Message) -> Result<(), ChannelError> {
        let mut net = self.net.borrow_mut();
        if !net.roles.contains_key(&to) {
            return Err(ChannelError::PeerUnknown);
        }
        net.deliver(self.address, to, message);
        Ok(())
    }

    fn broadcast(&mut self, message: &Message) -> Result<(), ChannelError> {
        let mut net = self.net.borrow_mut();
        let peers: Vec<Address> = net
            .roles
            .keys()
            .copied()
            .filter(|a| *a != self.address)
            .collect();
        for peer in peers {
            net.deliver(self.address, peer, message);
        }
        Ok(())
    }

    fn poll(&mut self) -> Inbox {
        let mut net = self.net.borrow_mut();
        let mut inbox = Inbox::new();
        if let Some(queue) = net.queues.get_mut(&self.address) {
            while !inbox.is_full() {
                let Some(inbound) = queue.pop_front() else {
                    break;
                };
                inbox.push(inbound).expect("inbox has room");
            }
        }
        inbox
    }
}

// ============================================================================
// LED-Rekorder
// ============================================================================

/// Zeichnet jede LED-Ausgabe auf
#[derive(Default)]
pub struct RecordingFeedback {
    pub frames: Vec<Color>,
    pub animations: Vec<Pattern>,
}

impl RecordingFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_frame(&self) -> Option<Color> {
        self.frames.last().copied()
    }

    pub fn last_animation(&self) -> Option<Pattern> {
        self.animations.last().copied()
    }

    pub fn count_animation(&self, pattern: Pattern) -> usize {
        self.animations.iter().filter(|p| **p == pattern).count()
    }
}

impl VisualFeedback for RecordingFeedback {
    fn set_all(&mut self, color: Color) {
        self.frames.push(color);
    }

    fn animate(&mut self, pattern: Pattern) {
        self.animations.push(pattern);
    }
}
