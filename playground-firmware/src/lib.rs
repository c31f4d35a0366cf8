// Library-Root: Wiederverwendbare Logik und Module für alle drei Knoten
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// Module
pub mod board;
pub mod config;
pub mod hal;
pub mod tasks;

// Re-exports von playground-core
pub use playground_core::{
    Address, Mailbox, MessageChannel, Plushie, Relay, Role, TriggerEdge, VisualFeedback,
};

// Embassy Channel-Typen
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};

use crate::config::TRIGGER_EDGE_QUEUE_SIZE;

// ============================================================================
// Peer-Adressen
// ============================================================================

/// Parst eine zur Build-Zeit eingebackene MAC-Adresse
///
/// Ein Tippfehler in der .env ist ein Konfigurationsfehler, der beim
/// Booten sofort auffallen soll.
pub fn peer_address(text: &str) -> Address {
    match Address::parse(text) {
        Ok(address) => address,
        Err(e) => defmt::panic!("Invalid peer MAC '{}': {}", text, e),
    }
}

// ============================================================================
// Type-Aliase für Channel-Typen
// ============================================================================
//
// Statt:  Sender<'static, NoopRawMutex, TriggerEdge, 8>
// Nutze:  TriggerEdgeSender

/// Queue für Taster-Flanken (Edge-Task → Mailbox-Loop)
/// Ein Produzent, ein Konsument; der Loop leert sie einmal pro Tick
pub type TriggerEdgeChannel = Channel<NoopRawMutex, TriggerEdge, TRIGGER_EDGE_QUEUE_SIZE>;

/// Sender für Taster-Flanken (Edge-Task)
pub type TriggerEdgeSender = Sender<'static, NoopRawMutex, TriggerEdge, TRIGGER_EDGE_QUEUE_SIZE>;

/// Receiver für Taster-Flanken (Mailbox-Loop)
pub type TriggerEdgeReceiver =
    Receiver<'static, NoopRawMutex, TriggerEdge, TRIGGER_EDGE_QUEUE_SIZE>;
