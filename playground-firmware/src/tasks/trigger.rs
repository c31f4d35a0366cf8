// Trigger Edge Task - Taster-Flanken in die Queue schieben
use defmt::{debug, warn};

use crate::TriggerEdgeSender;
use crate::hal::Trigger;

/// Wartet interrupt-getrieben auf Flanken und reicht sie an den Knoten-Loop
///
/// Einziger Produzent der Queue; der Loop liest sie einmal pro Tick,
/// damit der Zustand nur im Loop selbst verändert wird.
#[embassy_executor::task]
pub async fn trigger_edge_task(mut trigger: Trigger<'static>, edges: TriggerEdgeSender) {
    loop {
        let edge = trigger.wait_for_edge().await;
        debug!("Trigger: {}", edge);

        if edges.try_send(edge).is_err() {
            warn!("Trigger: edge queue full, dropping {}", edge);
        }
    }
}
