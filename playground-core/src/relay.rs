//! Relay-Zustandsautomat (Hub)
//!
//! Pro Tick in fester Reihenfolge:
//! 1. Nachrichten annehmen (ColorOffer → Ack, Echo → zurückschicken)
//! 2. Broadcast auslösen, wenn eine Farbe anliegt und der Taster gedrückt ist
//! 3. Nach dem Broadcast beim Loslassen ein ResetSignal an die Mailbox
//! 4. Taster-Historie für die Flankenerkennung merken

use rgb::RGB8;

use crate::config::ProtocolConfig;
use crate::traits::{MessageChannel, VisualFeedback};
use crate::types::{Address, Color, Inbound, Message, Millis, WHITE};

/// Ruheanzeige
pub const IDLE_COLOR: Color = WHITE;
/// Kurzes Aufblitzen nach einem ColorOffer
pub const ACK_COLOR: Color = RGB8 { r: 0, g: 0, b: 255 };
/// Bestätigung nach dem Broadcast
pub const CONFIRM_COLOR: Color = RGB8 { r: 0, g: 255, b: 0 };

/// Eingaben eines Ticks
#[derive(Debug, Clone, Copy, Default)]
pub struct RelayInput {
    /// Tür/Taster aktuell betätigt
    pub trigger_engaged: bool,
}

/// Expliziter Zustand des Relays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayPhase {
    /// Keine Farbe, Echo aktiv
    Idle,
    /// Farbe angenommen und bestätigt, wartet auf den Taster
    ColorPending { color: Color },
    /// Farbe verteilt, Bestätigungsfarbe wird bis `until` angezeigt.
    /// Echo ist aus; neue Angebote landen in `queued` (letztes gewinnt).
    Broadcasting {
        color: Color,
        until: Millis,
        queued: Option<Color>,
    },
    /// Broadcast erfolgt, wartet auf das Loslassen des Tasters
    AwaitingRelease { pending: Option<Color> },
    /// Losgelassen, ResetSignal geht nach der Entprellzeit raus
    ResetPending {
        send_at: Millis,
        pending: Option<Color>,
    },
}

/// Momentaufnahme der Sitzungsfelder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelaySession {
    pub echo_mode: bool,
    pub pending_color: Option<Color>,
    pub ack_sent: bool,
    pub has_broadcast: bool,
    pub button_was_down: bool,
}

pub struct Relay {
    mailbox: Address,
    config: ProtocolConfig,
    phase: RelayPhase,
    button_was_down: bool,
}

impl Relay {
    pub fn new(mailbox: Address, config: ProtocolConfig) -> Self {
        Self {
            mailbox,
            config,
            phase: RelayPhase::Idle,
            button_was_down: false,
        }
    }

    pub fn phase(&self) -> RelayPhase {
        self.phase
    }

    pub fn echo_mode(&self) -> bool {
        !matches!(self.phase, RelayPhase::Broadcasting { .. })
    }

    pub fn pending_color(&self) -> Option<Color> {
        match self.phase {
            RelayPhase::Idle => None,
            RelayPhase::ColorPending { color } => Some(color),
            RelayPhase::Broadcasting { queued, .. } => queued,
            RelayPhase::AwaitingRelease { pending } | RelayPhase::ResetPending { pending, .. } => {
                pending
            }
        }
    }

    pub fn session(&self) -> RelaySession {
        let pending_color = self.pending_color();
        RelaySession {
            echo_mode: self.echo_mode(),
            pending_color,
            ack_sent: pending_color.is_some(),
            has_broadcast: matches!(
                self.phase,
                RelayPhase::Broadcasting { .. }
                    | RelayPhase::AwaitingRelease { .. }
                    | RelayPhase::ResetPending { .. }
            ),
            button_was_down: self.button_was_down,
        }
    }

    /// Boot: Ruheanzeige
    pub fn start<V: VisualFeedback>(&mut self, feedback: &mut V) {
        feedback.set_all(IDLE_COLOR);
        info!("Relay: ready");
    }

    /// Ein Schleifendurchlauf; liefert die Wartezeit bis zum nächsten Tick
    pub fn tick<C: MessageChannel, V: VisualFeedback>(
        &mut self,
        now: Millis,
        input: RelayInput,
        channel: &mut C,
        feedback: &mut V,
    ) -> Millis {
        // 1. Nachrichten
        let inbox = channel.poll();
        for inbound in inbox.iter() {
            self.handle_message(inbound, channel, feedback);
        }

        // 2. + 3. Broadcast / Loslassen
        let delay = self.advance(now, input.trigger_engaged, channel, feedback);

        // 4. Taster-Historie (bleibt gesetzt bis das ResetSignal raus ist)
        if input.trigger_engaged {
            self.button_was_down = true;
        }
        delay
    }

    fn handle_message<C: MessageChannel, V: VisualFeedback>(
        &mut self,
        inbound: &Inbound,
        channel: &mut C,
        feedback: &mut V,
    ) {
        match inbound.message {
            Message::ColorOffer { rgb } => {
                info!(
                    "Relay: color offer ({}, {}, {}) from {}",
                    rgb.r,
                    rgb.g,
                    rgb.b,
                    inbound.from
                );
                self.accept_offer(rgb);
                if self.echo_mode() {
                    feedback.set_all(ACK_COLOR);
                }
                if let Err(e) = channel.send(inbound.from, &Message::Ack) {
                    warn!("Relay: ack send failed: {}", e);
                }
            }
            Message::Echo { seq } if self.echo_mode() => {
                if let Err(e) = channel.send(inbound.from, &Message::Echo { seq }) {
                    warn!("Relay: echo send failed: {}", e);
                }
            }
            Message::Echo { seq } => debug!("Relay: echo {} dropped while broadcasting", seq),
            other => debug!("Relay: ignoring {}", other),
        }
    }

    /// Letztes Angebot gewinnt, auch mitten im Broadcast
    fn accept_offer(&mut self, rgb: Color) {
        self.phase = match self.phase {
            RelayPhase::Idle | RelayPhase::ColorPending { .. } => {
                RelayPhase::ColorPending { color: rgb }
            }
            RelayPhase::Broadcasting { color, until, .. } => RelayPhase::Broadcasting {
                color,
                until,
                queued: Some(rgb),
            },
            RelayPhase::AwaitingRelease { .. } => RelayPhase::AwaitingRelease { pending: Some(rgb) },
            RelayPhase::ResetPending { send_at, .. } => RelayPhase::ResetPending {
                send_at,
                pending: Some(rgb),
            },
        };
    }

    fn advance<C: MessageChannel, V: VisualFeedback>(
        &mut self,
        now: Millis,
        engaged: bool,
        channel: &mut C,
        feedback: &mut V,
    ) -> Millis {
        match self.phase {
            RelayPhase::ColorPending { color }
            | RelayPhase::AwaitingRelease {
                pending: Some(color),
            } if engaged => {
                self.broadcast(now, color, channel, feedback);
            }
            RelayPhase::Broadcasting { until, queued, .. } if now >= until => {
                feedback.set_all(IDLE_COLOR);
                self.phase = RelayPhase::AwaitingRelease { pending: queued };
                info!("Relay: broadcast done, waiting for release");
            }
            RelayPhase::AwaitingRelease { pending } if !engaged && self.button_was_down => {
                info!("Relay: trigger released, sending reset");
                self.phase = RelayPhase::ResetPending {
                    send_at: now + self.config.release_debounce_ms,
                    pending,
                };
                return self.config.release_debounce_ms;
            }
            RelayPhase::ResetPending { send_at, pending } => {
                if now < send_at {
                    return send_at - now;
                }
                if let Err(e) = channel.send(self.mailbox, &Message::ResetSignal) {
                    warn!("Relay: reset send failed: {}", e);
                }
                self.button_was_down = false;
                self.phase = match pending {
                    Some(color) => RelayPhase::ColorPending { color },
                    None => RelayPhase::Idle,
                };
            }
            _ => {}
        }
        self.config.poll_interval_ms
    }

    fn broadcast<C: MessageChannel, V: VisualFeedback>(
        &mut self,
        now: Millis,
        color: Color,
        channel: &mut C,
        feedback: &mut V,
    ) {
        info!(
            "Relay: door closed, broadcasting ({}, {}, {})",
            color.r,
            color.g,
            color.b
        );
        if let Err(e) = channel.broadcast(&Message::BroadcastColor { rgb: color }) {
            warn!("Relay: broadcast failed: {}", e);
        }
        feedback.set_all(CONFIRM_COLOR);
        self.phase = RelayPhase::Broadcasting {
            color,
            until: now + self.config.confirmation_dwell_ms,
            queued: None,
        };
    }
}
