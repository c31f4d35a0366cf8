//! Mailbox-Zustandsautomat (Eingabestation)
//!
//! Ablauf eines Zyklus:
//!
//! ```text
//! Sleeping ──Taster──▶ WakingUp ──Slider bewegt──▶ ColorSelecting
//!    ▲                    ▲                            │      │
//!    │                    └──── 3 s keine Bewegung ────┘      │ Taster
//!    │                                                        ▼
//! Finishing ◀── Tür zu / Timeout ── AwaitingDoorClose ◀──Ack── ColorLocked
//! ```
//!
//! Ein `ResetSignal` erzwingt in jedem Zustand die Abschluss-Animation
//! (`Finishing`, ein Regenbogen-Umlauf) und danach `Sleeping`.

use crate::config::ProtocolConfig;
use crate::door::{DoorCloseDetector, DoorVerdict};
use crate::logic::{hsv_to_rgb, slider_moved, slider_to_hue};
use crate::protocol::Inbox;
use crate::traits::{MessageChannel, Pattern, VisualFeedback};
use crate::types::{Address, Color, Message, Millis, TriggerEdge, WHITE};

/// Eingaben eines Ticks
#[derive(Debug, Clone, Copy)]
pub struct MailboxInput<'a> {
    /// Seit dem letzten Tick aufgelaufene Taster-Flanken (älteste zuerst)
    pub edges: &'a [TriggerEdge],
    /// Aktueller Slider-Rohwert
    pub slider: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailboxState {
    Sleeping,
    /// Breathing-Animation, wartet auf Slider-Bewegung
    WakingUp,
    /// Live-Vorschau der Slider-Farbe
    ColorSelecting,
    /// Farbe gelockt, ColorOffer wird wiederholt bis zum Ack
    ColorLocked,
    /// Ack erhalten, Echo-Runden laufen
    AwaitingDoorClose(DoorCloseDetector),
    /// Abschluss-Animation läuft bis `until`, danach `Sleeping`
    Finishing { until: Millis },
}

/// Momentaufnahme der Sitzungsfelder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MailboxSession {
    pub awake: bool,
    pub selecting: bool,
    pub locked: bool,
    pub ack_received: bool,
    pub current_color: Color,
    pub locked_color: Color,
    pub last_activity: Millis,
}

pub struct Mailbox {
    relay: Address,
    config: ProtocolConfig,
    state: MailboxState,
    current_color: Color,
    locked_color: Color,
    last_activity: Millis,
    last_slider: u16,
}

impl Mailbox {
    pub fn new(relay: Address, config: ProtocolConfig) -> Self {
        Self {
            relay,
            config,
            state: MailboxState::Sleeping,
            current_color: WHITE,
            locked_color: WHITE,
            last_activity: 0,
            last_slider: 0,
        }
    }

    pub fn state(&self) -> &MailboxState {
        &self.state
    }

    pub fn session(&self) -> MailboxSession {
        MailboxSession {
            awake: !matches!(
                self.state,
                MailboxState::Sleeping | MailboxState::Finishing { .. }
            ),
            selecting: matches!(
                self.state,
                MailboxState::ColorSelecting
                    | MailboxState::ColorLocked
                    | MailboxState::AwaitingDoorClose(_)
            ),
            locked: matches!(
                self.state,
                MailboxState::ColorLocked | MailboxState::AwaitingDoorClose(_)
            ),
            ack_received: matches!(self.state, MailboxState::AwaitingDoorClose(_)),
            current_color: self.current_color,
            locked_color: self.locked_color,
            last_activity: self.last_activity,
        }
    }

    /// Boot: LEDs aus, Schlafmodus
    pub fn start<V: VisualFeedback>(&mut self, feedback: &mut V) {
        feedback.clear();
        info!("Mailbox: ready, sleeping");
    }

    /// Ein Schleifendurchlauf; liefert die Wartezeit bis zum nächsten Tick
    pub fn tick<C: MessageChannel, V: VisualFeedback>(
        &mut self,
        now: Millis,
        input: MailboxInput<'_>,
        channel: &mut C,
        feedback: &mut V,
    ) -> Millis {
        let inbox = channel.poll();

        // Reset hat Vorrang vor allem anderen
        if inbox.iter().any(|m| m.message == Message::ResetSignal) {
            if let MailboxState::Finishing { .. } = self.state {
                debug!("Mailbox: ResetSignal while finishing, already resetting");
            } else {
                info!("Mailbox: ResetSignal received");
                self.finish_cycle(now, feedback);
                return self.config.poll_interval_ms;
            }
        }

        for edge in input.edges {
            if *edge == TriggerEdge::Engaged {
                self.on_press(now, input.slider, feedback);
            }
        }

        match self.state {
            MailboxState::Sleeping => {
                feedback.clear();
                self.config.poll_interval_ms
            }
            MailboxState::WakingUp => self.wait_for_slider(now, input.slider, feedback),
            MailboxState::ColorSelecting => self.select_color(now, input.slider, feedback),
            MailboxState::ColorLocked => self.offer_locked_color(now, &inbox, channel, feedback),
            MailboxState::AwaitingDoorClose(_) => self.check_door(now, &inbox, channel, feedback),
            MailboxState::Finishing { until } => {
                if now >= until {
                    feedback.clear();
                    self.state = MailboxState::Sleeping;
                    info!("Mailbox: cycle finished, sleeping");
                } else {
                    feedback.animate(Pattern::TrailingRainbow);
                }
                self.config.poll_interval_ms
            }
        }
    }

    fn on_press<V: VisualFeedback>(&mut self, now: Millis, slider: u16, feedback: &mut V) {
        match self.state {
            MailboxState::Sleeping => {
                info!("Mailbox: waking up");
                self.last_slider = slider;
                self.last_activity = now;
                self.state = MailboxState::WakingUp;
            }
            MailboxState::ColorSelecting => {
                self.locked_color = self.current_color;
                self.state = MailboxState::ColorLocked;
                feedback.set_all(self.locked_color);
                info!(
                    "Mailbox: locked color ({}, {}, {})",
                    self.locked_color.r,
                    self.locked_color.g,
                    self.locked_color.b
                );
            }
            _ => debug!("Mailbox: press ignored"),
        }
    }

    fn wait_for_slider<V: VisualFeedback>(
        &mut self,
        now: Millis,
        slider: u16,
        feedback: &mut V,
    ) -> Millis {
        feedback.animate(Pattern::Breathing { color: WHITE });

        if slider_moved(self.last_slider, slider, self.config.slider_noise_threshold) {
            info!("Mailbox: slider moved, selecting color");
            self.state = MailboxState::ColorSelecting;
            self.last_activity = now;
            self.preview(slider, feedback);
        }
        self.last_slider = slider;
        self.config.poll_interval_ms
    }

    fn select_color<V: VisualFeedback>(
        &mut self,
        now: Millis,
        slider: u16,
        feedback: &mut V,
    ) -> Millis {
        self.preview(slider, feedback);

        if slider_moved(self.last_slider, slider, self.config.slider_noise_threshold) {
            self.last_activity = now;
        }

        if now.saturating_sub(self.last_activity) > self.config.inactivity_window_ms {
            info!("Mailbox: no slider movement, back to breathing");
            self.state = MailboxState::WakingUp;
        }

        self.last_slider = slider;
        self.config.poll_interval_ms
    }

    fn preview<V: VisualFeedback>(&mut self, slider: u16, feedback: &mut V) {
        let hue = slider_to_hue(slider, self.config.slider_max);
        self.current_color = hsv_to_rgb(hue);
        feedback.set_all(self.current_color);
    }

    fn offer_locked_color<C: MessageChannel, V: VisualFeedback>(
        &mut self,
        now: Millis,
        inbox: &Inbox,
        channel: &mut C,
        feedback: &mut V,
    ) -> Millis {
        if inbox.iter().any(|m| m.message == Message::Ack) {
            info!("Mailbox: Ack received, waiting for door close");
            self.state = MailboxState::AwaitingDoorClose(DoorCloseDetector::new(now, &self.config));
            return self.config.poll_interval_ms;
        }

        feedback.set_all(self.locked_color);

        // Wiederholte identische Angebote sind harmlos
        let offer = Message::ColorOffer {
            rgb: self.locked_color,
        };
        if let Err(e) = channel.send(self.relay, &offer) {
            warn!("Mailbox: offer send failed: {}", e);
        }
        self.config.offer_interval_ms
    }

    fn check_door<C: MessageChannel, V: VisualFeedback>(
        &mut self,
        now: Millis,
        inbox: &Inbox,
        channel: &mut C,
        feedback: &mut V,
    ) -> Millis {
        let verdict = {
            let MailboxState::AwaitingDoorClose(door) = &mut self.state else {
                return self.config.poll_interval_ms;
            };

            if door.echo_outstanding() {
                // Nur die erste Echo-Antwort zählt für diese Runde
                let reply = inbox.iter().find_map(|m| match m.message {
                    Message::Echo { seq } => Some(seq),
                    _ => None,
                });
                door.record_reply(reply);
            }
            door.verdict(now)
        };

        if let DoorVerdict::Closed(reason) = verdict {
            info!("Mailbox: door closed ({})", reason);
            self.finish_cycle(now, feedback);
            return self.config.poll_interval_ms;
        }

        let echo = match &mut self.state {
            MailboxState::AwaitingDoorClose(door) => door.next_echo(),
            _ => return self.config.poll_interval_ms,
        };
        if let Err(e) = channel.send(self.relay, &echo) {
            warn!("Mailbox: echo send failed: {}", e);
        }
        self.config.echo_interval_ms
    }

    /// Sitzung zurücksetzen und die Abschluss-Animation starten
    fn finish_cycle<V: VisualFeedback>(&mut self, now: Millis, feedback: &mut V) {
        feedback.animate(Pattern::TrailingRainbow);

        self.state = MailboxState::Finishing {
            until: now + self.config.finish_animation_ms,
        };
        self.current_color = WHITE;
        self.locked_color = WHITE;
        self.last_activity = 0;
        info!("Mailbox: finishing cycle");
    }
}
