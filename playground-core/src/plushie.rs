//! Plushie-Zustandsautomat (Anzeige-Knoten)
//!
//! Zwei unabhängige Zustände, beide über einen Taster gesteuert:
//! - Annahme-Sperre: nur bei offener Sperre wird eine BroadcastColor
//!   übernommen, danach schließt sie.
//! - Druckdauer: kurzer Druck schaltet das Licht, langer Druck
//!   (> `long_press_ms`) setzt auf Weiß zurück und öffnet die Sperre.

use crate::config::ProtocolConfig;
use crate::traits::{MessageChannel, VisualFeedback};
use crate::types::{Address, Color, Message, Millis, WHITE};

/// Farbe nach Boot und nach einem Long-Press
pub const DEFAULT_COLOR: Color = WHITE;

/// Eingaben eines Ticks
#[derive(Debug, Clone, Copy, Default)]
pub struct PlushieInput {
    pub trigger_engaged: bool,
}

/// Momentaufnahme der Sitzungsfelder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlushieSession {
    pub displayed_color: Color,
    pub light_on: bool,
    pub accepting_new_color: bool,
    pub press_started: Option<Millis>,
}

pub struct Plushie {
    relay: Address,
    config: ProtocolConfig,
    displayed_color: Color,
    light_on: bool,
    accepting_new_color: bool,
    press_started: Option<Millis>,
    long_press_fired: bool,
}

impl Plushie {
    /// `relay`: einzige Adresse, von der Farben angenommen werden
    pub fn new(relay: Address, config: ProtocolConfig) -> Self {
        Self {
            relay,
            config,
            displayed_color: DEFAULT_COLOR,
            light_on: true,
            accepting_new_color: true,
            press_started: None,
            long_press_fired: false,
        }
    }

    pub fn session(&self) -> PlushieSession {
        PlushieSession {
            displayed_color: self.displayed_color,
            light_on: self.light_on,
            accepting_new_color: self.accepting_new_color,
            press_started: self.press_started,
        }
    }

    /// Boot: Standardfarbe anzeigen
    pub fn start<V: VisualFeedback>(&mut self, feedback: &mut V) {
        feedback.set_all(self.displayed_color);
        info!("Plushie: ready");
    }

    pub fn tick<C: MessageChannel, V: VisualFeedback>(
        &mut self,
        now: Millis,
        input: PlushieInput,
        channel: &mut C,
        feedback: &mut V,
    ) -> Millis {
        let inbox = channel.poll();
        for inbound in inbox.iter() {
            if inbound.from != self.relay {
                debug!("Plushie: ignoring message from {}", inbound.from);
                continue;
            }
            if let Message::BroadcastColor { rgb } = inbound.message {
                self.on_broadcast(rgb, feedback);
            }
        }

        if input.trigger_engaged {
            self.on_held(now, feedback);
        } else if self.press_started.is_some() {
            self.on_release(feedback);
        }

        self.config.plushie_poll_interval_ms
    }

    fn on_broadcast<V: VisualFeedback>(&mut self, rgb: Color, feedback: &mut V) {
        if !self.accepting_new_color {
            debug!("Plushie: ignoring color, gate closed");
            return;
        }

        self.displayed_color = rgb;
        if self.light_on {
            feedback.set_all(rgb);
        }
        self.accepting_new_color = false;
        info!(
            "Plushie: color accepted ({}, {}, {}), gate closed",
            rgb.r,
            rgb.g,
            rgb.b
        );
    }

    fn on_held<V: VisualFeedback>(&mut self, now: Millis, feedback: &mut V) {
        let Some(started) = self.press_started else {
            self.press_started = Some(now);
            return;
        };

        if !self.long_press_fired && now.saturating_sub(started) > self.config.long_press_ms {
            self.long_press_fired = true;
            self.light_on = true;
            self.displayed_color = DEFAULT_COLOR;
            self.accepting_new_color = true;
            feedback.set_all(self.displayed_color);
            info!("Plushie: long press, reset to default, gate open");
        }
    }

    fn on_release<V: VisualFeedback>(&mut self, feedback: &mut V) {
        if !self.long_press_fired {
            self.light_on = !self.light_on;
            if self.light_on {
                feedback.set_all(self.displayed_color);
                info!("Plushie: light on");
            } else {
                feedback.clear();
                info!("Plushie: light off");
            }
        }
        self.press_started = None;
        self.long_press_fired = false;
    }
}
