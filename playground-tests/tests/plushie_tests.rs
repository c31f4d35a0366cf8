//! Integration Tests für den Plushie-Zustandsautomaten

mod common;

use common::{MockChannel, RELAY, RecordingFeedback, STRANGER};
use playground_core::types::{OFF, WHITE};
use playground_core::{Message, Millis, Plushie, PlushieInput, ProtocolConfig};
use rgb::RGB8;

const COLOR_A: RGB8 = RGB8 {
    r: 200,
    g: 100,
    b: 50,
};
const COLOR_B: RGB8 = RGB8 { r: 0, g: 0, b: 255 };

struct Rig {
    plushie: Plushie,
    channel: MockChannel,
    feedback: RecordingFeedback,
}

impl Rig {
    fn new() -> Self {
        let mut rig = Self {
            plushie: Plushie::new(RELAY, ProtocolConfig::DEFAULT),
            channel: MockChannel::new(),
            feedback: RecordingFeedback::new(),
        };
        rig.plushie.start(&mut rig.feedback);
        rig
    }

    fn tick(&mut self, now: Millis, engaged: bool) -> Millis {
        self.plushie.tick(
            now,
            PlushieInput {
                trigger_engaged: engaged,
            },
            &mut self.channel,
            &mut self.feedback,
        )
    }

    fn broadcast(&mut self, rgb: RGB8) {
        self.channel
            .deliver(RELAY, Message::BroadcastColor { rgb });
    }

    /// Taster von `from` bis `to` halten und dann loslassen
    fn press(&mut self, from: Millis, to: Millis) {
        let mut now = from;
        while now < to {
            now += self.tick(now, true);
        }
        self.tick(to, false);
    }
}

// ============================================================================
// Tests: Annahme-Sperre
// ============================================================================

#[test]
fn test_boot_shows_default_color() {
    let rig = Rig::new();
    let session = rig.plushie.session();

    assert_eq!(rig.feedback.last_frame(), Some(WHITE));
    assert!(session.light_on);
    assert!(session.accepting_new_color);
    assert_eq!(session.press_started, None);
}

#[test]
fn test_first_broadcast_is_adopted_and_closes_gate() {
    let mut rig = Rig::new();
    rig.broadcast(COLOR_A);
    let delay = rig.tick(0, false);

    assert_eq!(delay, 50);
    assert_eq!(rig.feedback.last_frame(), Some(COLOR_A));
    assert_eq!(rig.plushie.session().displayed_color, COLOR_A);
    assert!(!rig.plushie.session().accepting_new_color);
}

#[test]
fn test_closed_gate_ignores_further_colors() {
    let mut rig = Rig::new();
    rig.broadcast(COLOR_A);
    rig.tick(0, false);
    rig.broadcast(COLOR_B);
    rig.tick(50, false);

    assert_eq!(rig.plushie.session().displayed_color, COLOR_A);
    assert_eq!(rig.feedback.last_frame(), Some(COLOR_A));
}

#[test]
fn test_two_broadcasts_in_one_poll_keep_the_first() {
    let mut rig = Rig::new();
    rig.broadcast(COLOR_A);
    rig.broadcast(COLOR_B);
    rig.tick(0, false);
    assert_eq!(rig.plushie.session().displayed_color, COLOR_A);
}

#[test]
fn test_colors_from_other_senders_are_ignored() {
    let mut rig = Rig::new();
    rig.channel
        .deliver(STRANGER, Message::BroadcastColor { rgb: COLOR_A });
    rig.tick(0, false);

    let session = rig.plushie.session();
    assert_eq!(session.displayed_color, WHITE);
    assert!(session.accepting_new_color);
}

#[test]
fn test_color_adopted_while_dark_shows_on_toggle() {
    let mut rig = Rig::new();
    rig.press(0, 200);
    assert!(!rig.plushie.session().light_on);

    rig.broadcast(COLOR_A);
    rig.tick(300, false);
    assert_eq!(rig.feedback.last_frame(), Some(OFF));
    assert_eq!(rig.plushie.session().displayed_color, COLOR_A);

    rig.press(400, 600);
    assert_eq!(rig.feedback.last_frame(), Some(COLOR_A));
}

// ============================================================================
// Tests: Druckdauer
// ============================================================================

#[test]
fn test_short_press_toggles_light() {
    let mut rig = Rig::new();
    rig.press(0, 200);
    assert!(!rig.plushie.session().light_on);
    assert_eq!(rig.feedback.last_frame(), Some(OFF));
    assert_eq!(rig.plushie.session().press_started, None);

    rig.press(500, 700);
    assert!(rig.plushie.session().light_on);
    assert_eq!(rig.feedback.last_frame(), Some(WHITE));
}

#[test]
fn test_long_press_threshold_is_strict() {
    let mut rig = Rig::new();
    rig.broadcast(COLOR_A);
    rig.tick(0, false);

    rig.tick(1_000, true);
    rig.tick(2_400, true);
    assert!(!rig.plushie.session().accepting_new_color);

    rig.tick(2_401, true);
    let session = rig.plushie.session();
    assert!(session.accepting_new_color);
    assert_eq!(session.displayed_color, WHITE);
    assert_eq!(rig.feedback.last_frame(), Some(WHITE));
}

#[test]
fn test_long_press_suppresses_toggle() {
    let mut rig = Rig::new();
    rig.press(0, 2_000);

    let session = rig.plushie.session();
    assert!(session.light_on);
    assert_eq!(session.press_started, None);
}

#[test]
fn test_long_press_fires_once_per_hold() {
    let mut rig = Rig::new();
    rig.tick(0, true);
    rig.tick(1_500, true);
    let frames = rig.feedback.frames.len();

    rig.tick(3_000, true);
    rig.tick(5_000, true);
    assert_eq!(rig.feedback.frames.len(), frames);
}

#[test]
fn test_long_press_turns_dark_plushie_on() {
    let mut rig = Rig::new();
    rig.press(0, 200);
    assert!(!rig.plushie.session().light_on);

    rig.press(500, 2_500);
    assert!(rig.plushie.session().light_on);
    assert_eq!(rig.feedback.last_frame(), Some(WHITE));
}

#[test]
fn test_gate_sequence_long_press_accept_ignore() {
    let mut rig = Rig::new();
    rig.broadcast(COLOR_B);
    rig.tick(0, false);

    // Long-Press öffnet die Sperre wieder
    rig.press(100, 2_000);
    rig.broadcast(COLOR_A);
    rig.tick(2_100, false);
    assert_eq!(rig.plushie.session().displayed_color, COLOR_A);

    rig.broadcast(COLOR_B);
    rig.tick(2_200, false);
    assert_eq!(rig.plushie.session().displayed_color, COLOR_A);
    assert_eq!(rig.feedback.last_frame(), Some(COLOR_A));
}
