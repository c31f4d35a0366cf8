//! Integration Tests für den Relay-Zustandsautomaten

mod common;

use common::{MAILBOX, MockChannel, PLUSHIE_A, RecordingFeedback};
use playground_core::relay::{ACK_COLOR, CONFIRM_COLOR, IDLE_COLOR};
use playground_core::{Message, Millis, ProtocolConfig, Relay, RelayInput, RelayPhase};
use rgb::RGB8;

const RED: RGB8 = RGB8 { r: 255, g: 0, b: 0 };
const TEAL: RGB8 = RGB8 {
    r: 0,
    g: 128,
    b: 128,
};
const ORANGE: RGB8 = RGB8 {
    r: 200,
    g: 100,
    b: 50,
};

struct Rig {
    relay: Relay,
    channel: MockChannel,
    feedback: RecordingFeedback,
}

impl Rig {
    fn new() -> Self {
        let mut rig = Self {
            relay: Relay::new(MAILBOX, ProtocolConfig::DEFAULT),
            channel: MockChannel::new(),
            feedback: RecordingFeedback::new(),
        };
        rig.relay.start(&mut rig.feedback);
        rig
    }

    fn tick(&mut self, now: Millis, engaged: bool) -> Millis {
        self.relay.tick(
            now,
            RelayInput {
                trigger_engaged: engaged,
            },
            &mut self.channel,
            &mut self.feedback,
        )
    }

    fn offer(&mut self, rgb: RGB8) {
        self.channel
            .deliver(MAILBOX, Message::ColorOffer { rgb });
    }

    /// Farbe angenommen und bei `now = 0` verteilt
    fn broadcasting(color: RGB8) -> Self {
        let mut rig = Self::new();
        rig.offer(color);
        rig.tick(0, true);
        assert!(matches!(rig.relay.phase(), RelayPhase::Broadcasting { .. }));
        rig
    }

    fn resets_sent(&self) -> usize {
        self.channel
            .sent_matching(|m| *m == Message::ResetSignal)
            .len()
    }
}

// ============================================================================
// Tests: Angebote
// ============================================================================

#[test]
fn test_boot_shows_idle_color() {
    let rig = Rig::new();
    assert_eq!(rig.feedback.last_frame(), Some(IDLE_COLOR));
    assert_eq!(rig.relay.phase(), RelayPhase::Idle);
    assert!(rig.relay.echo_mode());
}

#[test]
fn test_offer_is_acked_once() {
    let mut rig = Rig::new();
    rig.offer(ORANGE);
    let delay = rig.tick(0, false);

    assert_eq!(delay, 100);
    assert_eq!(rig.channel.sent, vec![(MAILBOX, Message::Ack)]);
    assert_eq!(rig.relay.pending_color(), Some(ORANGE));
    assert_eq!(rig.feedback.last_frame(), Some(ACK_COLOR));

    let session = rig.relay.session();
    assert!(session.ack_sent);
    assert!(!session.has_broadcast);
}

#[test]
fn test_every_offer_gets_its_own_ack() {
    let mut rig = Rig::new();
    rig.offer(RED);
    rig.offer(ORANGE);
    rig.tick(0, false);

    assert_eq!(rig.channel.sent_matching(|m| *m == Message::Ack).len(), 2);
    assert_eq!(rig.relay.pending_color(), Some(ORANGE));
}

#[test]
fn test_ack_goes_back_to_sender() {
    let mut rig = Rig::new();
    rig.channel
        .deliver(PLUSHIE_A, Message::ColorOffer { rgb: RED });
    rig.tick(0, false);
    assert_eq!(rig.channel.sent, vec![(PLUSHIE_A, Message::Ack)]);
}

#[test]
fn test_repeated_identical_offer_is_idempotent() {
    let mut rig = Rig::new();
    rig.offer(ORANGE);
    rig.tick(0, false);
    let before = rig.relay.session();

    rig.offer(ORANGE);
    rig.tick(500, false);
    assert_eq!(rig.relay.session(), before);
    assert_eq!(rig.relay.phase(), RelayPhase::ColorPending { color: ORANGE });
}

#[test]
fn test_other_messages_are_ignored() {
    let mut rig = Rig::new();
    rig.channel.deliver(MAILBOX, Message::Ack);
    rig.channel.deliver(MAILBOX, Message::ResetSignal);
    rig.channel
        .deliver(MAILBOX, Message::BroadcastColor { rgb: RED });
    rig.tick(0, false);

    assert!(rig.channel.sent.is_empty());
    assert_eq!(rig.relay.phase(), RelayPhase::Idle);
}

// ============================================================================
// Tests: Echo
// ============================================================================

#[test]
fn test_echo_is_looped_back() {
    let mut rig = Rig::new();
    rig.channel.deliver(MAILBOX, Message::Echo { seq: 5 });
    rig.tick(0, false);
    assert_eq!(rig.channel.sent, vec![(MAILBOX, Message::Echo { seq: 5 })]);
}

#[test]
fn test_echo_is_dropped_during_dwell() {
    let mut rig = Rig::broadcasting(ORANGE);
    assert!(!rig.relay.echo_mode());

    rig.channel.clear_log();
    rig.channel.deliver(MAILBOX, Message::Echo { seq: 9 });
    rig.tick(100, true);
    assert!(rig.channel.sent.is_empty());
}

// ============================================================================
// Tests: Broadcast und Reset
// ============================================================================

#[test]
fn test_trigger_without_color_does_nothing() {
    let mut rig = Rig::new();
    rig.tick(0, true);
    rig.tick(100, false);
    rig.tick(200, false);

    assert!(rig.channel.broadcasts.is_empty());
    assert_eq!(rig.resets_sent(), 0);
    assert_eq!(rig.relay.phase(), RelayPhase::Idle);
}

#[test]
fn test_trigger_broadcasts_pending_color() {
    let rig = Rig::broadcasting(ORANGE);

    assert_eq!(
        rig.channel.broadcasts,
        vec![Message::BroadcastColor { rgb: ORANGE }]
    );
    assert_eq!(rig.feedback.last_frame(), Some(CONFIRM_COLOR));
    assert!(rig.relay.session().has_broadcast);
    assert_eq!(rig.relay.pending_color(), None);
}

#[test]
fn test_confirmation_dwell_then_idle() {
    let mut rig = Rig::broadcasting(ORANGE);
    rig.tick(1_999, true);
    assert!(matches!(rig.relay.phase(), RelayPhase::Broadcasting { .. }));

    rig.tick(2_000, true);
    assert_eq!(
        rig.relay.phase(),
        RelayPhase::AwaitingRelease { pending: None }
    );
    assert_eq!(rig.feedback.last_frame(), Some(IDLE_COLOR));
    assert!(rig.relay.echo_mode());
    assert_eq!(rig.channel.broadcasts.len(), 1);
}

#[test]
fn test_release_sends_reset_once_after_debounce() {
    let mut rig = Rig::broadcasting(ORANGE);
    rig.tick(2_000, true);

    let delay = rig.tick(2_100, false);
    assert_eq!(delay, 100);
    assert_eq!(rig.resets_sent(), 0);

    rig.tick(2_200, false);
    assert_eq!(
        rig.channel.sent_matching(|m| *m == Message::ResetSignal),
        vec![(MAILBOX, Message::ResetSignal)]
    );
    assert_eq!(rig.relay.phase(), RelayPhase::Idle);
    assert!(!rig.relay.session().button_was_down);

    for now in (2_300..4_000).step_by(100) {
        rig.tick(now, false);
    }
    assert_eq!(rig.resets_sent(), 1);
}

#[test]
fn test_release_during_dwell_still_resets() {
    let mut rig = Rig::broadcasting(ORANGE);
    for now in (100..2_000).step_by(100) {
        rig.tick(now, false);
    }
    rig.tick(2_000, false);
    rig.tick(2_100, false);
    rig.tick(2_200, false);
    assert_eq!(rig.resets_sent(), 1);
}

#[test]
fn test_early_tick_waits_for_debounce() {
    let mut rig = Rig::broadcasting(ORANGE);
    rig.tick(2_000, true);
    rig.tick(2_100, false);

    let delay = rig.tick(2_150, false);
    assert_eq!(delay, 50);
    assert_eq!(rig.resets_sent(), 0);
}

// ============================================================================
// Tests: Angebote während des Broadcasts (letztes gewinnt)
// ============================================================================

#[test]
fn test_offer_mid_broadcast_is_queued_last_wins() {
    let mut rig = Rig::broadcasting(ORANGE);
    let frames_before = rig.feedback.frames.len();

    rig.offer(RED);
    rig.tick(500, false);
    rig.offer(TEAL);
    rig.tick(1_000, false);

    // Acks gehen raus, Anzeige bleibt auf der Bestätigungsfarbe
    assert_eq!(rig.channel.sent_matching(|m| *m == Message::Ack).len(), 3);
    assert_eq!(rig.feedback.frames.len(), frames_before);
    assert_eq!(rig.relay.pending_color(), Some(TEAL));

    rig.tick(2_000, false);
    rig.tick(2_100, false);
    rig.tick(2_200, false);
    assert_eq!(rig.resets_sent(), 1);
    assert_eq!(rig.relay.phase(), RelayPhase::ColorPending { color: TEAL });

    // Nächster Zyklus verteilt die zuletzt angebotene Farbe
    rig.tick(3_000, true);
    assert_eq!(
        rig.channel.broadcasts.last(),
        Some(&Message::BroadcastColor { rgb: TEAL })
    );
}

#[test]
fn test_failed_broadcast_still_completes_cycle() {
    let mut rig = Rig::new();
    rig.offer(ORANGE);
    rig.tick(0, false);

    rig.channel.fail_sends = true;
    rig.tick(100, true);
    assert!(matches!(rig.relay.phase(), RelayPhase::Broadcasting { .. }));

    rig.channel.fail_sends = false;
    rig.tick(2_100, false);
    rig.tick(2_200, false);
    rig.tick(2_300, false);
    assert_eq!(rig.resets_sent(), 1);
}
