// Mailbox Task - Farbauswahl per Slider, Übergabe an das Relay
use defmt::info;
use embassy_time::{Duration, Instant, Timer};
use heapless::Vec;
use playground_core::{Mailbox, MailboxInput, MessageChannel, TriggerEdge, VisualFeedback};

use crate::TriggerEdgeReceiver;
use crate::config::TRIGGER_EDGE_QUEUE_SIZE;
use crate::hal::{EspNowChannel, RmtLedStrip, Slider};

/// Mailbox Loop - generisch über Nachrichtenkanal und LED-Ausgabe
///
/// Pro Durchlauf:
/// - Taster-Flanken aus der Queue holen (einmal pro Tick)
/// - Slider lesen
/// - `Mailbox::tick()` aufrufen und die gelieferte Zeit warten
///
/// # Parameter
/// - `mailbox`: Zustandsautomat
/// - `channel`: Nachrichtenkanal (ESP-NOW oder Mock)
/// - `feedback`: LED-Ausgabe (Ring oder Mock)
/// - `slider`: ADC-Slider
/// - `edges`: Queue mit Taster-Flanken vom Edge-Task
pub async fn mailbox_loop<C: MessageChannel, V: VisualFeedback>(
    mut mailbox: Mailbox,
    mut channel: C,
    mut feedback: V,
    mut slider: Slider<'_>,
    edges: TriggerEdgeReceiver,
) -> ! {
    mailbox.start(&mut feedback);

    loop {
        let mut pending: Vec<TriggerEdge, TRIGGER_EDGE_QUEUE_SIZE> = Vec::new();
        while let Ok(edge) = edges.try_receive() {
            if pending.push(edge).is_err() {
                break;
            }
        }

        let input = MailboxInput {
            edges: &pending,
            slider: slider.read(),
        };
        let now = Instant::now().as_millis();
        let delay = mailbox.tick(now, input, &mut channel, &mut feedback);

        // Async Delay: gibt CPU an andere Tasks zurück
        Timer::after(Duration::from_millis(delay)).await;
    }
}

/// Mailbox Task - Embassy Task für die Mailbox-Rolle
#[embassy_executor::task]
pub async fn mailbox_task(
    mailbox: Mailbox,
    channel: EspNowChannel<'static>,
    strip: RmtLedStrip<'static>,
    slider: Slider<'static>,
    edges: TriggerEdgeReceiver,
) {
    info!("Mailbox: task started");
    mailbox_loop(mailbox, channel, strip, slider, edges).await
}
