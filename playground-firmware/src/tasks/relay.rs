// Relay Task - Angebote bestätigen, Echo spiegeln, Farbe verteilen
use defmt::info;
use embassy_time::{Duration, Instant, Timer};
use playground_core::{MessageChannel, Relay, RelayInput, VisualFeedback};

use crate::hal::{EspNowChannel, RmtLedStrip, Trigger};

/// Relay Loop - liest den Tür-Taster als Pegel und ruft `Relay::tick()` auf
pub async fn relay_loop<C: MessageChannel, V: VisualFeedback>(
    mut relay: Relay,
    mut channel: C,
    mut feedback: V,
    trigger: Trigger<'_>,
) -> ! {
    relay.start(&mut feedback);

    loop {
        let input = RelayInput {
            trigger_engaged: trigger.is_engaged(),
        };
        let now = Instant::now().as_millis();
        let delay = relay.tick(now, input, &mut channel, &mut feedback);

        Timer::after(Duration::from_millis(delay)).await;
    }
}

/// Relay Task - Embassy Task für die Relay-Rolle
#[embassy_executor::task]
pub async fn relay_task(
    relay: Relay,
    channel: EspNowChannel<'static>,
    strip: RmtLedStrip<'static>,
    trigger: Trigger<'static>,
) {
    info!("Relay: task started");
    relay_loop(relay, channel, strip, trigger).await
}
