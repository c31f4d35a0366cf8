// Plushie Task - Farbe übernehmen, Licht per Taster schalten
use defmt::info;
use embassy_time::{Duration, Instant, Timer};
use playground_core::{MessageChannel, Plushie, PlushieInput, VisualFeedback};

use crate::hal::{EspNowChannel, RmtLedStrip, Trigger};

pub async fn plushie_loop<C: MessageChannel, V: VisualFeedback>(
    mut plushie: Plushie,
    mut channel: C,
    mut feedback: V,
    trigger: Trigger<'_>,
) -> ! {
    plushie.start(&mut feedback);

    loop {
        let input = PlushieInput {
            trigger_engaged: trigger.is_engaged(),
        };
        let now = Instant::now().as_millis();
        let delay = plushie.tick(now, input, &mut channel, &mut feedback);

        Timer::after(Duration::from_millis(delay)).await;
    }
}

#[embassy_executor::task]
pub async fn plushie_task(
    plushie: Plushie,
    channel: EspNowChannel<'static>,
    strip: RmtLedStrip<'static>,
    trigger: Trigger<'static>,
) {
    info!("Plushie: task started");
    plushie_loop(plushie, channel, strip, trigger).await
}
