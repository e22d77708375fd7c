use std::sync::Arc;
use std::time::Instant;

use log::info;
use tokio::sync::Mutex;
use tokio::time::{Duration, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::scene::{PoseSource, RayCaster, SceneGraph};
use crate::tracking::ObservationSampler;

/// Drives the sampler at a fixed tick interval until cancelled.
///
/// Deltas are measured with a monotonic clock rather than assumed equal to
/// the interval, so delayed ticks still credit the full elapsed time.
pub async fn tracking_loop(
    scene: Arc<dyn SceneGraph + Send + Sync>,
    caster: Arc<dyn RayCaster + Send + Sync>,
    poses: Arc<dyn PoseSource + Send + Sync>,
    sampler: Arc<Mutex<ObservationSampler>>,
    tick_interval: Duration,
    cancel_token: CancellationToken,
) {
    let mut ticker = tokio::time::interval(tick_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut last_tick = Instant::now();

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let now = Instant::now();
                let delta_secs = now.duration_since(last_tick).as_secs_f64();
                last_tick = now;

                let pose = poses.sample();
                sampler
                    .lock()
                    .await
                    .tick(scene.as_ref(), caster.as_ref(), pose, delta_secs);
            }
            _ = cancel_token.cancelled() => {
                info!("tracking loop shutting down");
                break;
            }
        }
    }
}
