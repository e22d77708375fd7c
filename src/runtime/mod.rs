use std::{path::Path, sync::Arc};

use anyhow::{bail, Context, Result};
use chrono::Utc;
use log::{error, info};
use tokio::{sync::Mutex, task::JoinHandle, time::Duration};
use tokio_util::sync::CancellationToken;

use crate::{
    config::TrackerConfig,
    recorder::SessionRecorder,
    scene::{PoseSource, RayCaster, SceneGraph},
    tracking::{LookAccumulator, ObservationSampler},
};

pub mod loop_worker;

use loop_worker::tracking_loop;

/// Owns the tracker lifecycle: loads the session log, runs the tick loop,
/// and flushes accumulated look times on shutdown.
///
/// `shutdown` is the explicit end-of-life hook; hosts must invoke it exactly
/// once before exiting or the session's data is lost.
pub struct TrackerController {
    config: TrackerConfig,
    sampler: Arc<Mutex<ObservationSampler>>,
    recorder: SessionRecorder,
    handle: Option<JoinHandle<()>>,
    cancel_token: Option<CancellationToken>,
}

impl TrackerController {
    pub fn new(config: TrackerConfig, data_dir: impl AsRef<Path>) -> Self {
        let log_path = data_dir.as_ref().join(&config.log_file_name);
        Self {
            sampler: Arc::new(Mutex::new(ObservationSampler::new(config.look_distance))),
            recorder: SessionRecorder::new(log_path),
            config,
            handle: None,
            cancel_token: None,
        }
    }

    /// Load prior session data and start the tick loop.
    pub async fn start(
        &mut self,
        scene: Arc<dyn SceneGraph + Send + Sync>,
        caster: Arc<dyn RayCaster + Send + Sync>,
        poses: Arc<dyn PoseSource + Send + Sync>,
    ) -> Result<()> {
        if self.handle.is_some() {
            bail!("tracking already active");
        }

        self.recorder.load(Utc::now())?;

        let cancel_token = CancellationToken::new();
        let handle = tokio::spawn(tracking_loop(
            scene,
            caster,
            poses,
            self.sampler.clone(),
            Duration::from_millis(self.config.tick_interval_ms),
            cancel_token.clone(),
        ));

        self.handle = Some(handle);
        self.cancel_token = Some(cancel_token);
        info!(
            "tracking started (tick interval {} ms, look distance {})",
            self.config.tick_interval_ms, self.config.look_distance
        );
        Ok(())
    }

    /// Stop ticking and flush the session log. A failed write is logged and
    /// swallowed: the process is exiting and there is nothing left to retry.
    pub async fn shutdown(&mut self) -> Result<()> {
        let Some(handle) = self.handle.take() else {
            bail!("no active tracking to shut down");
        };

        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }
        handle
            .await
            .context("tracking loop task failed to join")?;

        let sampler = self.sampler.lock().await;
        if let Err(err) = self.recorder.flush(sampler.times(), Utc::now()) {
            error!("failed to write session log: {err:?}");
        }
        Ok(())
    }

    /// Snapshot of the per-key totals accumulated so far.
    pub async fn accumulated(&self) -> LookAccumulator {
        self.sampler.lock().await.times().clone()
    }
}
