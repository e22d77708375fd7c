//! Gaze dwell-time telemetry core.
//!
//! Each simulation tick the [`tracking::ObservationSampler`] resolves which
//! tracked scene object the observer is looking at (forward ray cast, bounded
//! distance) and credits the elapsed interval to the previous tick's target.
//! At shutdown the [`recorder::SessionRecorder`] flushes per-object totals to
//! a `;`-separated session log that carries across process lifetimes. The
//! [`runtime::TrackerController`] wires the two to a tokio tick loop with an
//! explicit shutdown hook.

pub mod config;
pub mod recorder;
pub mod runtime;
pub mod scene;
pub mod tracking;

pub use config::{ConfigStore, TrackerConfig};
pub use recorder::{SessionRecorder, MIN_LOOK_TIME_SECS, SESSION_LOG_FILE_NAME};
pub use runtime::TrackerController;
pub use scene::{Marker, MemoryScene, NodeId, Pose, PoseSource, RayCaster, SceneGraph, Vec3};
pub use tracking::{LookAccumulator, ObservationSampler};

/// Initialize logging from the `RUST_LOG` environment variable. Safe to call
/// more than once; later calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .try_init();
}
