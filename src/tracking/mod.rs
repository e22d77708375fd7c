pub mod accumulator;
pub mod hierarchy;
pub mod sampler;

pub use accumulator::LookAccumulator;
pub use hierarchy::{resolve_object_key, REQUIRED_ROOT_NAME};
pub use sampler::ObservationSampler;
