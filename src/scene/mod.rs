use serde::{Deserialize, Serialize};

pub mod memory;

pub use memory::{MemoryScene, ScriptedRayCaster};

/// Handle to a node inside a host scene graph. Only meaningful for the
/// `SceneGraph` that issued it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Observer position and forward direction for one tick's ray cast.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub forward: Vec3,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            forward: Vec3::new(0.0, 0.0, 1.0),
        }
    }
}

/// Tag markers the hierarchy resolution policy looks for on scene nodes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Marker {
    Category,
    Product,
}

/// Read-only view of the host's scene tree.
///
/// Every method is total: an id the graph does not recognize answers `None`
/// (or `false` / empty), it never panics. Resolution treats unknown ids as an
/// invalid hierarchy.
pub trait SceneGraph {
    fn name(&self, node: NodeId) -> Option<&str>;
    fn has_marker(&self, node: NodeId, marker: Marker) -> bool;
    fn parent(&self, node: NodeId) -> Option<NodeId>;
    fn children(&self, node: NodeId) -> Vec<NodeId>;
}

/// Host ray-intersection capability. A miss within `max_distance` is the
/// normal "observing nothing" outcome, not an error.
pub trait RayCaster {
    fn cast(&self, origin: Vec3, forward: Vec3, max_distance: f32) -> Option<NodeId>;
}

/// Supplies the observer pose for each tick of the runtime loop.
pub trait PoseSource {
    fn sample(&self) -> Pose;
}

/// A fixed pose is its own source (static observer).
impl PoseSource for Pose {
    fn sample(&self) -> Pose {
        *self
    }
}
