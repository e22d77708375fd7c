use std::collections::VecDeque;
use std::sync::Mutex;

use super::{Marker, NodeId, RayCaster, SceneGraph, Vec3};

struct Node {
    name: String,
    markers: Vec<Marker>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// In-memory scene tree. Hosts without a live engine (and the test suite)
/// build one of these instead of bridging a real scene graph.
#[derive(Default)]
pub struct MemoryScene {
    nodes: Vec<Node>,
}

impl MemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_root(&mut self, name: impl Into<String>, markers: &[Marker]) -> NodeId {
        self.push_node(name.into(), markers, None)
    }

    pub fn add_child(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        markers: &[Marker],
    ) -> NodeId {
        let id = self.push_node(name.into(), markers, Some(parent));
        if let Some(node) = self.nodes.get_mut(parent.0 as usize) {
            node.children.push(id);
        }
        id
    }

    fn push_node(&mut self, name: String, markers: &[Marker], parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            name,
            markers: markers.to_vec(),
            parent,
            children: Vec::new(),
        });
        id
    }

    fn get(&self, node: NodeId) -> Option<&Node> {
        self.nodes.get(node.0 as usize)
    }
}

impl SceneGraph for MemoryScene {
    fn name(&self, node: NodeId) -> Option<&str> {
        self.get(node).map(|n| n.name.as_str())
    }

    fn has_marker(&self, node: NodeId, marker: Marker) -> bool {
        self.get(node)
            .map(|n| n.markers.contains(&marker))
            .unwrap_or(false)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.get(node).and_then(|n| n.parent)
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.get(node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }
}

/// Replay caster: answers casts from a fixed script, ignoring geometry.
/// Once the script is exhausted it keeps answering the final entry, so a
/// one-entry script behaves as "always hit X" (or "always miss").
pub struct ScriptedRayCaster {
    script: Mutex<VecDeque<Option<NodeId>>>,
    last: Mutex<Option<NodeId>>,
}

impl ScriptedRayCaster {
    pub fn new(script: Vec<Option<NodeId>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            last: Mutex::new(None),
        }
    }

    pub fn always(node: NodeId) -> Self {
        Self::new(vec![Some(node)])
    }
}

impl RayCaster for ScriptedRayCaster {
    fn cast(&self, _origin: Vec3, _forward: Vec3, _max_distance: f32) -> Option<NodeId> {
        let mut script = self.script.lock().unwrap();
        let mut last = self.last.lock().unwrap();
        match script.pop_front() {
            Some(hit) => {
                *last = hit;
                hit
            }
            None => *last,
        }
    }
}
