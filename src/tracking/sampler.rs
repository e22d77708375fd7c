use crate::scene::{NodeId, Pose, RayCaster, SceneGraph};

use super::accumulator::LookAccumulator;
use super::hierarchy::resolve_object_key;

/// Per-tick observation state: which object the previous cast hit, and the
/// accumulated look time per resolved key.
///
/// Tick order matters: the elapsed interval is credited to the *previous*
/// tick's target (that is what was being looked at while the interval passed),
/// and only then is the ray re-cast for the current frame.
#[derive(Debug)]
pub struct ObservationSampler {
    look_distance: f32,
    last_target: Option<NodeId>,
    times: LookAccumulator,
}

impl ObservationSampler {
    pub fn new(look_distance: f32) -> Self {
        Self {
            look_distance,
            last_target: None,
            times: LookAccumulator::new(),
        }
    }

    pub fn tick(
        &mut self,
        scene: &dyn SceneGraph,
        caster: &dyn RayCaster,
        pose: Pose,
        delta_secs: f64,
    ) {
        self.accumulate_previous(scene, delta_secs);
        self.last_target = caster.cast(pose.position, pose.forward, self.look_distance);
    }

    /// Credit the elapsed interval to the previous tick's target. Targets
    /// whose hierarchy does not resolve are observed but never accumulated.
    fn accumulate_previous(&mut self, scene: &dyn SceneGraph, delta_secs: f64) {
        let Some(target) = self.last_target else {
            return;
        };
        if let Some(key) = resolve_object_key(scene, target) {
            self.times.add(&key, delta_secs);
        }
    }

    pub fn times(&self) -> &LookAccumulator {
        &self.times
    }

    pub fn last_target(&self) -> Option<NodeId> {
        self.last_target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Marker, MemoryScene, ScriptedRayCaster, Vec3};

    fn pose() -> Pose {
        Pose {
            position: Vec3::ZERO,
            forward: Vec3::new(0.0, 0.0, 1.0),
        }
    }

    #[test]
    fn credits_interval_to_previous_target() {
        let mut scene = MemoryScene::new();
        let root = scene.add_root("Shelf", &[]);
        let lamp = scene.add_child(root, "Lamp42", &[Marker::Category]);

        // Hit for three ticks, then look away.
        let caster = ScriptedRayCaster::new(vec![Some(lamp), Some(lamp), Some(lamp), None]);
        let mut sampler = ObservationSampler::new(10.0);

        for _ in 0..4 {
            sampler.tick(&scene, &caster, pose(), 0.5);
        }

        assert_eq!(sampler.times().get("Lamp42"), Some(1.5));
        assert_eq!(sampler.last_target(), None);
    }

    #[test]
    fn first_tick_accumulates_nothing() {
        let mut scene = MemoryScene::new();
        let root = scene.add_root("Shelf", &[]);
        let lamp = scene.add_child(root, "Lamp42", &[Marker::Category]);

        let caster = ScriptedRayCaster::always(lamp);
        let mut sampler = ObservationSampler::new(10.0);

        sampler.tick(&scene, &caster, pose(), 0.5);
        assert!(sampler.times().is_empty());
        assert_eq!(sampler.last_target(), Some(lamp));
    }

    #[test]
    fn invalid_hierarchy_targets_never_accumulate() {
        let mut scene = MemoryScene::new();
        let shelf = scene.add_root("Shelf", &[]);
        let box_ = scene.add_child(shelf, "Box", &[]);
        let item = scene.add_child(box_, "Item", &[]);

        let caster = ScriptedRayCaster::always(item);
        let mut sampler = ObservationSampler::new(10.0);

        for _ in 0..10 {
            sampler.tick(&scene, &caster, pose(), 0.5);
        }

        assert!(sampler.times().is_empty());
        // Still tracked as the current target, just never credited.
        assert_eq!(sampler.last_target(), Some(item));
    }

    #[test]
    fn switching_targets_splits_the_credit() {
        let mut scene = MemoryScene::new();
        let root = scene.add_root("Shelf", &[]);
        let lamp = scene.add_child(root, "Lamp42", &[Marker::Category]);
        let vase = scene.add_child(root, "Vase7", &[Marker::Category]);

        let caster = ScriptedRayCaster::new(vec![
            Some(lamp),
            Some(lamp),
            Some(vase),
            Some(vase),
            None,
        ]);
        let mut sampler = ObservationSampler::new(10.0);

        for _ in 0..5 {
            sampler.tick(&scene, &caster, pose(), 0.25);
        }

        assert_eq!(sampler.times().get("Lamp42"), Some(0.5));
        assert_eq!(sampler.times().get("Vase7"), Some(0.5));
    }

    #[test]
    fn miss_then_hit_leaves_gap_uncredited() {
        let mut scene = MemoryScene::new();
        let root = scene.add_root("Shelf", &[]);
        let lamp = scene.add_child(root, "Lamp42", &[Marker::Category]);

        let caster = ScriptedRayCaster::new(vec![Some(lamp), None, Some(lamp), None]);
        let mut sampler = ObservationSampler::new(10.0);

        for _ in 0..4 {
            sampler.tick(&scene, &caster, pose(), 1.0);
        }

        // Two intervals had the lamp as the previous target.
        assert_eq!(sampler.times().get("Lamp42"), Some(2.0));
    }
}
