use std::{collections::BTreeMap, fmt};

use crate::{engine::Transition, route::Route};

/// Tracks a route entering or leaving focus and the state of its visual
/// transition.
///
/// Records are mutated in place across reconciliation passes: when the user
/// reverses direction mid-animation only `closing` flips, so the in-flight
/// engine handle keeps its identity instead of being discarded and recreated.
pub struct RouteTransition {
    pub route: Route,
    pub scene_id: String,
    pub prev_scene_id: String,
    /// The route is being removed and should play its transition in reverse.
    pub closing: bool,
    /// Attached lazily once the engine is mounted.
    pub handle: Option<Box<dyn Transition>>,
}

impl RouteTransition {
    /// Scene ids to animate between: a closing route plays back toward its
    /// previous scene, an opening route plays toward its own scene.
    pub fn endpoints(&self) -> (&str, &str) {
        if self.closing {
            (self.scene_id.as_str(), self.prev_scene_id.as_str())
        } else {
            (self.prev_scene_id.as_str(), self.scene_id.as_str())
        }
    }
}

impl fmt::Debug for RouteTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteTransition")
            .field("route", &self.route.key)
            .field("scene_id", &self.scene_id)
            .field("prev_scene_id", &self.prev_scene_id)
            .field("closing", &self.closing)
            .field("has_handle", &self.handle.is_some())
            .finish()
    }
}

/// Arena of transition records keyed by route key, owned exclusively by the
/// stack view.
pub type RouteTransitions = BTreeMap<String, RouteTransition>;
