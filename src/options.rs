/// Per-screen configuration resolved by the host each render cycle.
///
/// Every field is optional; unset fields fall back along a documented chain
/// during reconciliation (own option, then peer option, then route key).
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScreenOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition_spec: Option<TransitionSpec>,

    /// Opaque style forwarded to the host's scene wrapper.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene_style: Option<serde_json::Value>,

    /// Shared-element group for this screen. Defaults to the route key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene_id: Option<String>,

    /// Shared-element group to animate from/back to. Defaults to the peer
    /// screen's scene id, then its route key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev_scene_id: Option<String>,
}

impl ScreenOptions {
    /// Field-by-field merge with per-screen options winning over defaults.
    pub fn merged_over(&self, defaults: &ScreenOptions) -> ScreenOptions {
        ScreenOptions {
            transition_spec: self
                .transition_spec
                .clone()
                .or_else(|| defaults.transition_spec.clone()),
            scene_style: self
                .scene_style
                .clone()
                .or_else(|| defaults.scene_style.clone()),
            scene_id: self.scene_id.clone().or_else(|| defaults.scene_id.clone()),
            prev_scene_id: self
                .prev_scene_id
                .clone()
                .or_else(|| defaults.prev_scene_id.clone()),
        }
    }

    /// Spring parameters to hand to the engine, when the configured animation
    /// kind is the spring kind. Any other configuration leaves the engine on
    /// its default.
    pub(crate) fn spring_config(&self) -> Option<SpringConfig> {
        match &self.transition_spec {
            Some(spec) if spec.animation == AnimationKind::Spring => Some(spec.config),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransitionSpec {
    pub animation: AnimationKind,
    pub config: SpringConfig,
}

/// The single supported transition animation kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationKind {
    Spring,
}

/// Damped-spring parameters, passed through to the engine untouched.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 100.0,
            damping: 10.0,
            mass: 1.0,
        }
    }
}
