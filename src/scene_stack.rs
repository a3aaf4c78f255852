//! Scene stack renderer: turns the rendered route list into positioned scene
//! frames the host mounts inside its transition stage.

use crate::{
    descriptor::DescriptorMap,
    error::{MorphstackError, MorphstackResult},
    route::Route,
};

/// How screens are hosted by the rendering backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScreenMode {
    /// Native screen recycling: the host may detach inactive screens.
    Recycled,
    /// Plain layered views; every screen stays mounted.
    Layered,
}

/// Capability probe for the rendering backend.
pub trait ScreenHost {
    /// Whether native screen recycling is available and enabled.
    fn screens_enabled(&self) -> bool;
}

/// Plain layered rendering, always available.
pub struct LayeredHost;

impl ScreenHost for LayeredHost {
    fn screens_enabled(&self) -> bool {
        false
    }
}

/// One positioned scene in the rendered stack.
#[derive(Debug)]
pub struct SceneFrame<C> {
    pub route: Route,
    /// Shared-element group tag for the scene wrapper.
    pub scene_id: String,
    /// Opaque style forwarded from the screen options.
    pub style: Option<serde_json::Value>,
    /// Backend hint: the focused screen and the one directly beneath it stay
    /// active so back navigation shows correct content under the animating
    /// top.
    pub active: bool,
    pub content: C,
}

/// Render output for one pass.
#[derive(Debug)]
pub struct ScenePlan<C> {
    pub mode: ScreenMode,
    pub frames: Vec<SceneFrame<C>>,
}

pub struct SceneStack;

impl SceneStack {
    pub fn plan<C>(
        routes: &[Route],
        descriptors: &DescriptorMap<C>,
        host: &dyn ScreenHost,
    ) -> MorphstackResult<ScenePlan<C>> {
        let mode = if host.screens_enabled() {
            ScreenMode::Recycled
        } else {
            ScreenMode::Layered
        };

        let mut frames = Vec::with_capacity(routes.len());
        for (index, route) in routes.iter().enumerate() {
            let descriptor = descriptors.get(&route.key).ok_or_else(|| {
                MorphstackError::invariant(format!(
                    "route '{}' has no resolvable descriptor",
                    route.key
                ))
            })?;

            frames.push(SceneFrame {
                route: route.clone(),
                scene_id: descriptor
                    .options
                    .scene_id
                    .clone()
                    .unwrap_or_else(|| route.key.clone()),
                style: descriptor.options.scene_style.clone(),
                active: index + 2 >= routes.len(),
                content: (descriptor.render)(route),
            });
        }

        Ok(ScenePlan { mode, frames })
    }
}
