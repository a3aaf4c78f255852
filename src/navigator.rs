//! Navigator composition: binds an external stack router to the stack view
//! and exposes navigation actions plus transition events to consumers.

use std::{collections::BTreeMap, rc::Rc};

use crate::{
    descriptor::{Descriptor, DescriptorMap, RenderFn},
    engine::SceneTransitioner,
    error::{MorphstackError, MorphstackResult},
    events::{EventBus, StackEvent},
    options::ScreenOptions,
    route::{NavigationState, Route},
    scene_stack::{ScenePlan, ScreenHost},
    view::StackView,
};

/// Navigation actions understood by the external router.
#[derive(Clone, Debug)]
pub enum NavAction {
    Push {
        name: String,
        params: serde_json::Value,
    },
    Pop {
        count: usize,
    },
    PopToTop,
}

/// The external router boundary: an ordered route list with a focused index,
/// advanced by dispatched actions.
///
/// `state` must hand out the same `Rc` allocation until the route list
/// actually changes; the reconciler's fast path depends on it.
pub trait StackRouting {
    fn state(&self) -> NavigationState;
    fn dispatch(&mut self, action: NavAction) -> NavigationState;
}

struct ScreenEntry<C> {
    options: ScreenOptions,
    render: RenderFn<C>,
}

/// Wires a router into the reconciler/renderer pair.
///
/// Screens are registered by name with their options and render callback;
/// descriptors are rebuilt from the registry whenever the route set changes
/// and kept reference-stable otherwise.
pub struct Navigator<R, C> {
    router: R,
    view: StackView<C>,
    screens: BTreeMap<String, ScreenEntry<C>>,
    default_options: ScreenOptions,
    descriptors: Rc<DescriptorMap<C>>,
    descriptors_dirty: bool,
}

impl<R: StackRouting, C: 'static> Navigator<R, C> {
    pub fn new(router: R) -> Self {
        Self {
            router,
            view: StackView::new(),
            screens: BTreeMap::new(),
            default_options: ScreenOptions::default(),
            descriptors: Rc::new(DescriptorMap::new()),
            descriptors_dirty: true,
        }
    }

    /// Navigator-wide options merged beneath each screen's own options.
    pub fn set_default_options(&mut self, options: ScreenOptions) {
        self.default_options = options;
        self.descriptors_dirty = true;
    }

    pub fn register_screen(
        &mut self,
        name: impl Into<String>,
        options: ScreenOptions,
        render: impl Fn(&Route) -> C + 'static,
    ) {
        self.screens.insert(
            name.into(),
            ScreenEntry {
                options,
                render: Rc::new(render),
            },
        );
        self.descriptors_dirty = true;
    }

    pub fn attach_engine(&self, engine: Box<dyn SceneTransitioner>) {
        self.view.attach_engine(engine);
    }

    pub fn events(&self) -> EventBus {
        self.view.events()
    }

    pub fn subscribe(&self, listener: impl FnMut(&StackEvent) + 'static) {
        self.view.subscribe(listener);
    }

    pub fn routes(&self) -> Vec<Route> {
        self.view.routes()
    }

    pub fn view(&self) -> &StackView<C> {
        &self.view
    }

    pub fn scene_plan(&self, host: &dyn ScreenHost) -> MorphstackResult<ScenePlan<C>> {
        self.view.scene_plan(host)
    }

    /// Feed the router's current state through the reconciler. Call once
    /// after registration, and again whenever the router changes out of band.
    pub fn sync(&mut self) -> MorphstackResult<()> {
        let state = self.router.state();
        self.apply(state)
    }

    /// Push a new screen onto the stack.
    pub fn push(
        &mut self,
        name: impl Into<String>,
        params: serde_json::Value,
    ) -> MorphstackResult<()> {
        let name = name.into();
        if !self.screens.contains_key(&name) {
            return Err(MorphstackError::validation(format!(
                "screen '{name}' is not registered"
            )));
        }
        tracing::debug!(screen = %name, "push");
        let state = self.router.dispatch(NavAction::Push { name, params });
        self.apply(state)
    }

    /// Pop `count` screens from the stack.
    pub fn pop(&mut self, count: usize) -> MorphstackResult<()> {
        if count == 0 {
            return Err(MorphstackError::navigation("pop count must be > 0"));
        }
        tracing::debug!(count, "pop");
        let state = self.router.dispatch(NavAction::Pop { count });
        self.apply(state)
    }

    /// Pop to the first screen in the stack, dismissing all others.
    pub fn pop_to_top(&mut self) -> MorphstackResult<()> {
        tracing::debug!("pop_to_top");
        let state = self.router.dispatch(NavAction::PopToTop);
        self.apply(state)
    }

    /// Dispatch a router action directly.
    pub fn dispatch(&mut self, action: NavAction) -> MorphstackResult<()> {
        let state = self.router.dispatch(action);
        self.apply(state)
    }

    fn apply(&mut self, state: NavigationState) -> MorphstackResult<()> {
        self.refresh_descriptors(&state)?;
        self.view.update(state, Rc::clone(&self.descriptors))
    }

    /// Rebuild descriptors only when the route set or the registry changed,
    /// keeping the map's identity stable so reconciliation can skip work.
    fn refresh_descriptors(&mut self, state: &NavigationState) -> MorphstackResult<()> {
        let stale = self.descriptors_dirty
            || self.descriptors.len() != state.routes.len()
            || state
                .routes
                .iter()
                .any(|route| !self.descriptors.contains_key(&route.key));
        if !stale {
            return Ok(());
        }

        let mut next = DescriptorMap::new();
        for route in state.routes.iter() {
            let entry = self.screens.get(&route.name).ok_or_else(|| {
                MorphstackError::validation(format!("screen '{}' is not registered", route.name))
            })?;
            next.insert(
                route.key.clone(),
                Rc::new(Descriptor {
                    options: entry.options.merged_over(&self.default_options),
                    render: Rc::clone(&entry.render),
                }),
            );
        }
        self.descriptors = Rc::new(next);
        self.descriptors_dirty = false;
        Ok(())
    }
}
