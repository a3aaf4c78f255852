//! Stack view: owns the reconciler state and the transition arena, and drives
//! the scene-transition engine after every pass.

use std::{cell::RefCell, rc::Rc};

use crate::{
    descriptor::DescriptorMap,
    engine::{EndCallback, SceneTransitioner, StartCallback, TransitionRequest},
    error::MorphstackResult,
    events::{EventBus, StackEvent},
    reconcile::{NavigationUpdate, Reconciler, StackSnapshot},
    route::{NavigationState, Route},
    scene_stack::{ScenePlan, SceneStack, ScreenHost},
    transition::RouteTransitions,
};

struct ViewState<C> {
    snapshot: StackSnapshot<C>,
    transitions: RouteTransitions,
    engine: Option<Box<dyn SceneTransitioner>>,
}

/// The stack view binds reconciliation, rendering and transition driving for
/// one navigator.
///
/// All state lives behind a single shared cell so engine lifecycle callbacks
/// can finalize removals after the update pass that scheduled them.
pub struct StackView<C> {
    state: Rc<RefCell<ViewState<C>>>,
    events: EventBus,
}

impl<C: 'static> Default for StackView<C> {
    fn default() -> Self {
        Self::new()
    }
}

// Lifecycle callbacks handed to the engine are boxed `'static` closures
// holding a weak reference to the view state, so the content type must be
// owned data.
impl<C: 'static> StackView<C> {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(ViewState {
                snapshot: StackSnapshot::empty(),
                transitions: RouteTransitions::new(),
                engine: None,
            })),
            events: EventBus::new(),
        }
    }

    /// Attach the scene-transition engine once the host has mounted it.
    /// Until then transition creation is deferred from pass to pass.
    pub fn attach_engine(&self, engine: Box<dyn SceneTransitioner>) {
        self.state.borrow_mut().engine = Some(engine);
    }

    pub fn events(&self) -> EventBus {
        self.events.clone()
    }

    pub fn subscribe(&self, listener: impl FnMut(&StackEvent) + 'static) {
        self.events.subscribe(listener);
    }

    /// The routes currently rendered, including any still animating out.
    pub fn routes(&self) -> Vec<Route> {
        self.state.borrow().snapshot.routes.clone()
    }

    /// Whether a route still has an unresolved transition record.
    pub fn is_transitioning(&self, key: &str) -> bool {
        self.state.borrow().transitions.contains_key(key)
    }

    /// `Some(closing)` while a route has an unresolved transition record.
    pub fn closing(&self, key: &str) -> Option<bool> {
        self.state
            .borrow()
            .transitions
            .get(key)
            .map(|record| record.closing)
    }

    /// Run exactly one reconciliation pass, then one transition-driver pass
    /// against the snapshot it produced.
    #[tracing::instrument(skip_all)]
    pub fn update(
        &self,
        state: NavigationState,
        descriptors: Rc<DescriptorMap<C>>,
    ) -> MorphstackResult<()> {
        let update = NavigationUpdate { state, descriptors };
        {
            let mut view = self.state.borrow_mut();
            let view = &mut *view;
            if let Some(next) = Reconciler::reconcile(&view.snapshot, &mut view.transitions, &update)? {
                view.snapshot = next;
            }
        }
        self.drive_transitions();
        Ok(())
    }

    /// Render plan for the current snapshot.
    pub fn scene_plan(&self, host: &dyn ScreenHost) -> MorphstackResult<ScenePlan<C>> {
        let view = self.state.borrow();
        SceneStack::plan(&view.snapshot.routes, &view.snapshot.descriptors, host)
    }

    fn drive_transitions(&self) {
        let keys: Vec<String> = self.state.borrow().transitions.keys().cloned().collect();
        for key in keys {
            self.drive_transition(&key);
        }
    }

    fn drive_transition(&self, key: &str) {
        let mut view = self.state.borrow_mut();
        let view = &mut *view;
        let Some(record) = view.transitions.get_mut(key) else {
            return;
        };

        let (from_id, to_id) = {
            let (from, to) = record.endpoints();
            (from.to_string(), to.to_string())
        };

        if record.handle.is_none() {
            let Some(engine) = view.engine.as_mut() else {
                // Engine not mounted yet; picked up on the next pass.
                tracing::trace!(route = key, "transition deferred, no engine attached");
                return;
            };

            let spring = view
                .snapshot
                .descriptors
                .get(key)
                .and_then(|descriptor| descriptor.options.spring_config());

            let mut handle = engine.create_transition(TransitionRequest {
                from_id: from_id.clone(),
                to_id: to_id.clone(),
                spring,
            });
            handle.on_enter_start(self.lifecycle_start(key));
            handle.on_leave_start(self.lifecycle_start(key));
            handle.on_enter_end(self.lifecycle_end(key));
            handle.on_leave_end(self.lifecycle_end(key));
            record.handle = Some(handle);
        }

        if let Some(handle) = record.handle.as_mut() {
            if to_id == handle.from_id() {
                // Heading back to where this transition began: reverse it
                // rather than replaying from scratch.
                tracing::trace!(route = key, "cancelling transition");
                handle.cancel();
            } else {
                tracing::trace!(route = key, "continuing transition");
                handle.resume();
            }
        }
    }

    fn lifecycle_start(&self, key: &str) -> StartCallback {
        let state = Rc::downgrade(&self.state);
        let events = self.events.clone();
        let key = key.to_string();
        Box::new(move || {
            let Some(state) = state.upgrade() else { return };
            let Some((closing, progress)) = start_payload(&state, &key) else {
                return;
            };
            events.emit(&StackEvent::TransitionStart {
                route_key: key.clone(),
                closing,
                progress,
            });
        })
    }

    fn lifecycle_end(&self, key: &str) -> EndCallback {
        let state = Rc::downgrade(&self.state);
        let events = self.events.clone();
        let key = key.to_string();
        Box::new(move |cancelled| {
            let Some(state) = state.upgrade() else { return };
            let Some(closing) = state.borrow().transitions.get(&key).map(|r| r.closing) else {
                return;
            };

            events.emit(&StackEvent::TransitionEnd {
                route_key: key.clone(),
                closing,
                cancelled,
            });

            let mut view = state.borrow_mut();
            if !cancelled && closing {
                // The close ran to completion: the route leaves the rendered
                // list for good.
                view.snapshot.routes.retain(|route| route.key != key);
            }
            // Either way the record is resolved; the next focus change will
            // mint a fresh one.
            view.transitions.remove(&key);
        })
    }
}

fn start_payload<C>(state: &Rc<RefCell<ViewState<C>>>, key: &str) -> Option<(bool, f64)> {
    let view = state.borrow();
    let record = view.transitions.get(key)?;
    let progress = record
        .handle
        .as_ref()
        .map(|handle| handle.progress())
        .unwrap_or(0.0);
    Some((record.closing, progress))
}
