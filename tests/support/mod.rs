//! Shared test doubles: a scripted in-memory stack router and a fake
//! scene-transition engine whose lifecycle callbacks tests fire by hand.

#![allow(dead_code)]

use std::{cell::RefCell, rc::Rc};

use morphstack::{
    EndCallback, NavAction, NavigationState, Route, SceneTransitioner, StackRouting,
    StartCallback, Transition, TransitionRequest,
};

/// Route tracing output through the test harness capture. Later calls are
/// no-ops once a global subscriber is installed.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Everything the fake engine recorded about one created transition.
pub struct FakeTransitionState {
    pub request: TransitionRequest,
    pub progress: f64,
    pub cancels: usize,
    pub resumes: usize,
    pub enter_start: Option<StartCallback>,
    pub enter_end: Option<EndCallback>,
    pub leave_start: Option<StartCallback>,
    pub leave_end: Option<EndCallback>,
}

pub type SharedTransition = Rc<RefCell<FakeTransitionState>>;

pub struct FakeEngine {
    created: Rc<RefCell<Vec<SharedTransition>>>,
}

impl FakeEngine {
    /// Returns the engine plus the shared log of created transitions.
    pub fn new() -> (Self, Rc<RefCell<Vec<SharedTransition>>>) {
        let created = Rc::new(RefCell::new(Vec::new()));
        (
            Self {
                created: Rc::clone(&created),
            },
            created,
        )
    }
}

struct FakeTransition {
    from_id: String,
    state: SharedTransition,
}

impl Transition for FakeTransition {
    fn from_id(&self) -> &str {
        &self.from_id
    }
    fn progress(&self) -> f64 {
        self.state.borrow().progress
    }
    fn on_enter_start(&mut self, cb: StartCallback) {
        self.state.borrow_mut().enter_start = Some(cb);
    }
    fn on_enter_end(&mut self, cb: EndCallback) {
        self.state.borrow_mut().enter_end = Some(cb);
    }
    fn on_leave_start(&mut self, cb: StartCallback) {
        self.state.borrow_mut().leave_start = Some(cb);
    }
    fn on_leave_end(&mut self, cb: EndCallback) {
        self.state.borrow_mut().leave_end = Some(cb);
    }
    fn cancel(&mut self) {
        self.state.borrow_mut().cancels += 1;
    }
    fn resume(&mut self) {
        self.state.borrow_mut().resumes += 1;
    }
}

impl SceneTransitioner for FakeEngine {
    fn create_transition(&mut self, request: TransitionRequest) -> Box<dyn Transition> {
        let from_id = request.from_id.clone();
        let state = Rc::new(RefCell::new(FakeTransitionState {
            request,
            progress: 0.0,
            cancels: 0,
            resumes: 0,
            enter_start: None,
            enter_end: None,
            leave_start: None,
            leave_end: None,
        }));
        self.created.borrow_mut().push(Rc::clone(&state));
        Box::new(FakeTransition { from_id, state })
    }
}

// Callbacks are taken out before firing so the callback body can borrow the
// shared state again without panicking.

pub fn fire_enter_start(transition: &SharedTransition) {
    let mut cb = transition.borrow_mut().enter_start.take();
    if let Some(cb) = cb.as_mut() {
        cb();
    }
    transition.borrow_mut().enter_start = cb;
}

pub fn fire_leave_start(transition: &SharedTransition) {
    let mut cb = transition.borrow_mut().leave_start.take();
    if let Some(cb) = cb.as_mut() {
        cb();
    }
    transition.borrow_mut().leave_start = cb;
}

pub fn fire_enter_end(transition: &SharedTransition, cancelled: bool) {
    let mut cb = transition.borrow_mut().enter_end.take();
    if let Some(cb) = cb.as_mut() {
        cb(cancelled);
    }
    transition.borrow_mut().enter_end = cb;
}

pub fn fire_leave_end(transition: &SharedTransition, cancelled: bool) {
    let mut cb = transition.borrow_mut().leave_end.take();
    if let Some(cb) = cb.as_mut() {
        cb(cancelled);
    }
    transition.borrow_mut().leave_end = cb;
}

/// Minimal stack router: enough semantics to exercise the composition layer.
pub struct MemoryRouter {
    routes: Rc<Vec<Route>>,
    index: usize,
    counter: usize,
}

impl MemoryRouter {
    pub fn new(initial_screen: &str) -> Self {
        let route = Route::new(format!("{initial_screen}-0"), initial_screen);
        Self {
            routes: Rc::new(vec![route]),
            index: 0,
            counter: 1,
        }
    }

    fn fresh_key(&mut self, name: &str) -> String {
        let key = format!("{name}-{}", self.counter);
        self.counter += 1;
        key
    }
}

impl StackRouting for MemoryRouter {
    fn state(&self) -> NavigationState {
        NavigationState {
            routes: Rc::clone(&self.routes),
            index: self.index,
        }
    }

    fn dispatch(&mut self, action: NavAction) -> NavigationState {
        match action {
            NavAction::Push { name, params } => {
                let key = self.fresh_key(&name);
                let mut routes = self.routes.as_slice().to_vec();
                routes.push(Route::new(key, name).with_params(params));
                self.index = routes.len() - 1;
                self.routes = Rc::new(routes);
            }
            NavAction::Pop { count } => {
                let keep = self.routes.len().saturating_sub(count).max(1);
                let mut routes = self.routes.as_slice().to_vec();
                routes.truncate(keep);
                self.index = routes.len() - 1;
                self.routes = Rc::new(routes);
            }
            NavAction::PopToTop => {
                let mut routes = self.routes.as_slice().to_vec();
                routes.truncate(1);
                self.index = 0;
                self.routes = Rc::new(routes);
            }
        }
        self.state()
    }
}
