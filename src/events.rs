use std::{cell::RefCell, rc::Rc};

/// Events emitted around a route's transition lifecycle, scoped to the route
/// they belong to.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StackEvent {
    #[serde(rename_all = "camelCase")]
    TransitionStart {
        route_key: String,
        closing: bool,
        /// Animation progress at the time the phase started.
        progress: f64,
    },
    #[serde(rename_all = "camelCase")]
    TransitionEnd {
        route_key: String,
        closing: bool,
        cancelled: bool,
    },
}

impl StackEvent {
    pub fn route_key(&self) -> &str {
        match self {
            Self::TransitionStart { route_key, .. } | Self::TransitionEnd { route_key, .. } => {
                route_key
            }
        }
    }
}

type Listener = Box<dyn FnMut(&StackEvent)>;

/// Single-threaded listener bus. Cloning shares the listener list.
///
/// Listeners must not subscribe further listeners while an event is being
/// delivered.
#[derive(Clone, Default)]
pub struct EventBus {
    listeners: Rc<RefCell<Vec<Listener>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: impl FnMut(&StackEvent) + 'static) {
        self.listeners.borrow_mut().push(Box::new(listener));
    }

    pub fn emit(&self, event: &StackEvent) {
        tracing::trace!(?event, "emitting stack event");
        for listener in self.listeners.borrow_mut().iter_mut() {
            listener(event);
        }
    }
}
