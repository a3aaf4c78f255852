use std::rc::Rc;

/// A logical screen instance. Owned by the external router; morphstack only
/// references it and never mutates it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Route {
    /// Unique, stable per screen instance.
    pub key: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub params: serde_json::Value,
}

impl Route {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            params: serde_json::Value::Null,
        }
    }

    pub fn with_params(mut self, params: serde_json::Value) -> Self {
        self.params = params;
        self
    }
}

/// Navigation state produced by the external router: an ordered route list
/// plus the focused index.
///
/// The route list is behind an `Rc` on purpose: the reconciler compares it by
/// identity (`Rc::ptr_eq`) to skip passes where nothing changed, so routers
/// must hand out the same allocation until the list actually changes.
#[derive(Clone, Debug)]
pub struct NavigationState {
    pub routes: Rc<Vec<Route>>,
    pub index: usize,
}

impl NavigationState {
    pub fn new(routes: Vec<Route>, index: usize) -> Self {
        Self {
            routes: Rc::new(routes),
            index,
        }
    }

    /// The route currently on screen per the focused index.
    pub fn focused(&self) -> Option<&Route> {
        self.routes.get(self.index)
    }
}
