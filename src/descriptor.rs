use std::{collections::BTreeMap, fmt, rc::Rc};

use crate::{options::ScreenOptions, route::Route};

/// Render callback producing opaque host scene content for a route.
pub type RenderFn<C> = Rc<dyn Fn(&Route) -> C>;

/// Per-route render callback plus resolved options, supplied by the host each
/// render cycle.
///
/// Descriptors for routes that left the navigation state are retained while
/// the route is still animating out, so options and content stay resolvable
/// until the transition settles.
pub struct Descriptor<C> {
    pub options: ScreenOptions,
    pub render: RenderFn<C>,
}

impl<C> Descriptor<C> {
    pub fn new(options: ScreenOptions, render: impl Fn(&Route) -> C + 'static) -> Self {
        Self {
            options,
            render: Rc::new(render),
        }
    }
}

impl<C> fmt::Debug for Descriptor<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descriptor")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Descriptors keyed by route key. Stable iteration order keeps passes
/// deterministic.
pub type DescriptorMap<C> = BTreeMap<String, Rc<Descriptor<C>>>;
