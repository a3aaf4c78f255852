//! The stack reconciler: derives the rendered route list and transition
//! records from the external navigation state, once per update. Rendering and
//! transition driving both consume the snapshot it produces read-only within
//! the same pass.

use std::rc::Rc;

use crate::{
    descriptor::DescriptorMap,
    error::{MorphstackError, MorphstackResult},
    options::ScreenOptions,
    route::{NavigationState, Route},
    transition::{RouteTransition, RouteTransitions},
};

/// External input for one reconciliation pass.
pub struct NavigationUpdate<C> {
    pub state: NavigationState,
    pub descriptors: Rc<DescriptorMap<C>>,
}

/// The reconciler's own view of the stack after a pass.
#[derive(Debug)]
pub struct StackSnapshot<C> {
    /// Routes actually rendered. May hold routes mid-removal beyond the
    /// external state, or fewer when the external state has forward history.
    pub routes: Vec<Route>,
    /// External route list seen last pass, compared by identity.
    pub previous_routes: Rc<Vec<Route>>,
    /// External descriptor set seen last pass, compared by identity.
    pub previous_descriptors: Rc<DescriptorMap<C>>,
    /// Descriptor lookup covering the rendered routes, retaining entries for
    /// routes the external state no longer carries.
    pub descriptors: DescriptorMap<C>,
}

impl<C> StackSnapshot<C> {
    pub fn empty() -> Self {
        Self {
            routes: Vec::new(),
            previous_routes: Rc::new(Vec::new()),
            previous_descriptors: Rc::new(DescriptorMap::new()),
            descriptors: DescriptorMap::new(),
        }
    }
}

pub struct Reconciler;

impl Reconciler {
    /// Derive the next snapshot from the previous one plus a new external
    /// update.
    ///
    /// Returns `Ok(None)` when nothing changed. Transition records are
    /// created and mutated in place inside `transitions`; an existing record
    /// keeps its engine handle when only its `closing` flag flips.
    #[tracing::instrument(skip_all)]
    pub fn reconcile<C>(
        snapshot: &StackSnapshot<C>,
        transitions: &mut RouteTransitions,
        update: &NavigationUpdate<C>,
    ) -> MorphstackResult<Option<StackSnapshot<C>>> {
        // Fast path: same external route list, so at most descriptors changed.
        if Rc::ptr_eq(&update.state.routes, &snapshot.previous_routes)
            && !snapshot.routes.is_empty()
        {
            if Rc::ptr_eq(&update.descriptors, &snapshot.previous_descriptors) {
                return Ok(None);
            }
            let descriptors =
                merge_descriptors(&snapshot.routes, &update.descriptors, &snapshot.descriptors);
            return Ok(Some(StackSnapshot {
                routes: snapshot.routes.clone(),
                previous_routes: Rc::clone(&snapshot.previous_routes),
                previous_descriptors: Rc::clone(&update.descriptors),
                descriptors,
            }));
        }

        let external = &update.state.routes;

        // A stack with zero routes has no focused screen. Fatal regardless of
        // any closing routes still rendered from earlier passes.
        if external.is_empty() {
            return Err(MorphstackError::invariant(
                "navigation state must contain at least one route",
            ));
        }

        // Drop forward history: the focused route must be the last rendered.
        let mut routes: Vec<Route> = if update.state.index + 1 < external.len() {
            external[..=update.state.index].to_vec()
        } else {
            external.as_slice().to_vec()
        };

        let previous_routes = snapshot.previous_routes.as_slice();
        let previous_focused = previous_routes.last();
        let next_focused = routes.last().cloned();

        let closing_keys: Vec<String> = transitions
            .iter()
            .filter(|(_, t)| t.closing)
            .map(|(key, _)| key.clone())
            .collect();

        match (previous_focused, next_focused) {
            (Some(prev), Some(next)) if prev.key != next.key => {
                if !previous_routes.iter().any(|r| r.key == next.key) {
                    // A new route took focus: a push. A replace lands here too
                    // and animates the same way.
                    tracing::debug!(route = %next.key, from = %prev.key, "push detected");
                    let record = transitions.entry(next.key.clone()).or_insert_with(|| {
                        let next_options = resolve_options(
                            &next.key,
                            &update.descriptors,
                            &snapshot.descriptors,
                            None,
                        );
                        let prev_options = resolve_options(
                            &prev.key,
                            &update.descriptors,
                            &snapshot.descriptors,
                            Some(&snapshot.previous_descriptors),
                        );
                        RouteTransition {
                            scene_id: next_options
                                .scene_id
                                .clone()
                                .unwrap_or_else(|| next.key.clone()),
                            prev_scene_id: next_options
                                .prev_scene_id
                                .clone()
                                .or_else(|| prev_options.scene_id.clone())
                                .unwrap_or_else(|| prev.key.clone()),
                            route: next.clone(),
                            closing: false,
                            handle: None,
                        }
                    });
                    // An in-flight close for this route reverses in place
                    // instead of restarting.
                    record.closing = false;
                } else if !routes.iter().any(|r| r.key == prev.key) {
                    // The focused route left the stack: a pop.
                    tracing::debug!(route = %prev.key, to = %next.key, "pop detected");
                    let record = transitions.entry(prev.key.clone()).or_insert_with(|| {
                        let prev_options = resolve_options(
                            &prev.key,
                            &update.descriptors,
                            &snapshot.descriptors,
                            Some(&snapshot.previous_descriptors),
                        );
                        let next_options = resolve_options(
                            &next.key,
                            &update.descriptors,
                            &snapshot.descriptors,
                            None,
                        );
                        RouteTransition {
                            scene_id: prev_options
                                .scene_id
                                .clone()
                                .unwrap_or_else(|| prev.key.clone()),
                            prev_scene_id: prev_options
                                .prev_scene_id
                                .clone()
                                .or_else(|| next_options.scene_id.clone())
                                .unwrap_or_else(|| next.key.clone()),
                            route: prev.clone(),
                            closing: true,
                            handle: None,
                        }
                    });
                    record.closing = true;
                    // Still rendered while it animates out.
                    routes.push(record.route.clone());
                } else {
                    // The focused route changed but both old and new focus
                    // already existed: a rearrangement. There is no meaningful
                    // scene pair to animate, so the list updates without a
                    // transition.
                    tracing::debug!("focus change without add/remove, not animating");
                }
            }
            _ => {
                if !closing_keys.is_empty() {
                    // Focus is stable; keep routes that are still closing on
                    // screen, stacked just beneath the focused entry.
                    let keep: Vec<Route> = snapshot
                        .routes
                        .iter()
                        .filter(|r| closing_keys.iter().any(|key| *key == r.key))
                        .cloned()
                        .collect();
                    let at = routes.len().saturating_sub(1);
                    for (offset, route) in keep.into_iter().enumerate() {
                        routes.insert(at + offset, route);
                    }
                }
            }
        }

        let descriptors = merge_descriptors(&routes, &update.descriptors, &snapshot.descriptors);

        Ok(Some(StackSnapshot {
            routes,
            previous_routes: Rc::clone(&update.state.routes),
            previous_descriptors: Rc::clone(&update.descriptors),
            descriptors,
        }))
    }
}

/// Descriptor lookup for `routes`, preferring the freshly supplied set and
/// falling back to entries retained from earlier passes.
fn merge_descriptors<C>(
    routes: &[Route],
    current: &DescriptorMap<C>,
    retained: &DescriptorMap<C>,
) -> DescriptorMap<C> {
    routes
        .iter()
        .filter_map(|route| {
            current
                .get(&route.key)
                .or_else(|| retained.get(&route.key))
                .map(|descriptor| (route.key.clone(), Rc::clone(descriptor)))
        })
        .collect()
}

fn resolve_options<C>(
    key: &str,
    current: &DescriptorMap<C>,
    retained: &DescriptorMap<C>,
    previous: Option<&DescriptorMap<C>>,
) -> ScreenOptions {
    current
        .get(key)
        .or_else(|| retained.get(key))
        .or_else(|| previous.and_then(|map| map.get(key)))
        .map(|descriptor| descriptor.options.clone())
        .unwrap_or_default()
}
