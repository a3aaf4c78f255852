//! Shared-element stack navigation core.
//!
//! Morphstack sits between an external stack router and a scene-transition
//! engine: each time the navigation state changes it reconciles its own
//! rendered route list (keeping routes alive while they animate out) and
//! drives one shared-element transition per route entering or leaving focus.

#![forbid(unsafe_code)]

pub mod descriptor;
pub mod engine;
pub mod error;
pub mod events;
pub mod navigator;
pub mod options;
pub mod reconcile;
pub mod route;
pub mod scene_stack;
pub mod transition;
pub mod view;

pub use descriptor::{Descriptor, DescriptorMap, RenderFn};
pub use engine::{EndCallback, SceneTransitioner, StartCallback, Transition, TransitionRequest};
pub use error::{MorphstackError, MorphstackResult};
pub use events::{EventBus, StackEvent};
pub use navigator::{NavAction, Navigator, StackRouting};
pub use options::{AnimationKind, ScreenOptions, SpringConfig, TransitionSpec};
pub use reconcile::{NavigationUpdate, Reconciler, StackSnapshot};
pub use route::{NavigationState, Route};
pub use scene_stack::{LayeredHost, SceneFrame, ScenePlan, SceneStack, ScreenHost, ScreenMode};
pub use transition::{RouteTransition, RouteTransitions};
pub use view::StackView;
