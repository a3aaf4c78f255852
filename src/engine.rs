//! Seam to the external scene-transition engine, the collaborator that
//! actually morphs shared elements between two scenes.

use crate::options::SpringConfig;

/// Fired when a transition's enter or leave phase begins.
pub type StartCallback = Box<dyn FnMut()>;

/// Fired when a transition's enter or leave phase ends. The argument is
/// `true` when the transition was cancelled rather than run to completion.
pub type EndCallback = Box<dyn FnMut(bool)>;

/// Request for a shared-element transition between two scene groups.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionRequest {
    pub from_id: String,
    pub to_id: String,
    /// Spring parameters; `None` leaves the engine default in place.
    pub spring: Option<SpringConfig>,
}

/// A live transition handle.
///
/// Lifecycle callbacks are invoked by the engine's own frame scheduler, never
/// synchronously from inside [`SceneTransitioner::create_transition`],
/// [`Transition::cancel`] or [`Transition::resume`]; morphstack relies on
/// that to keep its single-threaded state consistent.
pub trait Transition {
    /// Scene id this transition originally started from.
    fn from_id(&self) -> &str;

    /// Current animation progress in `0..=1`, usable by consumers for custom
    /// animation on top of the shared-element morph.
    fn progress(&self) -> f64;

    fn on_enter_start(&mut self, cb: StartCallback);
    fn on_enter_end(&mut self, cb: EndCallback);
    fn on_leave_start(&mut self, cb: StartCallback);
    fn on_leave_end(&mut self, cb: EndCallback);

    /// Reverse the transition back to its starting point.
    fn cancel(&mut self);

    /// Advance the transition toward its target. This is the engine's
    /// "continue" control; renamed because `continue` is a Rust keyword.
    fn resume(&mut self);
}

/// Creates transitions between shared-element scene groups.
pub trait SceneTransitioner {
    fn create_transition(&mut self, request: TransitionRequest) -> Box<dyn Transition>;
}
