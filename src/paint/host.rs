//! Capabilities the paint session needs from the host map widget.

/// Narrow interface onto the map the tool is attached to.
///
/// The host owns projection and input; the session only asks for the current
/// zoom level, turns its pointer subscription on and off, and suspends map
/// panning while a stroke is being drawn.
pub trait MapHost {
    /// Current map zoom level
    fn zoom(&self) -> i32;

    /// Start delivering pointer down/move/up events to the session
    fn subscribe_pointer(&mut self);

    /// Stop delivering pointer events to the session
    fn unsubscribe_pointer(&mut self);

    /// Enable or disable map panning by drag
    fn set_panning(&mut self, enabled: bool);
}
