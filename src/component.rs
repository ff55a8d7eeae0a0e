//! Generic UI component interface.
//!
//! A host shell owns the rendering; components only turn events into state
//! and state into a view model.

pub trait Component {
    type Event;
    type View;

    /// Current view model.
    fn render(&self) -> Self::View;

    /// Apply an event. Returns `true` when the view changed.
    fn update(&mut self, event: Self::Event) -> bool;

    /// Release listeners and state. The component stays usable but empty.
    fn destroy(&mut self);
}
