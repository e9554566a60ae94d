use ratatui::Frame;
use ratatui::layout::Rect;

/// A reusable UI component.
///
/// Components receive external data as props (struct fields) and render into
/// a `Rect` on the frame. `render` takes `&mut self` so stateful components
/// can update scroll offsets or cached layout during the pass, matching
/// Ratatui's `StatefulWidget` shape.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that consumes terminal events and emits higher-level intent.
///
/// The emitted event is the component's whole outward interface: the parent
/// decides what a `Submit` or a `Select` means, the component never reaches
/// into shared state.
pub trait EventHandler {
    /// The type of high-level event this component emits.
    type Event;

    /// Handle a low-level `TuiEvent` and optionally return a high-level event.
    fn handle_event(&mut self, event: &super::event::TuiEvent) -> Option<Self::Event>;
}
