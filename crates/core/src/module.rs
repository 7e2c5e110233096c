use crate::{gesture::Gesture, widget::StatusWidget};

/// Every bar module (bluetooth, media, …) implements this trait.
///
/// The host calls [`Module::update`] once per poll tick and
/// [`Module::dispatch`] for each input event aimed at the module, always from
/// one thread at a time.  Neither call may fail: transient errors are folded
/// into the widget's unknown state.
pub trait Module: Send + std::fmt::Debug {
    /// Module kind, e.g. `"bluetooth"`.
    fn kind(&self) -> &str;

    /// Unique instance identifier within the bar.
    fn id(&self) -> &str;

    /// Re-query the external source and refresh the widget.
    fn update(&mut self);

    fn widget(&self) -> &StatusWidget;

    fn widget_mut(&mut self) -> &mut StatusWidget;

    /// Status tags used by the host for theming.
    fn state(&self) -> Vec<String> {
        self.widget().state().tags()
    }

    /// Run the action bound to `gesture`; unbound gestures are ignored.
    fn dispatch(&mut self, gesture: Gesture);
}
