/// One-time notifications emitted by the background designer model. Drained
/// exactly once through the store's event channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackgroundsEvent {
    Message(String),
    ThemeGenerated(String),
    GenerationError(String),
}
