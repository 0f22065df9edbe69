/// Error raised by a target logger while writing an entry.
///
/// The adapter never passes these on to the code that logged; they only
/// surface when a [`TargetLogger`](crate::target::TargetLogger) is driven
/// directly.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed to write log entry: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "json")]
    #[error("failed to encode log entry: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("log output lock poisoned")]
    Poisoned,
}
