//! User-visible notices (alerts, confirmations).

/// A message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Confirmation of a completed action.
    Info(String),
    /// A failure the user must acknowledge.
    Error(String),
}

impl Notice {
    /// The message text.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Info(m) | Self::Error(m) => m,
        }
    }
}

/// Presents notices to the user. Blocking hosts may wait for acknowledgement.
pub trait Notifier: Send + Sync {
    /// Show a notice.
    fn notify(&self, notice: Notice);
}
