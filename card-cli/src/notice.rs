//! Notices printed to the terminal.

use std::io::Write;

use card_core::{Notice, Notifier};

/// Writes notices to stderr, one per line.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notice: Notice) {
        let mut stderr = std::io::stderr().lock();
        let written = match &notice {
            Notice::Info(message) => writeln!(stderr, "{message}"),
            Notice::Error(message) => writeln!(stderr, "error: {message}"),
        };
        if let Err(err) = written {
            tracing::warn!(error = %err, notice = notice.message(), "could not print notice");
        }
    }
}
