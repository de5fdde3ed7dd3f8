//! User-facing notification side-channel.
//!
//! The view layer surfaces exactly two failures to the user — rejecting a
//! live-view node filter mutation without the override flag, and rejecting a
//! rename to a label containing the path separator. Both go through
//! [`Notifier`] as fire-and-forget calls rather than propagated errors.

/// Fire-and-forget notification sink, typically wired to the host UI.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Default [`Notifier`] that logs notifications at `warn`.
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str) {
        tracing::warn!("{message}");
    }
}
