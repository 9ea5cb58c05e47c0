//! Cancellation and deadline carrier threaded through API calls.

use crate::error::{CancelReason, Result, UpdaterError};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

/// Execution context for calls made on behalf of an [`Updater`](crate::Updater).
///
/// Cheap to clone; clones observe the same cancellation. Derived contexts
/// are cancelled whenever their parent is, and never outlive the parent's
/// deadline.
#[derive(Debug, Clone)]
pub struct ApiContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl ApiContext {
    /// A context that is never cancelled and has no deadline.
    pub fn background() -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: None,
        }
    }

    /// Derives a context together with the token that cancels it (and every
    /// context derived from it later).
    pub fn with_cancel(&self) -> (Self, CancellationToken) {
        let child = self.derive(self.deadline);
        let token = child.token.clone();
        (child, token)
    }

    pub fn with_timeout(&self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(&self, deadline: Instant) -> Self {
        let deadline = match self.deadline {
            Some(parent) if parent < deadline => parent,
            _ => deadline,
        };
        self.derive(Some(deadline))
    }

    fn derive(&self, deadline: Option<Instant>) -> Self {
        Self {
            token: self.token.child_token(),
            deadline,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the deadline; `None` when there is no deadline.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(Instant::now()))
    }

    pub fn is_cancelled(&self) -> bool {
        self.err().is_some()
    }

    /// Why the context is done, if it is.
    pub fn err(&self) -> Option<CancelReason> {
        if self.token.is_cancelled() {
            return Some(CancelReason::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(CancelReason::DeadlineExceeded),
            _ => None,
        }
    }

    /// Returns [`UpdaterError::Cancelled`] once the context is cancelled or past its deadline.
    /// Call before and between network round trips.
    pub fn check(&self) -> Result<()> {
        match self.err() {
            Some(reason) => Err(UpdaterError::Cancelled(reason)),
            None => Ok(()),
        }
    }
}

impl Default for ApiContext {
    fn default() -> Self {
        Self::background()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_is_never_done() {
        let ctx = ApiContext::background();
        assert!(!ctx.is_cancelled());
        assert!(ctx.deadline().is_none());
        assert!(ctx.remaining().is_none());
        assert!(ctx.check().is_ok());
    }

    #[test]
    fn cancel_reaches_clones_and_children() {
        let (ctx, cancel) = ApiContext::background().with_cancel();
        let clone = ctx.clone();
        let child = ctx.with_timeout(Duration::from_secs(60));

        cancel.cancel();

        assert!(clone.is_cancelled());
        assert!(child.is_cancelled());
        let err = child.check().unwrap_err();
        assert!(err.is_cancelled());
        assert!(matches!(err, UpdaterError::Cancelled(CancelReason::Cancelled)));
    }

    #[test]
    fn cancelling_child_leaves_parent_running() {
        let parent = ApiContext::background();
        let (child, cancel) = parent.with_cancel();
        cancel.cancel();
        assert!(child.is_cancelled());
        assert!(!parent.is_cancelled());
    }

    #[test]
    fn cancellation_reaches_every_generation() {
        let (root, cancel) = ApiContext::background().with_cancel();
        let grandchild = root
            .with_timeout(Duration::from_secs(60))
            .with_cancel()
            .0
            .with_timeout(Duration::from_secs(30));
        assert!(!grandchild.is_cancelled());

        cancel.cancel();
        assert_eq!(grandchild.err(), Some(CancelReason::Cancelled));
    }

    #[test]
    fn expired_deadline_reports_deadline_exceeded() {
        let ctx = ApiContext::background().with_deadline(Instant::now());
        assert_eq!(ctx.err(), Some(CancelReason::DeadlineExceeded));
        assert_eq!(ctx.remaining(), Some(Duration::ZERO));
        assert_eq!(
            ctx.check().unwrap_err().to_string(),
            "context deadline exceeded"
        );
    }

    #[test]
    fn child_keeps_earlier_parent_deadline() {
        let parent = ApiContext::background().with_timeout(Duration::from_secs(5));
        let child = parent.with_timeout(Duration::from_secs(3600));
        assert_eq!(child.deadline(), parent.deadline());

        let (cancellable, _) = parent.with_cancel();
        assert_eq!(cancellable.deadline(), parent.deadline());
    }
}
