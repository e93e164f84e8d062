//! Cancellation and deadlines for a validation call
//!
//! Validation is synchronous and does no I/O, but user rules may be
//! expensive. Every `validate` call takes a [`Context`]; rule chains check it
//! before each rule and struct validators before each field, and user rules
//! can call [`Context::check`] themselves.
//!
//! # Examples
//!
//! ```
//! use fieldwise::{Context, ValidationError};
//!
//! let (ctx, handle) = Context::background().with_cancel();
//! assert!(ctx.check().is_ok());
//!
//! handle.cancel();
//! assert_eq!(ctx.check(), Err(ValidationError::Cancelled));
//! ```

use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use crate::error::ValidationError;

/// Carries cancellation state and an optional deadline into validators.
///
/// Cloning is cheap; clones share the same cancellation token. Contexts
/// derived with [`with_cancel`](Self::with_cancel) are cancelled along with
/// their parent, never the other way round.
#[derive(Debug, Clone, Default)]
pub struct Context {
    cancellation: Option<CancellationToken>,
    deadline: Option<Instant>,
}

impl Context {
    /// A context that is never cancelled and has no deadline.
    pub fn background() -> Self {
        Context::default()
    }

    /// Set an absolute deadline. An earlier existing deadline is kept.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) if existing < deadline => existing,
            _ => deadline,
        });
        self
    }

    /// Set a deadline relative to now.
    ///
    /// # Examples
    ///
    /// ```
    /// use fieldwise::{Context, ValidationError};
    /// use std::time::Duration;
    ///
    /// let ctx = Context::background().with_timeout(Duration::ZERO);
    /// assert_eq!(ctx.check(), Err(ValidationError::DeadlineExceeded));
    /// ```
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Derive a cancellable context and the handle that cancels it.
    ///
    /// If this context was already cancellable, the new one is a child of it:
    /// cancelling the parent also cancels the child, but the returned handle
    /// only cancels the child.
    pub fn with_cancel(mut self) -> (Self, CancelHandle) {
        let token = match &self.cancellation {
            Some(parent) => parent.child_token(),
            None => CancellationToken::new(),
        };
        self.cancellation = Some(token.clone());
        (self, CancelHandle(token))
    }

    /// Observe an externally owned cancellation token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// The deadline, if one was set.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Whether validation should stop.
    pub fn is_done(&self) -> bool {
        self.check().is_err()
    }

    /// Returns the reason validation should stop, if any.
    pub fn check(&self) -> Result<(), ValidationError> {
        if self.is_cancelled() {
            return Err(ValidationError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(ValidationError::DeadlineExceeded),
            _ => Ok(()),
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }
}

/// Cancels the [`Context`] it was created with, every clone of it and
/// every context derived from it.
#[derive(Debug, Clone)]
pub struct CancelHandle(CancellationToken);

impl CancelHandle {
    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.cancel();
    }

    /// Whether cancellation was requested, here or on a parent.
    pub fn is_cancelled(&self) -> bool {
        self.0.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_is_never_done() {
        let ctx = Context::background();
        assert!(!ctx.is_done());
        assert_eq!(ctx.check(), Ok(()));
        assert!(ctx.deadline().is_none());
    }

    #[test]
    fn test_cancel_reaches_clones() {
        let (ctx, handle) = Context::background().with_cancel();
        let clone = ctx.clone();

        handle.cancel();

        assert!(handle.is_cancelled());
        assert_eq!(ctx.check(), Err(ValidationError::Cancelled));
        assert_eq!(clone.check(), Err(ValidationError::Cancelled));
    }

    #[test]
    fn test_expired_deadline() {
        let ctx = Context::background().with_deadline(Instant::now());
        assert_eq!(ctx.check(), Err(ValidationError::DeadlineExceeded));
    }

    #[test]
    fn test_earlier_deadline_wins() {
        let now = Instant::now();
        let early = now + Duration::from_secs(1);
        let late = now + Duration::from_secs(60);

        let ctx = Context::background().with_deadline(early).with_deadline(late);
        assert_eq!(ctx.deadline(), Some(early));
    }

    #[test]
    fn test_cancellation_takes_precedence_over_deadline() {
        let (ctx, handle) = Context::background()
            .with_deadline(Instant::now())
            .with_cancel();
        handle.cancel();

        assert_eq!(ctx.check(), Err(ValidationError::Cancelled));
    }

    #[test]
    fn test_derived_context_inherits_cancelled_state() {
        let (ctx, handle) = Context::background().with_cancel();
        handle.cancel();

        let (derived, _) = ctx.with_cancel();
        assert!(derived.is_done());
    }

    #[test]
    fn test_parent_cancel_reaches_derived_context() {
        let (parent, handle) = Context::background().with_cancel();
        let (child, child_handle) = parent.clone().with_cancel();
        assert_eq!(child.check(), Ok(()));

        handle.cancel();

        assert_eq!(parent.check(), Err(ValidationError::Cancelled));
        assert_eq!(child.check(), Err(ValidationError::Cancelled));
        assert!(child_handle.is_cancelled());
    }

    #[test]
    fn test_child_cancel_leaves_parent_running() {
        let (parent, _handle) = Context::background().with_cancel();
        let (child, child_handle) = parent.clone().with_cancel();

        child_handle.cancel();

        assert_eq!(child.check(), Err(ValidationError::Cancelled));
        assert_eq!(parent.check(), Ok(()));
    }

    #[test]
    fn test_external_token() {
        let token = CancellationToken::new();
        let ctx = Context::background().with_cancellation(token.child_token());
        assert!(!ctx.is_done());

        token.cancel();
        assert_eq!(ctx.check(), Err(ValidationError::Cancelled));
    }
}
