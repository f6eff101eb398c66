//! Cancellable context passed to long running operations

use std::{
    fmt::{Display, Formatter},
    time::Duration,
};

#[cfg(test)]
use mock_instant::Instant;
#[cfg(not(test))]
use std::time::Instant;

use tokio_util::sync::CancellationToken;

/// Cancellation token with an optional deadline. Cancelling a context cancels all contexts derived from it, but
/// never its parent.
#[derive(Clone, Debug)]
pub struct Context {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl Context {
    /// Root context, only done when cancelled explicitly
    pub fn background() -> Self {
        Context {
            token: CancellationToken::new(),
            deadline: None,
        }
    }

    pub fn child(&self) -> Self {
        Context {
            token: self.token.child_token(),
            deadline: self.deadline,
        }
    }

    /// Derived context which also expires after `timeout`. The parent's deadline is kept if it comes first.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        let deadline = Instant::now() + timeout;
        Context {
            token: self.token.child_token(),
            deadline: Some(match self.deadline {
                Some(parent) if parent < deadline => parent,
                _ => deadline,
            }),
        }
    }

    pub fn cancel(&self) {
        self.token.cancel()
    }

    pub fn err(&self) -> Option<ContextError> {
        if self.token.is_cancelled() {
            Some(ContextError::Canceled)
        } else if self.deadline.is_some_and(|d| Instant::now() >= d) {
            Some(ContextError::DeadlineExceeded)
        } else {
            None
        }
    }

    pub fn is_done(&self) -> bool {
        self.err().is_some()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContextError {
    Canceled,
    DeadlineExceeded,
}

impl Display for ContextError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ContextError::Canceled => write!(f, "context canceled"),
            ContextError::DeadlineExceeded => write!(f, "context deadline exceeded"),
        }
    }
}

impl std::error::Error for ContextError {}

#[cfg(test)]
mod tests {
    use super::*;
    use mock_instant::MockClock;

    #[test]
    fn background_context_is_not_done() {
        let ctx = Context::background();

        assert_eq!(ctx.err(), None);
        assert!(!ctx.is_done());
    }

    #[test]
    fn cancel_parent_cancels_child() {
        let parent = Context::background();
        let child = parent.child();

        parent.cancel();

        assert_eq!(child.err(), Some(ContextError::Canceled));
    }

    #[test]
    fn cancel_child_does_not_cancel_parent() {
        let parent = Context::background();
        let child = parent.with_timeout(Duration::from_secs(60));

        child.cancel();

        assert!(child.is_done());
        assert!(!parent.is_done());
    }

    #[test]
    fn with_timeout_expires_after_deadline_and_cancel_takes_precedence() {
        let parent = Context::background();
        let ctx = parent.with_timeout(Duration::from_secs(5));
        assert_eq!(ctx.err(), None);

        MockClock::advance(Duration::from_secs(5));

        assert_eq!(ctx.err(), Some(ContextError::DeadlineExceeded));
        assert_eq!(parent.err(), None);

        parent.cancel();

        assert_eq!(ctx.err(), Some(ContextError::Canceled));
    }

    #[test]
    fn with_timeout_keeps_earlier_parent_deadline() {
        let parent = Context::background().with_timeout(Duration::from_secs(1));

        let child = parent.with_timeout(Duration::from_secs(3600));

        assert_eq!(child.deadline, parent.deadline);
    }

    #[test]
    fn context_error_display() {
        assert_eq!(ContextError::Canceled.to_string(), "context canceled");
        assert_eq!(
            ContextError::DeadlineExceeded.to_string(),
            "context deadline exceeded"
        );
    }
}
