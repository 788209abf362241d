//! Refresh eligibility of expired tokens.
//!
//! The window is measured from the token's original issue time, not from
//! its latest refresh, so a session can be silently renewed for at most
//! one window after the user last authenticated.

use std::time::Duration;

use super::claims_policy::seconds;

/// Outcome of a refresh decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefreshState {
    /// No refresh window is configured, or the token carries no issue time
    NotRefreshable,
    /// Issue time lies within `[now - window, now]`
    Refreshable,
    /// Issue time is older than the window; the user must re-authenticate
    RefreshExpired,
}

impl RefreshState {
    pub fn is_refreshable(&self) -> bool {
        matches!(self, RefreshState::Refreshable)
    }
}

/// Decides whether an (expired) token may be renewed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshPolicy {
    window: Option<Duration>,
}

impl RefreshPolicy {
    /// `window` of `None` disables refresh entirely
    pub fn new(window: Option<Duration>) -> Self {
        Self { window }
    }

    pub fn window(&self) -> Option<Duration> {
        self.window
    }

    /// Classifies a token by its issue time. The lower bound is inclusive.
    pub fn evaluate(&self, issued_at: Option<i64>, now: i64) -> RefreshState {
        let (Some(window), Some(issued_at)) = (self.window, issued_at) else {
            return RefreshState::NotRefreshable;
        };

        let earliest_refreshable_issue_time = now.saturating_sub(seconds(window));
        if issued_at >= earliest_refreshable_issue_time {
            RefreshState::Refreshable
        } else {
            RefreshState::RefreshExpired
        }
    }
}
