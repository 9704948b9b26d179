//! Network status of the party feed, published to observers.
//!
//! The status is an explicit state machine:
//!
//! - **Idle**: no request in flight
//! - **Loading**: a refresh is running
//! - **Failed**: the last refresh failed, with a reason for display
//!
//! `Idle`/`Failed` may move to `Loading`; only `Loading` may move to
//! `Idle` or `Failed`. Rejected transitions leave the state untouched and
//! notify nobody. Observers hold a `watch::Receiver` from [`NetworkStatus::subscribe`].
//!
//! Requests should hold a [`LoadingGuard`] from [`NetworkStatus::try_begin`]:
//! a guard dropped before it is settled (a cancelled future) marks the
//! status `Failed` with [`CANCELLED_REASON`], so `Loading` is never stranded.

use std::fmt;

use tokio::sync::watch;

/// Failure reason recorded when a request is dropped mid-flight
pub const CANCELLED_REASON: &str = "cancelled";

/// Current state of the party feed connection
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NetworkState {
    #[default]
    Idle,
    Loading,
    Failed(String),
}

impl NetworkState {
    fn can_transition_to(&self, next: &NetworkState) -> bool {
        matches!(
            (self, next),
            (NetworkState::Idle, NetworkState::Loading)
                | (NetworkState::Failed(_), NetworkState::Loading)
                | (NetworkState::Loading, NetworkState::Idle)
                | (NetworkState::Loading, NetworkState::Failed(_))
        )
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, NetworkState::Loading)
    }
}

impl fmt::Display for NetworkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkState::Idle => write!(f, "idle"),
            NetworkState::Loading => write!(f, "loading"),
            NetworkState::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

/// Owner of the network state; share it behind an `Arc`.
pub struct NetworkStatus {
    sender: watch::Sender<NetworkState>,
}

impl NetworkStatus {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(NetworkState::Idle);
        Self { sender }
    }

    pub fn current(&self) -> NetworkState {
        self.sender.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<NetworkState> {
        self.sender.subscribe()
    }

    /// Enter `Loading` and return a guard that settles the request.
    ///
    /// Returns `None` if a refresh is already running.
    pub fn try_begin(&self) -> Option<LoadingGuard<'_>> {
        self.begin_loading().then(|| LoadingGuard {
            status: self,
            settled: false,
        })
    }

    /// Enter `Loading`. Returns false if a refresh is already running.
    pub fn begin_loading(&self) -> bool {
        self.transition(NetworkState::Loading)
    }

    /// Leave `Loading` successfully.
    pub fn finish(&self) -> bool {
        self.transition(NetworkState::Idle)
    }

    /// Leave `Loading` with a failure reason.
    pub fn fail(&self, reason: impl Into<String>) -> bool {
        self.transition(NetworkState::Failed(reason.into()))
    }

    fn transition(&self, next: NetworkState) -> bool {
        let applied = self.sender.send_if_modified(|state| {
            if state.can_transition_to(&next) {
                *state = next.clone();
                true
            } else {
                false
            }
        });

        if applied {
            tracing::debug!(state = %next, "Network state changed");
        } else {
            tracing::warn!(
                current = %self.current(),
                requested = %next,
                "Rejected network state transition"
            );
        }
        applied
    }
}

impl Default for NetworkStatus {
    fn default() -> Self {
        Self::new()
    }
}

/// An in-flight request holding the status in `Loading`.
#[must_use = "dropping the guard immediately marks the request cancelled"]
pub struct LoadingGuard<'a> {
    status: &'a NetworkStatus,
    settled: bool,
}

impl LoadingGuard<'_> {
    pub fn finish(mut self) {
        self.settled = true;
        self.status.finish();
    }

    pub fn fail(mut self, reason: impl Into<String>) {
        self.settled = true;
        self.status.fail(reason);
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            tracing::warn!("Request dropped while loading");
            self.status.fail(CANCELLED_REASON);
        }
    }
}
