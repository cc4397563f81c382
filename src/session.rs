//! Per-connection session state.

/// Mutable state of one IRC connection.
///
/// Owned exclusively by that connection's [`Dispatcher`](crate::Dispatcher)
/// and mutated only by dispatch and by explicit outbound command calls.
/// Because processing is strictly sequential per connection, no locking is
/// needed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionState {
    /// Whether the connection-open signal has been delivered. Flips
    /// false to true exactly once per session, on the first unit of work.
    pub joined: bool,
    /// Username registered for this session. Last write wins.
    pub username: Option<String>,
    /// Channel the session currently considers active. Last write wins;
    /// no history is retained.
    pub channel: Option<String>,
}

impl SessionState {
    /// Fresh state for a new connection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the session username, returning the previous value.
    pub fn set_username(&mut self, username: impl Into<String>) -> Option<String> {
        self.username.replace(username.into())
    }

    /// Record the active channel, returning the previous value.
    pub fn set_channel(&mut self, channel: impl Into<String>) -> Option<String> {
        self.channel.replace(channel.into())
    }
}
