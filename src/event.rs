//! Client events and subscription.
//!
//! The dispatcher emits exactly one [`ClientEvent`] per unit of work, from
//! a fixed, closed set of kinds. Subscription is an explicit registry
//! object ([`EventListeners`]) rather than ambient inherited behavior:
//! handlers are registered per [`EventKind`] and fired synchronously, in
//! emission order.

use std::collections::HashMap;

use crate::error::DispatchError;
use crate::line::ParsedLine;
use crate::nick::NickIdentity;

/// The closed set of event kinds a session can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    /// Connection established; always the first event of a session.
    Open,
    /// End-of-names reply: the session has joined a channel.
    Join,
    /// Public message in a channel.
    Message,
    /// Message addressed directly to the session user.
    PrivateMessage,
    /// Public message mentioning the session user.
    Mention,
    /// Any line the dispatcher has no specific handling for.
    OtherMessage,
    /// Server liveness probe.
    Ping,
    /// The session user was kicked from a channel.
    Kick,
    /// The session user was invited to a channel.
    Invite,
    /// Protocol error reply or per-line dispatch failure.
    Error,
}

/// One dispatched event with its payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    /// Connection established. Empty payload.
    Open,
    /// End-of-names: `nickname` joined `channel`.
    Join {
        /// Nick the reply was addressed to.
        nickname: String,
        /// The joined channel, trimmed.
        channel: String,
    },
    /// Public channel message.
    Message {
        /// Identity parsed from the message prefix, if any.
        from: Option<NickIdentity>,
        /// The message text.
        message: String,
    },
    /// Message sent directly to the session user.
    PrivateMessage {
        /// Identity parsed from the message prefix, if any.
        from: Option<NickIdentity>,
        /// The message text.
        message: String,
    },
    /// Public message containing the session username.
    Mention {
        /// Identity parsed from the message prefix, if any.
        from: Option<NickIdentity>,
        /// The message text.
        message: String,
    },
    /// Line with no specific handling, including unparseable lines.
    OtherMessage {
        /// The raw line as received.
        line: String,
        /// The parse result for the line.
        parsed_line: ParsedLine,
    },
    /// PING received; the PONG replies are queued before this event fires.
    Ping {
        /// The daemon tokens from the trailing segment, in order.
        daemons: Vec<String>,
    },
    /// Kicked from a channel.
    Kick {
        /// Identity parsed from the message prefix, if any.
        from: Option<NickIdentity>,
        /// The channel, trimmed.
        channel: String,
    },
    /// Invited to a channel.
    Invite {
        /// Identity parsed from the message prefix, if any.
        from: Option<NickIdentity>,
        /// The channel the invite was issued in, trimmed.
        channel: String,
        /// The channel the invitation is for, trimmed.
        invitation_channel: String,
    },
    /// Protocol error reply or recovered dispatch failure.
    Error {
        /// What went wrong.
        error: DispatchError,
    },
}

impl ClientEvent {
    /// The kind of this event.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            ClientEvent::Open => EventKind::Open,
            ClientEvent::Join { .. } => EventKind::Join,
            ClientEvent::Message { .. } => EventKind::Message,
            ClientEvent::PrivateMessage { .. } => EventKind::PrivateMessage,
            ClientEvent::Mention { .. } => EventKind::Mention,
            ClientEvent::OtherMessage { .. } => EventKind::OtherMessage,
            ClientEvent::Ping { .. } => EventKind::Ping,
            ClientEvent::Kick { .. } => EventKind::Kick,
            ClientEvent::Invite { .. } => EventKind::Invite,
            ClientEvent::Error { .. } => EventKind::Error,
        }
    }
}

/// Event handler callback.
pub type Handler = Box<dyn FnMut(&ClientEvent) + Send>;

/// Subscription surface: register interest in an event kind, deliver an
/// event to whoever registered for its kind.
pub trait Listenable {
    /// Register `handler` for events of `kind`.
    fn subscribe(&mut self, kind: EventKind, handler: Handler);

    /// Deliver `event` to all handlers registered for its kind,
    /// synchronously and in registration order.
    fn fire(&mut self, event: &ClientEvent);
}

/// Handler registry keyed by event kind.
#[derive(Default)]
pub struct EventListeners {
    handlers: HashMap<EventKind, Vec<Handler>>,
}

impl EventListeners {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of handlers registered for `kind`.
    #[must_use]
    pub fn count(&self, kind: EventKind) -> usize {
        self.handlers.get(&kind).map_or(0, Vec::len)
    }
}

impl Listenable for EventListeners {
    fn subscribe(&mut self, kind: EventKind, handler: Handler) {
        self.handlers.entry(kind).or_default().push(handler);
    }

    fn fire(&mut self, event: &ClientEvent) {
        if let Some(handlers) = self.handlers.get_mut(&event.kind()) {
            for handler in handlers {
                handler(event);
            }
        }
    }
}

impl std::fmt::Debug for EventListeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut counts: Vec<_> = self
            .handlers
            .iter()
            .map(|(kind, handlers)| (*kind, handlers.len()))
            .collect();
        counts.sort_by_key(|(kind, _)| format!("{:?}", kind));
        f.debug_struct("EventListeners")
            .field("handlers", &counts)
            .finish()
    }
}
