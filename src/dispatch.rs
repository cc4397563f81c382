//! Sans-IO per-line dispatch engine.
//!
//! The dispatcher consumes one raw wire line per unit of work and produces
//! a [`Dispatch`]: zero or more immediate protocol replies (PONG) plus
//! exactly one [`ClientEvent`]. It performs no I/O of its own; the caller
//! writes the replies before delivering the event to subscribers.
//!
//! Nothing in the per-line path can terminate the processing loop: every
//! branching failure is converted into an `error` event and the next line
//! is processed independently.
//!
//! # Example
//!
//! ```
//! use irclet::{ClientEvent, Command, Dispatcher};
//!
//! let mut dispatcher = Dispatcher::new();
//!
//! // The first unit of work is always `open`, consuming no wire bytes.
//! let open = dispatcher.open();
//! assert_eq!(open.event, ClientEvent::Open);
//!
//! // Subsequent lines are parsed and dispatched.
//! let ping = dispatcher.feed("PING :irc.example.net");
//! assert_eq!(ping.replies, vec![Command::Pong("irc.example.net".to_string())]);
//! assert!(matches!(ping.event, ClientEvent::Ping { .. }));
//! ```

use crate::command::Command;
use crate::error::DispatchError;
use crate::event::ClientEvent;
use crate::line::ParsedLine;
use crate::nick::NickIdentity;
use crate::session::SessionState;

/// End-of-names numeric reply (RPL_ENDOFNAMES).
const RPL_ENDOFNAMES: u16 = 366;

/// The outcome of one unit of work.
///
/// `replies` must reach the wire before `event` reaches subscribers.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    /// Immediate protocol replies, in send order.
    pub replies: Vec<Command>,
    /// The one event this unit of work produced.
    pub event: ClientEvent,
}

impl Dispatch {
    fn event(event: ClientEvent) -> Self {
        Dispatch {
            replies: Vec::new(),
            event,
        }
    }
}

/// Per-connection dispatch state machine.
///
/// Owns the connection's [`SessionState`]; processing is strictly
/// sequential, one line to completion before the next.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    session: SessionState,
}

impl Dispatcher {
    /// A dispatcher for a fresh connection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current session state.
    #[must_use]
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub(crate) fn session_mut(&mut self) -> &mut SessionState {
        &mut self.session
    }

    /// The first unit of work for a connection: marks the session joined
    /// and emits `open`. Consumes no wire bytes.
    pub fn open(&mut self) -> Dispatch {
        self.session.joined = true;
        Dispatch::event(ClientEvent::Open)
    }

    /// Process one raw line (terminator already stripped).
    ///
    /// On a fresh session this behaves as [`open`](Self::open) and does
    /// not parse the line: the connection-open signal is delivered
    /// in-band as the first unit of work. Never fails; failures inside
    /// the branch logic come back as an `error` event.
    pub fn feed(&mut self, line: &str) -> Dispatch {
        if !self.session.joined {
            return self.open();
        }

        let parsed = ParsedLine::parse(line);
        match self.branch(line, &parsed) {
            Ok(dispatch) => dispatch,
            Err(error) => Dispatch::event(ClientEvent::Error { error }),
        }
    }

    fn branch(&mut self, line: &str, parsed: &ParsedLine) -> Result<Dispatch, DispatchError> {
        if parsed.numeric() == Some(RPL_ENDOFNAMES) {
            return self.on_end_of_names(parsed);
        }

        match parsed.command.as_deref() {
            Some("PRIVMSG") => self.on_privmsg(parsed),
            Some("PING") => on_ping(parsed),
            Some("KICK") => self.on_kick(parsed),
            Some("INVITE") => self.on_invite(parsed),
            _ => {
                if let Some(code) = parsed.numeric().filter(|c| (400..=599).contains(c)) {
                    return Err(DispatchError::ErrorReply { code });
                }

                Ok(Dispatch::event(ClientEvent::OtherMessage {
                    line: line.to_string(),
                    parsed_line: parsed.clone(),
                }))
            }
        }
    }

    /// 366: `<nickname> <channel>` in the middle; the session has joined.
    fn on_end_of_names(&mut self, parsed: &ParsedLine) -> Result<Dispatch, DispatchError> {
        let middle = require_middle(parsed, "366")?;
        let (nickname, channel) =
            middle
                .split_once(' ')
                .ok_or_else(|| DispatchError::MalformedMiddle {
                    command: "366".to_string(),
                    middle: middle.to_string(),
                })?;

        let channel = channel.trim();
        self.session.set_channel(channel);

        Ok(Dispatch::event(ClientEvent::Join {
            nickname: nickname.to_string(),
            channel: channel.to_string(),
        }))
    }

    /// PRIVMSG: route to private-message, mention, or message.
    fn on_privmsg(&mut self, parsed: &ParsedLine) -> Result<Dispatch, DispatchError> {
        let target = require_middle(parsed, "PRIVMSG")?.trim().to_string();
        let message = require_trailing(parsed, "PRIVMSG")?.to_string();
        let from = identity_of(parsed);
        let username = self.session.username.clone();

        let event = match username.as_deref() {
            Some(username) if username == target => {
                ClientEvent::PrivateMessage { from, message }
            }
            Some(username) if message.contains(username) => {
                self.session.set_channel(target);
                ClientEvent::Mention { from, message }
            }
            _ => {
                self.session.set_channel(target);
                ClientEvent::Message { from, message }
            }
        };

        Ok(Dispatch::event(event))
    }

    /// KICK: the middle's first token is the channel.
    fn on_kick(&mut self, parsed: &ParsedLine) -> Result<Dispatch, DispatchError> {
        let channel = first_token(require_middle(parsed, "KICK")?).to_string();
        self.session.set_channel(channel.clone());

        Ok(Dispatch::event(ClientEvent::Kick {
            from: identity_of(parsed),
            channel,
        }))
    }

    /// INVITE: the middle's first token is the channel, the trailing is
    /// the channel the invitation is for.
    fn on_invite(&mut self, parsed: &ParsedLine) -> Result<Dispatch, DispatchError> {
        let channel = first_token(require_middle(parsed, "INVITE")?).to_string();
        let invitation_channel = require_trailing(parsed, "INVITE")?.trim().to_string();
        self.session.set_channel(channel.clone());

        Ok(Dispatch::event(ClientEvent::Invite {
            from: identity_of(parsed),
            channel,
            invitation_channel,
        }))
    }
}

/// PING: reply `PONG <daemon>` for the first one or two daemon tokens,
/// before the `ping` event fires.
fn on_ping(parsed: &ParsedLine) -> Result<Dispatch, DispatchError> {
    let trailing = require_trailing(parsed, "PING")?;
    let daemons: Vec<String> = trailing.split_whitespace().map(str::to_string).collect();
    if daemons.is_empty() {
        return Err(DispatchError::MissingTrailing {
            command: "PING".to_string(),
        });
    }

    let replies = daemons
        .iter()
        .take(2)
        .map(|daemon| Command::Pong(daemon.clone()))
        .collect();

    Ok(Dispatch {
        replies,
        event: ClientEvent::Ping { daemons },
    })
}

fn identity_of(parsed: &ParsedLine) -> Option<NickIdentity> {
    parsed.prefix.as_deref().and_then(NickIdentity::parse)
}

fn first_token(middle: &str) -> &str {
    middle.split(' ').next().unwrap_or(middle).trim()
}

fn require_middle<'a>(parsed: &'a ParsedLine, command: &str) -> Result<&'a str, DispatchError> {
    parsed
        .middle
        .as_deref()
        .ok_or_else(|| DispatchError::MissingMiddle {
            command: command.to_string(),
        })
}

fn require_trailing<'a>(parsed: &'a ParsedLine, command: &str) -> Result<&'a str, DispatchError> {
    parsed
        .trailing
        .as_deref()
        .ok_or_else(|| DispatchError::MissingTrailing {
            command: command.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DispatchError;
    use crate::event::EventKind;

    fn joined() -> Dispatcher {
        let mut dispatcher = Dispatcher::new();
        let _ = dispatcher.open();
        dispatcher
    }

    #[test]
    fn test_first_unit_of_work_is_open() {
        let mut dispatcher = Dispatcher::new();
        assert!(!dispatcher.session().joined);

        let dispatch = dispatcher.open();
        assert_eq!(dispatch.event, ClientEvent::Open);
        assert!(dispatch.replies.is_empty());
        assert!(dispatcher.session().joined);
    }

    #[test]
    fn test_feed_on_fresh_session_opens_without_parsing() {
        let mut dispatcher = Dispatcher::new();
        let dispatch = dispatcher.feed(":server 404 nick :No such channel");
        assert_eq!(dispatch.event, ClientEvent::Open);
        assert!(dispatcher.session().joined);
    }

    #[test]
    fn test_end_of_names_sets_channel_and_emits_join() {
        let mut dispatcher = joined();
        let dispatch = dispatcher.feed(":server 366 alice #test :End of /NAMES list.");

        assert_eq!(
            dispatch.event,
            ClientEvent::Join {
                nickname: "alice".to_string(),
                channel: "#test".to_string(),
            }
        );
        assert_eq!(dispatcher.session().channel.as_deref(), Some("#test"));
    }

    #[test]
    fn test_end_of_names_without_space_is_an_error_event() {
        let mut dispatcher = joined();
        let dispatch = dispatcher.feed(":server 366 loneword");
        assert_eq!(dispatch.event.kind(), EventKind::Error);
        assert!(dispatcher.session().channel.is_none());
    }

    #[test]
    fn test_privmsg_public_message_updates_channel() {
        let mut dispatcher = joined();
        dispatcher.session_mut().set_username("alice");

        let dispatch = dispatcher.feed(":bob!b@h PRIVMSG #test :good morning");
        match dispatch.event {
            ClientEvent::Message { from, message } => {
                assert_eq!(from.unwrap().nick, "bob");
                assert_eq!(message, "good morning");
            }
            other => panic!("expected Message, got {:?}", other),
        }
        assert_eq!(dispatcher.session().channel.as_deref(), Some("#test"));
    }

    #[test]
    fn test_privmsg_to_username_is_private_without_channel_update() {
        let mut dispatcher = joined();
        dispatcher.session_mut().set_username("alice");

        let dispatch = dispatcher.feed(":bob!b@h PRIVMSG alice :psst");
        assert_eq!(dispatch.event.kind(), EventKind::PrivateMessage);
        assert!(dispatcher.session().channel.is_none());
    }

    #[test]
    fn test_privmsg_containing_username_is_mention() {
        let mut dispatcher = joined();
        dispatcher.session_mut().set_username("alice");

        let dispatch = dispatcher.feed(":bob!b@h PRIVMSG #test :alice: lunch?");
        assert_eq!(dispatch.event.kind(), EventKind::Mention);
        assert_eq!(dispatcher.session().channel.as_deref(), Some("#test"));
    }

    #[test]
    fn test_privmsg_without_username_is_public() {
        let mut dispatcher = joined();
        let dispatch = dispatcher.feed(":bob!b@h PRIVMSG #test :hi alice");
        assert_eq!(dispatch.event.kind(), EventKind::Message);
    }

    #[test]
    fn test_privmsg_with_unparseable_prefix_still_dispatches() {
        let mut dispatcher = joined();
        let dispatch = dispatcher.feed(":!bad@ PRIVMSG #test :hello");
        match dispatch.event {
            ClientEvent::Message { from, .. } => assert!(from.is_none()),
            other => panic!("expected Message, got {:?}", other),
        }
    }

    #[test]
    fn test_ping_single_daemon_one_pong() {
        let mut dispatcher = joined();
        let dispatch = dispatcher.feed("PING :irc.example.net");

        assert_eq!(
            dispatch.replies,
            vec![Command::Pong("irc.example.net".to_string())]
        );
        assert_eq!(
            dispatch.event,
            ClientEvent::Ping {
                daemons: vec!["irc.example.net".to_string()],
            }
        );
    }

    #[test]
    fn test_ping_two_daemons_two_pongs_in_order() {
        let mut dispatcher = joined();
        let dispatch = dispatcher.feed("PING :one.example.net two.example.net");

        assert_eq!(
            dispatch.replies,
            vec![
                Command::Pong("one.example.net".to_string()),
                Command::Pong("two.example.net".to_string()),
            ]
        );
    }

    #[test]
    fn test_ping_without_trailing_is_an_error_event() {
        let mut dispatcher = joined();
        let dispatch = dispatcher.feed("PING");
        assert_eq!(dispatch.event.kind(), EventKind::Error);
        assert!(dispatch.replies.is_empty());
    }

    #[test]
    fn test_kick_sets_channel() {
        let mut dispatcher = joined();
        let dispatch = dispatcher.feed(":op!o@h KICK #test alice :flooding");

        match dispatch.event {
            ClientEvent::Kick { from, channel } => {
                assert_eq!(from.unwrap().nick, "op");
                assert_eq!(channel, "#test");
            }
            other => panic!("expected Kick, got {:?}", other),
        }
        assert_eq!(dispatcher.session().channel.as_deref(), Some("#test"));
    }

    #[test]
    fn test_invite_carries_both_channels() {
        let mut dispatcher = joined();
        let dispatch = dispatcher.feed(":bob!b@h INVITE alice :#party");

        match dispatch.event {
            ClientEvent::Invite {
                channel,
                invitation_channel,
                ..
            } => {
                assert_eq!(channel, "alice");
                assert_eq!(invitation_channel, "#party");
            }
            other => panic!("expected Invite, got {:?}", other),
        }
    }

    #[test]
    fn test_error_reply_range() {
        let mut dispatcher = joined();
        for code in [400u16, 404, 433, 599] {
            let dispatch = dispatcher.feed(&format!(":server {} nick :oops", code));
            assert_eq!(
                dispatch.event,
                ClientEvent::Error {
                    error: DispatchError::ErrorReply { code },
                }
            );
        }
        // No state mutation on error replies.
        assert!(dispatcher.session().channel.is_none());
    }

    #[test]
    fn test_numerics_outside_error_range_are_other_messages() {
        let mut dispatcher = joined();
        for line in [":server 001 nick :Welcome", ":server 372 nick :- motd"] {
            let dispatch = dispatcher.feed(line);
            assert_eq!(dispatch.event.kind(), EventKind::OtherMessage);
        }
        let dispatch = dispatcher.feed(":server 600 nick :not an error reply");
        assert_eq!(dispatch.event.kind(), EventKind::OtherMessage);
    }

    #[test]
    fn test_unparseable_line_is_other_message() {
        let mut dispatcher = joined();
        let dispatch = dispatcher.feed("   ");
        match dispatch.event {
            ClientEvent::OtherMessage { line, parsed_line } => {
                assert_eq!(line, "   ");
                assert!(parsed_line.command.is_none());
            }
            other => panic!("expected OtherMessage, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_line_never_terminates_the_session() {
        let mut dispatcher = joined();
        let _ = dispatcher.feed(":server 366 mangled");
        let dispatch = dispatcher.feed("PING :still.alive");
        assert_eq!(dispatch.event.kind(), EventKind::Ping);
    }
}
