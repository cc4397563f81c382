//! Outbound IRC commands.
//!
//! [`Command`] covers the client-to-server vocabulary this core emits. The
//! `Display` impl produces the exact wire form without a line terminator;
//! CRLF is appended exactly once, at the transport boundary.

use std::fmt;

/// An outbound protocol command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `NICK <nick>`
    Nick(String),
    /// `USER <user> 0 * :<user>`
    User(String),
    /// `PASS <password>`
    Pass(String),
    /// `JOIN <channel>`
    Join(String),
    /// `TOPIC <channel> <topic>`
    Topic {
        /// Target channel.
        channel: String,
        /// New topic text.
        topic: String,
    },
    /// `INVITE <nick> <channel>`
    Invite {
        /// Invited nick.
        nickname: String,
        /// Target channel.
        channel: String,
    },
    /// `PRIVMSG <target> :<text>`
    Privmsg {
        /// Channel or nick the message is for.
        target: String,
        /// One line of message text.
        text: String,
    },
    /// `QUIT` or `QUIT :<message>`
    Quit(Option<String>),
    /// `PONG <daemon>`
    Pong(String),
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Nick(nick) => write!(f, "NICK {}", nick),
            Command::User(user) => write!(f, "USER {} 0 * :{}", user, user),
            Command::Pass(password) => write!(f, "PASS {}", password),
            Command::Join(channel) => write!(f, "JOIN {}", channel),
            Command::Topic { channel, topic } => write!(f, "TOPIC {} {}", channel, topic),
            Command::Invite { nickname, channel } => {
                write!(f, "INVITE {} {}", nickname, channel)
            }
            Command::Privmsg { target, text } => write!(f, "PRIVMSG {} :{}", target, text),
            Command::Quit(None) => write!(f, "QUIT"),
            Command::Quit(Some(message)) => write!(f, "QUIT :{}", message),
            Command::Pong(daemon) => write!(f, "PONG {}", daemon),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_forms() {
        assert_eq!(Command::Nick("alice".into()).to_string(), "NICK alice");
        assert_eq!(
            Command::User("alice".into()).to_string(),
            "USER alice 0 * :alice"
        );
        assert_eq!(Command::Pass("hunter2".into()).to_string(), "PASS hunter2");
        assert_eq!(Command::Join("#test".into()).to_string(), "JOIN #test");
        assert_eq!(
            Command::Topic {
                channel: "#test".into(),
                topic: "release day".into(),
            }
            .to_string(),
            "TOPIC #test release day"
        );
        assert_eq!(
            Command::Invite {
                nickname: "bob".into(),
                channel: "#test".into(),
            }
            .to_string(),
            "INVITE bob #test"
        );
        assert_eq!(
            Command::Privmsg {
                target: "#test".into(),
                text: "hello".into(),
            }
            .to_string(),
            "PRIVMSG #test :hello"
        );
        assert_eq!(Command::Quit(None).to_string(), "QUIT");
        assert_eq!(
            Command::Quit(Some("bye".into())).to_string(),
            "QUIT :bye"
        );
        assert_eq!(
            Command::Pong("irc.example.net".into()).to_string(),
            "PONG irc.example.net"
        );
    }

    #[test]
    fn test_no_line_terminator() {
        let wire = Command::Join("#test".into()).to_string();
        assert!(!wire.ends_with('\r') && !wire.ends_with('\n'));
    }
}
