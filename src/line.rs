//! Raw IRC line parsing.
//!
//! One wire line (terminator already stripped) is split into an optional
//! prefix, a command token, optional middle parameters, and an optional
//! trailing segment:
//!
//! ```text
//! [:prefix] <command> [middle...] [:trailing]
//! ```
//!
//! A line with no recognizable command is not an error: it parses to a
//! [`ParsedLine`] with `command: None` and is routed to the
//! `other-message` path by the dispatcher.

use nom::{
    bytes::complete::take_while1,
    character::complete::{char, multispace1},
    combinator::opt,
    sequence::{preceded, terminated},
    IResult,
};

/// Parse the `:prefix ` head: everything after `:` up to the next
/// whitespace run, which is consumed as well.
fn parse_prefix(input: &str) -> IResult<&str, &str> {
    preceded(
        char(':'),
        terminated(take_while1(|c: char| !c.is_whitespace()), multispace1),
    )(input)
}

/// Parse the command token (non-whitespace run).
fn parse_command(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_whitespace())(input)
}

/// One parsed wire line.
///
/// `middle` is kept exactly as received (including any whitespace before
/// the trailing colon); consumers trim where the protocol calls for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    /// Origin prefix, without the leading `:`.
    pub prefix: Option<String>,
    /// Command token: a textual command such as `PRIVMSG`, or a 3-digit
    /// numeric reply code. `None` when the line is unparseable.
    pub command: Option<String>,
    /// Middle parameters: everything between the command and the trailing
    /// colon (or end of line), whitespace preserved.
    pub middle: Option<String>,
    /// Trailing segment, without the introducing `:` and with leading
    /// whitespace after the colon skipped. May contain spaces and colons.
    pub trailing: Option<String>,
}

impl ParsedLine {
    /// Parse one raw line.
    ///
    /// Never fails: a line without a command token yields a `ParsedLine`
    /// whose fields are all `None`.
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let (rest, prefix) = match opt(parse_prefix)(line) {
            Ok((rest, prefix)) => (rest, prefix),
            Err(_) => (line, None),
        };

        // A leading colon that did not form a `:prefix ` head cannot start
        // a command token.
        if prefix.is_none() && rest.starts_with(':') {
            return ParsedLine {
                prefix: None,
                command: None,
                middle: None,
                trailing: None,
            };
        }

        let (rest, command) = match parse_command(rest) {
            Ok((rest, command)) => (rest, Some(command)),
            Err(_) => {
                return ParsedLine {
                    prefix: None,
                    command: None,
                    middle: None,
                    trailing: None,
                }
            }
        };

        let params = rest.trim_start();
        let (middle, trailing) = match params.find(':') {
            Some(idx) => {
                let middle = &params[..idx];
                let trailing = params[idx + 1..].trim_start();
                (non_empty(middle), non_empty(trailing))
            }
            None => (non_empty(params), None),
        };

        ParsedLine {
            prefix: prefix.map(str::to_string),
            command: command.map(str::to_string),
            middle: middle.map(str::to_string),
            trailing: trailing.map(str::to_string),
        }
    }

    /// The command parsed as a 3-digit numeric reply code, if it is one.
    #[must_use]
    pub fn numeric(&self) -> Option<u16> {
        let command = self.command.as_deref()?;
        if command.len() == 3 && command.bytes().all(|b| b.is_ascii_digit()) {
            command.parse().ok()
        } else {
            None
        }
    }
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_command() {
        let line = ParsedLine::parse("PING");
        assert_eq!(line.command.as_deref(), Some("PING"));
        assert!(line.prefix.is_none());
        assert!(line.middle.is_none());
        assert!(line.trailing.is_none());
    }

    #[test]
    fn test_parse_with_prefix_and_trailing() {
        let line = ParsedLine::parse(":nick!user@host PRIVMSG #channel :Hello, world!");
        assert_eq!(line.prefix.as_deref(), Some("nick!user@host"));
        assert_eq!(line.command.as_deref(), Some("PRIVMSG"));
        assert_eq!(line.middle.as_deref(), Some("#channel "));
        assert_eq!(line.trailing.as_deref(), Some("Hello, world!"));
    }

    #[test]
    fn test_parse_numeric_reply() {
        let line = ParsedLine::parse(":server 366 nick #test :End of /NAMES list.");
        assert_eq!(line.prefix.as_deref(), Some("server"));
        assert_eq!(line.command.as_deref(), Some("366"));
        assert_eq!(line.middle.as_deref(), Some("nick #test "));
        assert_eq!(line.trailing.as_deref(), Some("End of /NAMES list."));
        assert_eq!(line.numeric(), Some(366));
    }

    #[test]
    fn test_parse_trailing_only() {
        let line = ParsedLine::parse("PING :irc.example.net");
        assert_eq!(line.command.as_deref(), Some("PING"));
        assert!(line.middle.is_none());
        assert_eq!(line.trailing.as_deref(), Some("irc.example.net"));
    }

    #[test]
    fn test_parse_trailing_contains_colons_and_spaces() {
        let line = ParsedLine::parse(":srv PRIVMSG #ch :see: http://example.net today");
        assert_eq!(line.trailing.as_deref(), Some("see: http://example.net today"));
    }

    #[test]
    fn test_parse_middle_without_trailing() {
        let line = ParsedLine::parse("JOIN #test");
        assert_eq!(line.command.as_deref(), Some("JOIN"));
        assert_eq!(line.middle.as_deref(), Some("#test"));
        assert!(line.trailing.is_none());
    }

    #[test]
    fn test_parse_empty_trailing_is_absent() {
        let line = ParsedLine::parse("PRIVMSG #channel :");
        assert_eq!(line.middle.as_deref(), Some("#channel "));
        assert!(line.trailing.is_none());
    }

    #[test]
    fn test_parse_whitespace_after_colon_skipped() {
        let line = ParsedLine::parse("332 nick #ch :  padded topic");
        assert_eq!(line.trailing.as_deref(), Some("padded topic"));
    }

    #[test]
    fn test_parse_empty_line_has_no_command() {
        let line = ParsedLine::parse("");
        assert!(line.command.is_none());
    }

    #[test]
    fn test_parse_lone_colon_has_no_command() {
        let line = ParsedLine::parse(":");
        assert!(line.command.is_none());
        assert!(line.prefix.is_none());
    }

    #[test]
    fn test_numeric_rejects_textual_and_short_commands() {
        assert_eq!(ParsedLine::parse("PRIVMSG x").numeric(), None);
        assert_eq!(ParsedLine::parse("42 x").numeric(), None);
        assert_eq!(ParsedLine::parse("4242 x").numeric(), None);
    }
}
