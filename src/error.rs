//! Error types for the IRC client core.
//!
//! Three error families with different propagation rules: [`UriError`] is a
//! configuration-time error and is fatal before any connection attempt,
//! [`DispatchError`] is recovered per line into an `error` event and never
//! terminates the session, and [`ClientError`] covers everything the
//! transport boundary can surface.

use thiserror::Error;

/// Convenience type alias for Results using [`ClientError`].
pub type Result<T, E = ClientError> = std::result::Result<T, E>;

/// Top-level client errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    /// I/O error during reading or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 decoding error.
    #[error("decode error: {0}")]
    Decode(#[from] std::string::FromUtf8Error),

    /// Line exceeded maximum allowed length.
    #[error("line too long: {0} bytes")]
    LineTooLong(usize),

    /// Malformed connection string.
    #[error("invalid connection uri: {0}")]
    Uri(#[from] UriError),

    /// No message target available and the session has no current channel.
    #[error("no target: no channel joined and none given")]
    NoTarget,
}

/// Errors encountered when parsing an `irc://` / `ircs://` connection string.
///
/// These are fatal: a malformed URI is rejected before any connection
/// attempt is made.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum UriError {
    /// The URI has no scheme separator.
    #[error("not a uri: {0}")]
    NotAUri(String),

    /// The scheme is not `irc` or `ircs`.
    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    /// The URI has no host.
    #[error("missing host in uri: {0}")]
    MissingHost(String),

    /// The port is not a number in range.
    #[error("invalid port: {0}")]
    InvalidPort(String),

    /// An entity flag is not one of the known four.
    #[error("unknown entity flag: {0}")]
    UnknownFlag(String),

    /// The same flag, or two flags of the same category, were given.
    #[error("conflicting entity flags: {first} and {second}")]
    ConflictingFlags {
        /// The flag seen first.
        first: String,
        /// The flag that conflicts with it.
        second: String,
    },

    /// More than two flags were given.
    #[error("too many entity flags: {0}")]
    TooManyFlags(usize),
}

/// Failures inside the per-line dispatch path.
///
/// A `DispatchError` never propagates to the caller: it is converted into
/// an `error` event and the connection continues.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DispatchError {
    /// Numeric error reply from the server, code in `[400, 599]`.
    #[error("error reply code {code}")]
    ErrorReply {
        /// The 3-digit numeric reply code.
        code: u16,
    },

    /// A command that requires middle parameters arrived without them.
    #[error("{command}: missing middle parameters")]
    MissingMiddle {
        /// The command that was being dispatched.
        command: String,
    },

    /// A command that requires a trailing segment arrived without one.
    #[error("{command}: missing trailing segment")]
    MissingTrailing {
        /// The command that was being dispatched.
        command: String,
    },

    /// Middle parameters did not have the expected shape.
    #[error("{command}: malformed middle parameters: {middle}")]
    MalformedMiddle {
        /// The command that was being dispatched.
        command: String,
        /// The middle segment as received.
        middle: String,
    },
}
