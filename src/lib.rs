//! # irclet
//!
//! A sans-IO IRC client core. The dispatcher turns raw wire lines into
//! typed events and session-state updates; the URI parser turns one
//! `irc://` / `ircs://` connection string into connection parameters.
//! Sockets, TLS policy and retry strategy stay with the caller.
//!
//! ## Features
//!
//! - Per-line dispatch: one line in, one event out, auto-PONG included
//! - Session state (joined flag, username, active channel) owned by the
//!   dispatcher, no locking needed
//! - Typed outbound commands with exact wire formatting
//! - `irc://` connection-string parsing with entity flags and options
//! - Explicit event subscription and scheme registry, no global state
//! - Optional Tokio transport behind the default `tokio` feature
//!
//! ## Quick Start
//!
//! ```rust
//! use irclet::{Client, Command, EventKind};
//!
//! let mut client = Client::new();
//! client.on(EventKind::Mention, |event| {
//!     println!("someone wants us: {:?}", event);
//! });
//!
//! // The first unit of work is the connection-open signal.
//! client.step_open();
//! client.join("alice", "#rust", None);
//!
//! // PING is answered before the event reaches subscribers.
//! client.step("PING :irc.example.net");
//! let out: Vec<String> = client.take_outbox().iter().map(Command::to_string).collect();
//! assert_eq!(
//!     out,
//!     vec!["USER alice 0 * :alice", "NICK alice", "JOIN #rust", "PONG irc.example.net"]
//! );
//! ```
//!
//! ## Connection strings
//!
//! ```rust
//! use irclet::{ConnectionParams, EntityType};
//!
//! let params = ConnectionParams::parse("ircs://alice@hoa-project.net/#rust").unwrap();
//! assert_eq!(params.port, 994);
//! assert!(params.secured);
//! assert_eq!(params.entity.as_deref(), Some("rust"));
//! assert_eq!(params.entity_type, EntityType::Channel);
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod client;
pub mod command;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod line;
pub mod nick;
pub mod registry;
pub mod session;
pub mod uri;

#[cfg(feature = "tokio")]
pub mod codec;
#[cfg(feature = "tokio")]
pub mod transport;

pub use self::client::Client;
pub use self::command::Command;
pub use self::dispatch::{Dispatch, Dispatcher};
pub use self::error::{ClientError, DispatchError, Result, UriError};
pub use self::event::{ClientEvent, EventKind, EventListeners, Handler, Listenable};
pub use self::line::ParsedLine;
pub use self::nick::NickIdentity;
pub use self::registry::{SchemeFactory, TransportRegistry};
pub use self::session::SessionState;
pub use self::uri::{ConnectionParams, EntityType, HostType};

#[cfg(feature = "tokio")]
pub use self::codec::{LineCodec, MAX_LINE_LEN};
#[cfg(feature = "tokio")]
pub use self::transport::Transport;
