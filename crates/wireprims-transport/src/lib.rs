//! Blocking TCP client transport with full-transfer typed reads and writes.
//!
//! Everything here builds on [`Connection`]:
//! - [`connect`] resolves a host and tries each candidate address once, in
//!   resolution order
//! - [`Connection::receive_exact`] and [`Connection::send_exact`] move the
//!   whole requested byte count or fail, never a silent partial transfer
//! - typed reads (`read_int32`, `read_double`, ...) decode network byte order
//!   through [`wireprims_codec::order`]
//!
//! Any read, write, or peer-close failure closes the socket and leaves the
//! handle Disconnected. A fresh [`connect`] is the only way back.

pub mod config;
pub mod connection;
pub mod connector;
pub mod error;
pub mod stream;
pub mod subsystem;

pub use config::ConnectConfig;
pub use connection::{Connection, ConnectionState};
pub use connector::{connect, connect_addrs, connect_with_config};
pub use error::{Result, TransportError};
pub use stream::WireStream;
pub use subsystem::{Subsystem, SubsystemGuard};
