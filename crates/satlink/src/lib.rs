//! # satlink -- Satellite Modem Control over Serial
//!
//! `satlink` is an asynchronous Rust library for driving Hiber-class
//! satellite modems over a half-duplex serial link. It covers the full
//! stack: typed command encoding, response decoding with boot-banner
//! recovery, and high-level device operations such as staging a payload
//! for broadcast or putting the modem to sleep.
//!
//! ## Quick Start
//!
//! Add `satlink` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! satlink = "0.1"
//! tokio = { version = "1", features = ["full"] }
//! ```
//!
//! Connect to a modem and stage a payload:
//!
//! ```no_run
//! use satlink::modem::ModemBuilder;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut modem = ModemBuilder::new()
//!         .serial_port("/dev/ttyUSB0")
//!         .baud_rate(19_200)
//!         .build()
//!         .await?;
//!
//!     modem.set_location(52.37403, 4.88969, 0.0).await?;
//!     modem.send_payload(b"hello from the ground").await?;
//!     println!("sleep: {:?}", modem.go_to_sleep().await?);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! The library is organized as a workspace of focused crates:
//!
//! | Crate                  | Purpose                                       |
//! |------------------------|-----------------------------------------------|
//! | `satlink-core`         | [`Transport`] trait, [`StatusCode`], errors   |
//! | `satlink-transport`    | Serial transport over `tokio-serial`          |
//! | `satlink-protocol`     | Command encoder, response decoder, session    |
//! | `satlink-modem`        | Typed device operations, [`ModemBuilder`](modem::ModemBuilder) |
//! | `satlink-test-harness` | Scripted mock transport for tests             |
//! | **`satlink`**          | This facade crate -- re-exports everything    |
//!
//! ## Protocol
//!
//! The wire protocol is line oriented. Commands go out as
//! `name(arg1,arg2)\r\n` with typed argument encoding; the modem answers
//! with `API(NNN)` or `API(NNN: arg1; arg2)` where `NNN` is a 3-digit
//! status code. After an unexpected restart the modem emits a one-line
//! boot banner instead of a response; the session layer detects it and
//! resends the last command once before giving up.
//!
//! Lower layers stay accessible for callers that need them: the
//! [`protocol`] module exposes the pure [`Command`](protocol::Command)
//! encoder and [`decode`](protocol::decode()) function, and
//! [`Modem::session`](modem::Modem::session) gives direct access to the
//! round-trip layer for commands without a typed wrapper.

pub use satlink_core::*;

/// Command encoding, response decoding, and the session layer.
pub mod protocol {
    pub use satlink_protocol::*;
}

/// Serial transport implementation.
pub mod transport {
    pub use satlink_transport::*;
}

/// High-level device operations.
pub mod modem {
    pub use satlink_modem::*;
}
