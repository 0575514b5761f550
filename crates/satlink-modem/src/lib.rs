//! High-level operations for Hiber-class satellite modems.
//!
//! This crate sits on top of `satlink-protocol`: the session layer runs
//! the half-duplex round trips, this layer gives each device operation a
//! typed signature. Start with [`ModemBuilder`]:
//!
//! ```no_run
//! use satlink_modem::ModemBuilder;
//!
//! # async fn run() -> satlink_core::error::Result<()> {
//! let mut modem = ModemBuilder::new()
//!     .serial_port("/dev/ttyUSB0")
//!     .build()
//!     .await?;
//!
//! modem.set_location(52.37403, 4.88969, 0.0).await?;
//! modem.send_payload(b"hello from the ground").await?;
//! modem.go_to_sleep().await?;
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod modem;

pub use builder::ModemBuilder;
pub use modem::{Modem, SleepStatus, WakeupTime, MAX_PAYLOAD_LEN};
