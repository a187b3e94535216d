//! Logging setup.
//!
//! Every module logs through the `log` facade. Binaries call [`init_logging`]
//! once; library users are free to install any other `log` backend instead.

mod init;

pub use init::{init_logging, LoggingConfig};
