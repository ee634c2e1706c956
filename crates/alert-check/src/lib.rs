//! Trigger the BYMA API alert evaluation once and report the result.
//!
//! The binary is meant to be run by an external scheduler (a cron job): it
//! calls `GET <base>/api/v1/system/alerts/check`, logs what the server
//! reports and exits with 0 when a result came back, 1 otherwise.

pub mod client;
pub mod config;
pub mod error;
pub mod job;
pub mod logging;
pub mod response;
pub mod tls;

pub use client::AlertCheck;
pub use job::{JobOutcome, run};
pub use response::AlertCheckResponse;
