//! Domain services behind the HTTP routes.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route handlers stay thin: they parse requests, call into these modules,
//! and map service errors to status codes.

pub mod catalog;
pub mod media;
pub mod spin;
pub mod thumbnail;
pub mod upload;

/// Current wall-clock time as fractional Unix seconds.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn now_epoch_secs() -> f64 {
    time::OffsetDateTime::now_utc().unix_timestamp_nanos() as f64 / 1e9
}
