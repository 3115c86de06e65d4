//! # HTTP Middleware
//!
//! Request-processing middleware applied around the router.

// region: --- Modules
pub mod mw_auth;
pub mod mw_logging;
pub mod mw_req_stamp;
// endregion: --- Modules

// region: --- Re-exports
pub use mw_auth::require_auth;
pub use mw_logging::log_requests;
pub use mw_req_stamp::{stamp_req, RequestStamp};
// endregion: --- Re-exports
