// Platform-specific code module

pub mod elevation;

pub use elevation::{is_admin, request_elevation, AdminState};
