//! Domain types and validation rules for the flowgate workflow gateway.
//!
//! The gateway itself is stateless: everything here is either a value type
//! crossing the HTTP boundary or a capability trait implemented by the
//! surrounding application (user store) and exercised by the API crate.

pub mod error;
pub mod user;
pub mod workflow;
