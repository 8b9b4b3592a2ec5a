//! Issuer, relay and endpoint services
//!
//! Each role is its own type holding only the keys its registration granted.
//! Roles start unprovisioned and fail with `PepError::KeyNotProvisioned` until
//! [`crate::authority::KeyAuthority`] registers them.

pub mod endpoint;
pub mod issuer;
pub mod relay;

pub use endpoint::{Endpoint, EndpointKeys};
pub use issuer::{Issuer, IssuerKeys};
pub use relay::{Relay, RelayKeys};
