//! Bearer-token verification.
//!
//! Pantry verifies access tokens issued by the identity layer that
//! fronts it; it never issues or refreshes tokens itself.

pub mod claims;
pub mod decoder;

pub use claims::Claims;
pub use decoder::TokenDecoder;
