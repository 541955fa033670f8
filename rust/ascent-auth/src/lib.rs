//! Credential resolution and ES256 token signing for the Ascent CLI.
//!
//! Every outgoing API call presents a short-lived bearer token minted from
//! an elliptic-curve signing key. Tokens are never cached or reused: each
//! request pays the full signing cost in exchange for freshness and the
//! absence of shared mutable token state.

pub mod credentials;
pub mod error;
pub mod token;

pub use credentials::*;
pub use error::*;
pub use token::*;
