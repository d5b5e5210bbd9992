//! Identity for LoanDesk
//!
//! Sessions are owned by an external identity provider. This module verifies
//! the bearer tokens it issues and resolves the acting user.

mod jwt;

pub use jwt::{generate_token, Claims, Identity, JwtError, TokenVerifier};
