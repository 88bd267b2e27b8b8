//! Signed short links: minting and resolving.

pub mod issuer;
pub mod resolver;

pub use issuer::{LinkIssuer, MintedLink};
pub use resolver::{LinkResolver, ResolvedLink};
