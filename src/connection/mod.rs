//! Session acquisition for BookScape.
//!
//! Every interaction opens its own session and releases it afterwards; there is
//! no pooling or reuse between interactions.

pub mod provider;

pub use provider::{ConnectionProvider, SessionProvider};
