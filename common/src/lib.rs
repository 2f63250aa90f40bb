//! ShardTx Common Types
//!
//! This crate contains shared types used across the ShardTx coordination
//! layer, including shard and transaction identifiers, the transaction
//! context handle, and the error vocabulary.

pub mod identifiers;
pub mod context;
pub mod error;

pub use identifiers::*;
pub use context::*;
pub use error::*;
