//! `roster-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no storage, no async).

pub mod entity;
pub mod error;
pub mod id;
pub mod numeric;

pub use entity::{Entity, position_of};
pub use error::{DomainError, DomainResult};
pub use numeric::parse_int_prefix;
