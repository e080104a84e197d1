//! `talentpo-core` — domain building blocks for the purchase order workspace.
//!
//! This crate contains **pure domain** primitives (no IO, no rendering).

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use aggregate::{Aggregate, AggregateRoot};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{FormId, SectionId, SectionIdAllocator};
pub use value_object::ValueObject;
