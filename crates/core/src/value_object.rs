//! Value objects: compared by value, freely copied.

/// Catalog entries, PO types and currencies. Two equal values are
/// interchangeable, unlike two REQ sections with identical contents.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
