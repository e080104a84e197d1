//! Entities: things that keep their identity while their state changes.

/// A REQ section stays the same section when its REQ is re-chosen; a talent
/// entry stays the same talent when it is selected or re-rated.
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}
