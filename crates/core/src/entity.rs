//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// Index of the first entity in `items` carrying `id`.
///
/// Collections in this workspace are small ordered vectors, so lookups are linear.
pub fn position_of<E: Entity>(items: &[E], id: &E::Id) -> Option<usize> {
    items.iter().position(|item| item.id() == id)
}
