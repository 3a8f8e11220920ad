//! Entity trait: things compared by identity rather than by value.

use std::collections::HashSet;

/// Entity marker + minimal interface.
///
/// Catalog variants are entities: two variants with the same id are the same
/// sellable unit, and the validator treats a repeated id as a defect no matter
/// what the other attributes say.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// Positions (ascending) of entities whose id already appeared earlier in `items`.
///
/// The first occurrence of an id is never reported.
pub fn repeated_positions<E: Entity>(items: &[E]) -> Vec<usize> {
    let mut seen: HashSet<&E::Id> = HashSet::with_capacity(items.len());
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| !seen.insert(item.id()))
        .map(|(pos, _)| pos)
        .collect()
}

/// Every distinct id in `items`.
pub fn id_set<E: Entity>(items: &[E]) -> HashSet<&E::Id> {
    items.iter().map(Entity::id).collect()
}
