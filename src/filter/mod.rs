//! Recipe and calendar filters.
//!
//! A filter arrives as a sparse input where any field may be missing (`RecipeFilterInput`,
//! `EventFilterInput`). Normalizing it yields a complete filter whose list fields are sets, so
//! toggling a value twice always restores the previous state. The complete filters also carry the
//! predicate a store applies when it fetches records.

mod event;
mod recipe;

pub use event::{EventFilter, EventFilterInput};
pub use recipe::{RecipeFilter, RecipeFilterInput};

use std::collections::BTreeSet;

/// Removes `value` if present, otherwise inserts it. Returns true when the value is now present.
pub fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T) -> bool {
    if set.remove(&value) {
        false
    } else {
        set.insert(value)
    }
}

/// True when the two sets share at least one value.
fn overlaps<T: Ord>(wanted: &BTreeSet<T>, present: &[T]) -> bool {
    present.iter().any(|v| wanted.contains(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let mut set = BTreeSet::new();
        assert!(toggle(&mut set, 3));
        assert!(toggle(&mut set, 1));
        assert!(!toggle(&mut set, 3));
        assert_eq!(set.into_iter().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_overlaps() {
        let wanted: BTreeSet<u8> = [1, 2].into_iter().collect();
        assert!(overlaps(&wanted, &[5, 2]));
        assert!(!overlaps(&wanted, &[5]));
        assert!(!overlaps(&wanted, &[]));
    }
}
