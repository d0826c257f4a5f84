//! # Tag Sets
//!
//! Fixed, process-wide sets of tag names. Declared as `const` so they are
//! built once at compile time and never reallocated per record.

/// A closed, immutable set of tag names.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TagSet {
    keys: &'static [&'static str],
}

impl TagSet {
    /// Creates a tag set from a static list of keys.
    #[must_use]
    pub const fn new(keys: &'static [&'static str]) -> Self {
        Self { keys }
    }

    /// Iterates the tag names in declaration order.
    pub fn iter(self) -> impl Iterator<Item = &'static str> {
        self.keys.iter().copied()
    }

    /// Returns whether `key` belongs to this set.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(&key)
    }

    /// Number of keys in the set.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns whether the set has no keys.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: TagSet = TagSet::new(&["power", "voltage"]);

    #[test]
    fn test_membership() {
        assert!(SAMPLE.contains("power"));
        assert!(!SAMPLE.contains("name"));
        assert_eq!(SAMPLE.len(), 2);
        assert_eq!(SAMPLE.iter().collect::<Vec<_>>(), vec!["power", "voltage"]);
    }
}
