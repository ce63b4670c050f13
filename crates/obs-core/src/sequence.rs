//! Per-code output sequence allocation.

use std::collections::BTreeMap;

/// Hands out 1-based, monotonically increasing sequence indexes per code.
///
/// This is the only state shared across rows besides the run tally. A fresh
/// allocator restarts every sequence at 1, which is what makes reruns on
/// identical input reproduce identical identifiers.
#[derive(Debug, Default)]
pub struct SequenceAllocator {
    counts: BTreeMap<String, u32>,
}

impl SequenceAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next sequence index for the given code.
    pub fn next(&mut self, code: &str) -> u32 {
        let count = self.counts.entry(code.to_string()).or_insert(0);
        *count += 1;
        *count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequences_are_per_code_and_one_based() {
        let mut allocator = SequenceAllocator::new();
        assert_eq!(allocator.next("2085-9"), 1);
        assert_eq!(allocator.next("2085-9"), 2);
        assert_eq!(allocator.next("718-7"), 1);
        assert_eq!(allocator.next("2085-9"), 3);
    }

    #[test]
    fn fresh_allocator_restarts() {
        let mut first = SequenceAllocator::new();
        first.next("2085-9");
        first.next("2085-9");

        let mut second = SequenceAllocator::new();
        assert_eq!(second.next("2085-9"), 1);
    }
}
