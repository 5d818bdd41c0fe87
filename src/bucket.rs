// File: src/bucket.rs
// Round-robin partitioning for the featured rotation.

/// Number of rotation columns used when the config does not say otherwise.
pub const DEFAULT_BUCKETS: usize = 3;

/// Deals `items` into `buckets` groups: index `i` lands in group `i % buckets`.
///
/// Relative order inside each group follows the input. Groups may be empty.
/// Zero buckets yields no groups.
pub fn round_robin<T: Clone>(items: &[T], buckets: usize) -> Vec<Vec<T>> {
    if buckets == 0 {
        return Vec::new();
    }
    let mut out: Vec<Vec<T>> = vec![Vec::new(); buckets];
    for (idx, item) in items.iter().enumerate() {
        out[idx % buckets].push(item.clone());
    }
    out
}

#[derive(Debug, Clone, PartialEq)]
pub struct BucketSet<T> {
    buckets: Vec<Vec<T>>,
}

impl<T: Clone> BucketSet<T> {
    pub fn round_robin(items: &[T], buckets: usize) -> Self {
        Self {
            buckets: round_robin(items, buckets),
        }
    }
}

impl<T> BucketSet<T> {
    pub fn empty() -> Self {
        Self {
            buckets: Vec::new(),
        }
    }

    pub fn buckets(&self) -> &[Vec<T>] {
        &self.buckets
    }

    /// Buckets worth rendering, with their original position.
    pub fn non_empty(&self) -> impl Iterator<Item = (usize, &[T])> {
        self.buckets
            .iter()
            .enumerate()
            .filter(|(_, b)| !b.is_empty())
            .map(|(i, b)| (i, b.as_slice()))
    }

    pub fn total(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seven_into_three() {
        let items: Vec<u32> = (0..7).collect();
        let buckets = round_robin(&items, 3);
        assert_eq!(buckets, vec![vec![0, 3, 6], vec![1, 4], vec![2, 5]]);
    }

    #[test]
    fn fewer_items_than_buckets_leaves_empties() {
        let set = BucketSet::round_robin(&["a"], 3);
        assert_eq!(set.buckets().len(), 3);
        assert_eq!(set.total(), 1);
        let rendered: Vec<usize> = set.non_empty().map(|(i, _)| i).collect();
        assert_eq!(rendered, vec![0]);
    }

    #[test]
    fn zero_buckets() {
        assert!(round_robin(&[1, 2, 3], 0).is_empty());
        assert!(BucketSet::round_robin(&[1, 2], 0).is_empty());
    }
}
