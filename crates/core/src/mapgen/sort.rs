//! Stable ascending merge sort used to order rooms for spawning.

/// Sorts by `key` ascending in O(n log n). Elements with equal keys keep their input order.
pub fn stable_sort_by_key<T, K, F>(items: Vec<T>, key: F) -> Vec<T>
where
    K: PartialOrd,
    F: Fn(&T) -> K + Copy,
{
    if items.len() <= 1 {
        return items;
    }
    let mut left = items;
    let right = left.split_off(left.len() / 2);
    let left = stable_sort_by_key(left, key);
    let right = stable_sort_by_key(right, key);

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    loop {
        let take_right = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => key(r) < key(l),
            (Some(_), None) => false,
            (None, Some(_)) => true,
            (None, None) => break,
        };
        let next = if take_right { right.next() } else { left.next() };
        merged.extend(next);
    }
    merged
}
