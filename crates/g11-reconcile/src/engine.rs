use std::cmp::Ordering;

use crate::Reconciliation;

/// Two-pointer merge diff over two sequences sorted under `cmp`.
///
/// Preconditions (not checked here, see [`crate::reconcile_checked`]):
/// - `old` and `new` are ascending under `cmp`
/// - `cmp` is a total order
///
/// Broken preconditions give a wrong diff, never a panic.
///
/// Runs in `O(old.len() + new.len())`. Items are cloned into the output;
/// nothing in the inputs is mutated.
pub fn reconcile<T, F>(old: &[T], new: &[T], mut cmp: F) -> Reconciliation<T>
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    let mut out = Reconciliation::empty();
    let (mut i, mut j) = (0usize, 0usize);

    while i < old.len() && j < new.len() {
        match cmp(&old[i], &new[j]) {
            // old[i] has no counterpart at or before new[j]
            Ordering::Less => {
                out.removed.push(old[i].clone());
                i += 1;
            }
            Ordering::Greater => {
                out.added.push(new[j].clone());
                j += 1;
            }
            Ordering::Equal => {
                i += 1;
                j += 1;
            }
        }
    }

    out.removed.extend_from_slice(&old[i..]);
    out.added.extend_from_slice(&new[j..]);
    out
}

/// Tuple form of [`reconcile`]: `(added, removed)`.
pub fn added_and_removed<T, F>(old: &[T], new: &[T], cmp: F) -> (Vec<T>, Vec<T>)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    reconcile(old, new, cmp).into_parts()
}

/// Reconcile by a derived key, e.g. a point's id.
///
/// Both inputs must be sorted by the same key.
pub fn reconcile_by_key<T, K, F>(old: &[T], new: &[T], mut key: F) -> Reconciliation<T>
where
    T: Clone,
    K: Ord,
    F: FnMut(&T) -> K,
{
    reconcile(old, new, |a, b| key(a).cmp(&key(b)))
}

/// Reconcile items using their natural order.
pub fn reconcile_ord<T>(old: &[T], new: &[T]) -> Reconciliation<T>
where
    T: Clone + Ord,
{
    reconcile(old, new, T::cmp)
}
