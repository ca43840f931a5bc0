//! Precondition checks for reconcile inputs.
//!
//! [`crate::reconcile`] trusts its inputs. Callers that receive sequences from
//! outside (a JSON payload, a file on disk) run them through
//! [`reconcile_checked`] so an unsorted or duplicated batch surfaces as an
//! error instead of a silently wrong diff.

use std::cmp::Ordering;

use crate::{reconcile, ReconcileInputError, Reconciliation, SequenceViolation, Side};

/// Verify `seq` is strictly ascending under `cmp`.
///
/// Reports the first offending index only.
pub fn validate_sorted_unique<T, F>(seq: &[T], mut cmp: F) -> Result<(), SequenceViolation>
where
    F: FnMut(&T, &T) -> Ordering,
{
    for (k, pair) in seq.windows(2).enumerate() {
        let index = k + 1;
        match cmp(&pair[0], &pair[1]) {
            Ordering::Less => {}
            Ordering::Equal => return Err(SequenceViolation::DuplicateKey { index }),
            Ordering::Greater => return Err(SequenceViolation::Unsorted { index }),
        }
    }
    Ok(())
}

/// Validate both inputs, then reconcile.
///
/// `old` is checked first; if both are invalid only the `old` violation is
/// reported.
pub fn reconcile_checked<T, F>(
    old: &[T],
    new: &[T],
    mut cmp: F,
) -> Result<Reconciliation<T>, ReconcileInputError>
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    validate_sorted_unique(old, &mut cmp).map_err(|violation| ReconcileInputError {
        side: Side::Old,
        violation,
    })?;
    validate_sorted_unique(new, &mut cmp).map_err(|violation| ReconcileInputError {
        side: Side::New,
        violation,
    })?;
    Ok(reconcile(old, new, cmp))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_singleton_are_valid() {
        assert_eq!(validate_sorted_unique::<i32, _>(&[], i32::cmp), Ok(()));
        assert_eq!(validate_sorted_unique(&[7], i32::cmp), Ok(()));
    }

    #[test]
    fn reports_first_duplicate() {
        let r = validate_sorted_unique(&["a", "b", "b", "a"], |x, y| x.cmp(y));
        assert_eq!(r, Err(SequenceViolation::DuplicateKey { index: 2 }));
    }

    #[test]
    fn reports_first_descent() {
        let r = validate_sorted_unique(&[1, 5, 3, 3], i32::cmp);
        assert_eq!(r, Err(SequenceViolation::Unsorted { index: 2 }));
    }

    #[test]
    fn checked_names_the_failing_side() {
        let err = reconcile_checked(&[1, 2], &[2, 1], i32::cmp).unwrap_err();
        assert_eq!(err.side, Side::New);
        assert_eq!(err.violation.index(), 1);
        assert_eq!(
            err.to_string(),
            "invalid new sequence for reconcile: element 1 sorts before its predecessor"
        );
    }

    #[test]
    fn checked_passes_through_on_valid_input() {
        let r = reconcile_checked(&[1, 3], &[2, 3], i32::cmp).unwrap();
        assert_eq!(r.added, vec![2]);
        assert_eq!(r.removed, vec![1]);
    }
}
