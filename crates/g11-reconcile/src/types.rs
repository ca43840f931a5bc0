use std::fmt;

use serde::Serialize;

/// Output of a reconciliation: what to create and what to tear down.
///
/// Both vectors keep the relative order of their source sequence, so each is
/// itself sorted under the comparator that produced it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Reconciliation<T> {
    /// Items present in `new` with no counterpart in `old`.
    pub added: Vec<T>,
    /// Items present in `old` with no counterpart in `new`.
    pub removed: Vec<T>,
}

impl<T> Reconciliation<T> {
    pub fn empty() -> Self {
        Self {
            added: Vec::new(),
            removed: Vec::new(),
        }
    }

    /// `true` when nothing was added or removed.
    pub fn is_clean(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// Split into `(added, removed)`.
    pub fn into_parts(self) -> (Vec<T>, Vec<T>) {
        (self.added, self.removed)
    }

    /// Project both sides through `f`, typically to extract keys for logging.
    pub fn map<U, F>(&self, mut f: F) -> Reconciliation<U>
    where
        F: FnMut(&T) -> U,
    {
        Reconciliation {
            added: self.added.iter().map(&mut f).collect(),
            removed: self.removed.iter().map(&mut f).collect(),
        }
    }
}

impl<T> Default for Reconciliation<T> {
    fn default() -> Self {
        Self::empty()
    }
}

// ---------------------------------------------------------------------------
// Precondition violations
// ---------------------------------------------------------------------------

/// First place a sequence breaks the "strictly ascending" precondition.
///
/// `index` is the position of the offending element; it compares less than
/// (`Unsorted`) or equal to (`DuplicateKey`) the element before it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequenceViolation {
    Unsorted { index: usize },
    DuplicateKey { index: usize },
}

impl SequenceViolation {
    pub fn index(&self) -> usize {
        match self {
            SequenceViolation::Unsorted { index } | SequenceViolation::DuplicateKey { index } => {
                *index
            }
        }
    }
}

impl fmt::Display for SequenceViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceViolation::Unsorted { index } => {
                write!(f, "element {index} sorts before its predecessor")
            }
            SequenceViolation::DuplicateKey { index } => {
                write!(f, "element {index} has the same key as its predecessor")
            }
        }
    }
}

impl std::error::Error for SequenceViolation {}

/// Which input of a reconciliation failed validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Old,
    New,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Old => "old",
            Side::New => "new",
        }
    }
}

/// Error returned by [`crate::reconcile_checked`] when an input is not
/// strictly ascending under the supplied comparator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReconcileInputError {
    pub side: Side,
    pub violation: SequenceViolation,
}

impl fmt::Display for ReconcileInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid {} sequence for reconcile: {}",
            self.side.as_str(),
            self.violation
        )
    }
}

impl std::error::Error for ReconcileInputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.violation)
    }
}
