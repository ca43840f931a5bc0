//! Load-ordering watermark.
//!
//! A view may have more than one nearby-points request in flight when the
//! user keeps panning. Responses can arrive out of order; applying an older
//! response after a newer one would put markers for the old center back on
//! the map. Every load takes a [`LoadTicket`] before it fetches, and only a
//! ticket newer than the last applied one may change marker state.
//!
//! # Invariants
//!
//! - Tickets are issued in strictly increasing order per watermark.
//! - A ticket is accepted only if it is newer than the last accepted ticket.
//! - Rejections never move the watermark.

/// Sequence number taken before a fetch starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn seq(&self) -> u64 {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadFreshness {
    Fresh,
    /// A newer load has already been applied.
    Superseded { applied: u64, got: u64 },
}

impl LoadFreshness {
    pub fn is_fresh(&self) -> bool {
        matches!(self, LoadFreshness::Fresh)
    }
}

#[derive(Clone, Debug, Default)]
pub struct ResponseWatermark {
    next: u64,
    last_applied: Option<u64>,
}

impl ResponseWatermark {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> LoadTicket {
        self.next += 1;
        LoadTicket(self.next)
    }

    /// Read-only probe; does not advance the watermark.
    pub fn check(&self, ticket: LoadTicket) -> LoadFreshness {
        match self.last_applied {
            Some(applied) if ticket.0 <= applied => LoadFreshness::Superseded {
                applied,
                got: ticket.0,
            },
            _ => LoadFreshness::Fresh,
        }
    }

    /// Check and, when fresh, record `ticket` as the last applied load.
    pub fn accept(&mut self, ticket: LoadTicket) -> LoadFreshness {
        let result = self.check(ticket);
        if result.is_fresh() {
            self.last_applied = Some(ticket.0);
        }
        result
    }

    pub fn last_applied(&self) -> Option<u64> {
        self.last_applied
    }
}
