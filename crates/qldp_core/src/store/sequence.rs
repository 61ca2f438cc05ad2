//! Request sequencing for async results.
//!
//! # Responsibility
//! - Hand out one ticket per in-flight request against a slice.
//! - Tell whether a resolved response is still the latest for its slice.
//!
//! # Invariants
//! - Sequence numbers are strictly increasing for the sequencer lifetime,
//!   including across `reset`, so tickets from a previous session never match.

use crate::state::SliceKey;
use std::collections::BTreeMap;

/// Identifies one in-flight request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket {
    pub slice: SliceKey,
    pub sequence: u64,
}

#[derive(Debug, Default)]
pub struct RequestSequencer {
    next_sequence: u64,
    latest: BTreeMap<SliceKey, u64>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a ticket that supersedes every earlier ticket for `slice`.
    pub fn issue(&mut self, slice: SliceKey) -> RequestTicket {
        self.next_sequence += 1;
        let sequence = self.next_sequence;
        self.latest.insert(slice, sequence);
        RequestTicket { slice, sequence }
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.latest.get(&ticket.slice) == Some(&ticket.sequence)
    }

    /// Forgets all in-flight requests.
    pub fn reset(&mut self) {
        self.latest.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::RequestSequencer;
    use crate::state::SliceKey;

    #[test]
    fn newer_ticket_supersedes_older_one_for_same_slice() {
        let mut sequencer = RequestSequencer::new();
        let first = sequencer.issue(SliceKey::People);
        let second = sequencer.issue(SliceKey::People);
        assert!(!sequencer.is_current(first));
        assert!(sequencer.is_current(second));
    }

    #[test]
    fn slices_are_sequenced_independently() {
        let mut sequencer = RequestSequencer::new();
        let people = sequencer.issue(SliceKey::People);
        let family = sequencer.issue(SliceKey::Family);
        assert!(sequencer.is_current(people));
        assert!(sequencer.is_current(family));
    }

    #[test]
    fn reset_invalidates_outstanding_tickets() {
        let mut sequencer = RequestSequencer::new();
        let before = sequencer.issue(SliceKey::Users);
        sequencer.reset();
        assert!(!sequencer.is_current(before));
        let after = sequencer.issue(SliceKey::Users);
        assert!(after.sequence > before.sequence);
    }
}
