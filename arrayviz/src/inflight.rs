/// The structural operation a container has started but not yet committed.
///
/// Each operation holds a ticket. A commit only lands if its ticket is still
/// the current one, so a task abandoned by a reset cannot touch the rebuilt
/// container.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct InFlight {
    current: Option<u64>,
    issued: u64,
}

impl InFlight {
    pub(crate) fn is_busy(&self) -> bool {
        self.current.is_some()
    }

    /// Issue a ticket, or `None` while another operation holds one.
    pub(crate) fn start(&mut self) -> Option<u64> {
        if self.current.is_some() {
            return None;
        }
        self.issued += 1;
        self.current = Some(self.issued);
        Some(self.issued)
    }

    /// Release `ticket`. Returns false if it is no longer current.
    pub(crate) fn finish(&mut self, ticket: u64) -> bool {
        if self.current != Some(ticket) {
            return false;
        }
        self.current = None;
        true
    }

    /// Drop whatever ticket is outstanding.
    pub(crate) fn abandon(&mut self) -> Option<u64> {
        self.current.take()
    }
}
