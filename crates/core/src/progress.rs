use crate::model::{AppState, Module};

/// Completion summary for a catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Progress {
    pub total: usize,
    pub done_count: usize,
    pub pct: u32,
}

impl Progress {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.done_count == self.total
    }
}

/// Counts completed catalog modules; ids outside the catalog are ignored.
#[must_use]
pub fn compute_progress(state: &AppState, modules: &[Module]) -> Progress {
    let total = modules.len();
    let done_count = modules
        .iter()
        .filter(|module| state.is_done(module.id))
        .count();
    let pct = if total == 0 {
        0
    } else {
        // Integer round-half-up of done/total * 100.
        let scaled = done_count * 200 + total;
        u32::try_from(scaled / (2 * total)).unwrap_or(100)
    };
    Progress {
        total,
        done_count,
        pct,
    }
}
