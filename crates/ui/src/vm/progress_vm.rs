use companion_core::Progress;

/// Everything the progress bar needs, precomputed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressVm {
    pub pct: u32,
    pub width: String,
    pub label: String,
    pub counts: String,
}

#[must_use]
pub fn map_progress(progress: Progress) -> ProgressVm {
    ProgressVm {
        pct: progress.pct,
        width: format!("{}%", progress.pct),
        label: format!("Fortschritt: {}%", progress.pct),
        counts: format!("{}/{}", progress.done_count, progress.total),
    }
}
