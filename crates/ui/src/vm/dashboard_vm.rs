use companion_core::compute_progress;
use companion_core::model::{AppState, Module};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardVm {
    pub pill: String,
    pub items: Vec<DashboardItemVm>,
    pub nav_label: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardItemVm {
    pub id: &'static str,
    pub text: String,
    pub done: bool,
}

#[must_use]
pub fn map_dashboard(state: &AppState, modules: &[Module]) -> DashboardVm {
    let progress = compute_progress(state, modules);
    let items = modules
        .iter()
        .enumerate()
        .map(|(idx, module)| {
            let done = state.is_done(module.id);
            let mark = if done { "✅" } else { "⬜" };
            DashboardItemVm {
                id: module.id,
                text: format!("{mark} {}) {}", idx + 1, module.title),
                done,
            }
        })
        .collect();

    DashboardVm {
        pill: format!("{}% abgeschlossen", progress.pct),
        items,
        nav_label: dashboard_nav_label(progress.is_complete()),
    }
}

#[must_use]
pub fn dashboard_nav_label(all_done: bool) -> &'static str {
    if all_done { "Dashboard ✓" } else { "Dashboard" }
}
