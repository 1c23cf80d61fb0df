use dioxus::prelude::*;
use services::RESTORE_DELAY;

use crate::context::AppContext;
use crate::vm::map_module_sections;

use super::dashboard::DashboardSection;
use super::export_panel::ExportPanel;
use super::module_section::ModuleSection;
use super::scripts::scroll_into_view;
use super::state::use_snapshot;

#[component]
pub fn LandingView() -> Element {
    let ctx = use_context::<AppContext>();
    let companion = ctx.companion();
    let snapshot = use_snapshot();
    let sections = map_module_sections(&snapshot.read().state, companion.modules());

    // Returning learners land where they left off; first visits stay on top.
    use_hook(|| {
        if let Some(target) = companion.restore_target() {
            spawn(async move {
                tokio::time::sleep(RESTORE_DELAY).await;
                scroll_into_view(&target).await;
            });
        }
    });

    rsx! {
        div { class: "page landing",
            DashboardSection {}
            for vm in sections {
                ModuleSection { key: "{vm.id}", vm }
            }
            ExportPanel {}
        }
    }
}
