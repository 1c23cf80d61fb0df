mod dashboard_vm;
mod module_vm;
mod notice_vm;
mod progress_vm;
mod time_fmt;

pub use dashboard_vm::{DashboardItemVm, DashboardVm, dashboard_nav_label, map_dashboard};
pub use module_vm::{
    MODULE_COPY, ModuleCopy, ModulePillVm, ModuleSectionVm, Question, map_module_sections,
    module_copy, module_pill,
};
pub use notice_vm::Notice;
pub use progress_vm::{ProgressVm, map_progress};
pub use time_fmt::{last_saved_label, last_saved_label_in};
