mod dashboard;
mod export_panel;
mod landing;
mod module_section;
mod scripts;
mod sidebar;
mod state;
mod video;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use landing::LandingView;
pub use sidebar::Sidebar;
pub use state::{navigate_to, refresh_snapshot, use_snapshot, use_snapshot_provider};
