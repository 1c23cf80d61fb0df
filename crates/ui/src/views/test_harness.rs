use std::sync::Arc;

use companion_core::time::fixed_now;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{Clock, CompanionController, ExportService, StateStore};
use storage::repository::InMemoryRepository;

use crate::context::{AppContext, UiApp, build_app_context};
use crate::views::{LandingView, Sidebar, use_snapshot_provider};

#[derive(Clone)]
struct TestApp {
    companion: CompanionController,
    exports: Arc<ExportService>,
}

impl UiApp for TestApp {
    fn companion(&self) -> CompanionController {
        self.companion.clone()
    }

    fn exports(&self) -> Arc<ExportService> {
        Arc::clone(&self.exports)
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let ctx = use_context::<AppContext>();
    use_snapshot_provider(&ctx.companion());
    rsx! {
        Sidebar {}
        LandingView {}
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub repo: InMemoryRepository,
    pub companion: CompanionController,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub async fn setup_view_harness() -> ViewHarness {
    setup_view_harness_with_repo(InMemoryRepository::new()).await
}

pub async fn setup_view_harness_with_repo(repo: InMemoryRepository) -> ViewHarness {
    let store = StateStore::new(Clock::fixed(fixed_now()), Arc::new(repo.clone()));
    let companion = CompanionController::load(store).await;
    let exports = Arc::new(ExportService::new(
        std::env::temp_dir().join("companion-ui-harness-exports"),
    ));

    let app = Arc::new(TestApp {
        companion: companion.clone(),
        exports,
    });
    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app });

    ViewHarness {
        dom,
        repo,
        companion,
    }
}
