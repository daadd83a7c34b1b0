pub mod global_context;
pub mod sidebar;
pub mod tabs;
pub mod top_header;
pub mod workspace;

use global_context::AppGlobalContext;
use leptos::prelude::*;
use sidebar::Sidebar;
use top_header::TopHeader;
use workspace::Workspace;

/// Каркас приложения после входа.
///
/// ```text
/// +------------------------------+
/// |          TopHeader           |
/// +---------+--------------------+
/// | Sidebar |  Workspace (tabs)  |
/// +---------+--------------------+
/// ```
///
/// Меню сворачивается кнопкой в шапке (`left_open`).
#[component]
pub fn Shell() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");

    view! {
        <div class="app-layout">
            <TopHeader />
            <div class="app-body">
                <aside data-zone="left" class:hidden=move || !ctx.left_open.get()>
                    <Sidebar />
                </aside>
                <main data-zone="center" class="app-main">
                    <Workspace />
                </main>
            </div>
        </div>
    }
}
