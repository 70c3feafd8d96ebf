//! Todo List App
//!
//! Root component: builds the store, transport and controller once and
//! wires the global keyboard shortcuts.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::api::HttpTransport;
use crate::components::{AddButton, CreateModal, TodoList, ToastView};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::controller::TodoController;
use crate::dom;
use crate::store::{StoreView, TodoState, TodoStateStoreFields};

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::load();
    log::info!("[APP] API base {}", config.api_base_url);

    // State
    let store = Store::new(TodoState::default());
    provide_context(store);

    let transport = HttpTransport::new(config.api_base_url.clone(), config.request_timeout_ms);
    let view = StoreView::new(store, &config);
    let ctx = AppContext::new(TodoController::new(transport, view), config.clone());
    provide_context(ctx);

    // Create shortcut from anywhere; Escape closes the dialog while it is open.
    // Lives as long as the page, so the handle is never removed.
    let shortcut = config.create_shortcut;
    let _keydown = dom::on_global_keydown(move |ev| {
        if shortcut.matches_event(&ev) {
            ev.prevent_default();
            ctx.open_create();
        } else if ev.key() == "Escape" && store.modal_open().get_untracked() {
            ctx.close_create();
        }
    });

    // Initial load on mount
    Effect::new(move |_| ctx.init());

    let summary = move || {
        store.cache().with(|c| {
            let done = c.items().iter().filter(|t| t.completed).count();
            format!("{} items, {} done", c.len(), done)
        })
    };

    view! {
        <div class="app-layout">
            <header class="app-header">
                <h1>"Todos"</h1>
                <button class="refresh-btn" title="Reload" on:click=move |_| ctx.refresh(true)>"↻"</button>
                <AddButton />
            </header>

            <main class="main-content">
                <TodoList />
                <p class="item-count">{summary}</p>
            </main>

            <CreateModal />
            <ToastView />
        </div>
    }
}
