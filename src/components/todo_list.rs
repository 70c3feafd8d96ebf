//! Todo List Component
//!
//! Renders the cached items. The cache is the only source, so what is on
//! screen always matches it.

use leptos::prelude::*;

use crate::components::TodoRow;
use crate::store::{use_todo_store, TodoStateStoreFields};

/// Placeholder row shown during full refreshes
#[component]
pub fn LoadingRow() -> impl IntoView {
    view! {
        <li class="todo-row loading" aria-busy="true">"Loading…"</li>
    }
}

#[component]
pub fn TodoList() -> impl IntoView {
    let store = use_todo_store();

    let items = move || store.cache().with(|c| c.items().to_vec());
    let is_empty = move || !store.loading().get() && store.cache().with(|c| c.is_empty());

    view! {
        <ul class="todo-list">
            <Show when=move || store.loading().get()>
                <LoadingRow />
            </Show>

            <For
                each=items
                // any field change re-renders the row
                key=|todo| (todo.id.canonical(), todo.title.clone(), todo.completed)
                children=move |todo| view! { <TodoRow todo=todo /> }
            />

            <Show when=is_empty>
                <li class="empty-state">"Nothing to do yet"</li>
            </Show>
        </ul>
    }
}
