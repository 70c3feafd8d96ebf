//! Toast Component
//!
//! The single shared notification. Errors announce assertively, status
//! messages politely.

use leptos::prelude::*;

use crate::store::{use_todo_store, TodoStateStoreFields, ToastPhase};

#[component]
pub fn ToastView() -> impl IntoView {
    let store = use_todo_store();
    let toast = move || store.toast();

    let class = move || {
        toast().with(|t| {
            let phase = match t.phase {
                ToastPhase::Visible => "show",
                ToastPhase::Hiding => "hiding",
                ToastPhase::Hidden => "hidden",
            };
            format!("{} {}", t.kind.css_class(), phase)
        })
    };

    view! {
        <div
            id="toast"
            class=class
            role=move || toast().with(|t| t.kind.aria_role())
            aria-live=move || toast().with(|t| t.kind.aria_live())
            aria-hidden=move || toast().with(|t| (!t.is_shown()).to_string())
        >
            {move || toast().with(|t| t.text.clone())}
        </div>
    }
}
