//! Create Dialog Component
//!
//! Modal with a single title input, plus the button that opens it.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::store::{use_todo_store, TodoStateStoreFields, CREATE_INPUT_ID};

/// Header button opening the dialog
#[component]
pub fn AddButton() -> impl IntoView {
    let ctx = use_app_context();
    let hint = format!("Add todo ({})", ctx.config().create_shortcut);

    view! {
        <button class="add-btn" title=hint on:click=move |_| ctx.open_create()>
            "+ Add"
        </button>
    }
}

/// Creation dialog. Enter in the input submits; Escape is handled globally
/// while the dialog is open.
#[component]
pub fn CreateModal() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_todo_store();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        ctx.create();
    };

    view! {
        <Show when=move || store.modal_open().get()>
            <div class="modal-backdrop" on:click=move |_| ctx.close_create()>
                <div
                    class="modal"
                    role="dialog"
                    aria-modal="true"
                    aria-labelledby="create-dialog-title"
                    on:click=|ev| ev.stop_propagation()
                >
                    <header class="modal-header">
                        <h2 id="create-dialog-title">"New todo"</h2>
                        <button
                            class="modal-close"
                            aria-label="Close"
                            on:click=move |_| ctx.close_create()
                        >
                            "×"
                        </button>
                    </header>

                    <form class="new-todo-form" on:submit=on_submit>
                        <input
                            id=CREATE_INPUT_ID
                            type="text"
                            placeholder="What needs doing?"
                            autocomplete="off"
                            prop:value=move || store.new_title().get()
                            on:input=move |ev| store.new_title().set(event_target_value(&ev))
                        />
                        <div class="modal-actions">
                            <button type="button" class="cancel-btn" on:click=move |_| ctx.close_create()>
                                "Cancel"
                            </button>
                            <button type="submit" class="submit-btn">"Add"</button>
                        </div>
                    </form>
                </div>
            </div>
        </Show>
    }
}
