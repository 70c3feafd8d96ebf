//! Todo Row Component
//!
//! One list entry: completion checkbox, inline-editable title, delete button.

use leptos::html;
use leptos::prelude::*;

use crate::context::use_app_context;
use crate::inline_edit::{EditKey, EditOutcome, InlineEdit};
use crate::models::Todo;

/// A single todo row
#[component]
pub fn TodoRow(todo: Todo) -> impl IntoView {
    let ctx = use_app_context();

    let id = StoredValue::new(todo.id.clone());
    let completed = todo.completed;
    let edit = RwSignal::new(InlineEdit::new(todo.title.clone()));
    // only flips on Display <-> Editing, not on every keystroke
    let editing = Memo::new(move |_| edit.with(|e| e.is_editing()));
    let input_ref = NodeRef::<html::Input>::new();

    Effect::new(move |_| {
        if editing.get() {
            if let Some(input) = input_ref.get() {
                let _ = input.focus();
                input.select();
            }
        }
    });

    let settle = move |outcome: EditOutcome| {
        if let EditOutcome::Commit(title) = outcome {
            let draft = title.clone();
            ctx.edit_title(id.get_value(), title, move || {
                edit.update(|e| e.reopen(draft));
            });
        }
    };

    let begin = move || edit.update(|e| {
        e.begin();
    });

    view! {
        <li class=move || if completed { "todo-row completed" } else { "todo-row" }>
            <input
                type="checkbox"
                class="todo-toggle"
                aria-label="Mark as done"
                prop:checked=completed
                on:click=move |ev| {
                    // keep the box in sync with the cache; it re-renders on success
                    ev.prevent_default();
                    ctx.toggle(id.get_value(), !completed);
                }
            />

            {move || if editing.get() {
                view! {
                    <input
                        type="text"
                        class="todo-edit"
                        node_ref=input_ref
                        prop:value=edit.with_untracked(|e| e.draft().unwrap_or_default().to_string())
                        on:input=move |ev| edit.update(|e| e.input(event_target_value(&ev)))
                        on:keydown=move |ev: web_sys::KeyboardEvent| {
                            let key = EditKey::from_key(&ev.key());
                            if key != EditKey::Other {
                                ev.prevent_default();
                                settle(edit.try_update(|e| e.key(key)).unwrap_or(EditOutcome::None));
                            }
                        }
                        on:blur=move |_| {
                            settle(edit.try_update(|e| e.blur()).unwrap_or(EditOutcome::None));
                        }
                    />
                }.into_any()
            } else {
                view! {
                    <span
                        class="todo-title"
                        role="button"
                        tabindex="0"
                        title="Click to edit"
                        on:click=move |_| begin()
                        on:keydown=move |ev: web_sys::KeyboardEvent| {
                            if matches!(ev.key().as_str(), "Enter" | " ") {
                                ev.prevent_default();
                                begin();
                            }
                        }
                    >
                        {move || edit.with(|e| e.label().to_string())}
                    </span>
                }.into_any()
            }}

            <button
                class="delete-btn"
                aria-label="Delete"
                on:click=move |_| ctx.delete(id.get_value())
            >
                "×"
            </button>
        </li>
    }
}
