//! UI Components
//!
//! Leptos components for the list view.

mod todo_row;
mod todo_list;
mod create_modal;
mod toast;

pub use todo_row::TodoRow;
pub use todo_list::TodoList;
pub use create_modal::{AddButton, CreateModal};
pub use toast::ToastView;
