//! List State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The item cache
//! and the rendered list are the same reactive value, so they cannot drift.

use std::collections::HashSet;

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use reactive_stores::Store;

use crate::config::{messages, AppConfig};
use crate::controller::ListView;
use crate::dom;
use crate::models::{validate_title, Todo, TodoId};

pub const CREATE_INPUT_ID: &str = "new-todo-title";

// ========================
// Item cache
// ========================

/// In-memory mirror of the displayed list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TodoCache {
    items: Vec<Todo>,
    /// `None` until the first load, and after `invalidate`
    loaded_at: Option<f64>,
}

impl TodoCache {
    /// Replace everything. Duplicate ids keep their first occurrence.
    pub fn replace(&mut self, items: Vec<Todo>, now_ms: f64) {
        let mut seen = HashSet::new();
        self.items = items.into_iter().filter(|t| seen.insert(t.id.clone())).collect();
        self.loaded_at = Some(now_ms);
    }

    /// Append to the tail; an entry with the same id is replaced in place.
    pub fn push(&mut self, item: Todo) {
        if !self.replace_item(item.clone()) {
            self.items.push(item);
        }
    }

    pub fn items(&self) -> &[Todo] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &TodoId) -> Option<&Todo> {
        self.items.iter().find(|t| &t.id == id)
    }

    /// Swap in the server's copy of an item. Returns false if the id is unknown.
    pub fn replace_item(&mut self, updated: Todo) -> bool {
        match self.items.iter_mut().find(|t| t.id == updated.id) {
            Some(slot) => {
                *slot = updated;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &TodoId) -> bool {
        let before = self.items.len();
        self.items.retain(|t| &t.id != id);
        self.items.len() != before
    }

    pub fn last_id(&self) -> Option<TodoId> {
        self.items.last().map(|t| t.id.clone())
    }

    pub fn is_fresh(&self, now_ms: f64, ttl_ms: u32) -> bool {
        match self.loaded_at {
            Some(at) => now_ms - at < f64::from(ttl_ms),
            None => false,
        }
    }

    pub fn invalidate(&mut self) {
        self.loaded_at = None;
    }
}

// ========================
// Toast
// ========================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToastKind {
    Error,
    #[default]
    Status,
}

impl ToastKind {
    pub fn aria_role(&self) -> &'static str {
        match self {
            ToastKind::Error => "alert",
            ToastKind::Status => "status",
        }
    }

    pub fn aria_live(&self) -> &'static str {
        match self {
            ToastKind::Error => "assertive",
            ToastKind::Status => "polite",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            ToastKind::Error => "toast error",
            ToastKind::Status => "toast status",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToastPhase {
    #[default]
    Hidden,
    Visible,
    /// Fading out
    Hiding,
}

/// The single shared toast. Each `show` bumps the generation so timers
/// scheduled for an earlier message become no-ops.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ToastState {
    pub text: String,
    pub kind: ToastKind,
    pub phase: ToastPhase,
    generation: u64,
}

impl ToastState {
    pub fn show(&mut self, text: impl Into<String>, kind: ToastKind) -> u64 {
        self.text = text.into();
        self.kind = kind;
        self.phase = ToastPhase::Visible;
        self.generation += 1;
        self.generation
    }

    pub fn begin_hide(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.phase != ToastPhase::Visible {
            return false;
        }
        self.phase = ToastPhase::Hiding;
        true
    }

    pub fn remove(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.phase == ToastPhase::Hidden {
            return false;
        }
        self.phase = ToastPhase::Hidden;
        true
    }

    pub fn is_shown(&self) -> bool {
        self.phase != ToastPhase::Hidden
    }
}

// ========================
// Store
// ========================

/// View state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct TodoState {
    pub cache: TodoCache,
    pub loading: bool,
    pub toast: ToastState,
    pub modal_open: bool,
    /// Value of the creation input
    pub new_title: String,
}

pub type TodoStore = Store<TodoState>;

/// Get the store from context
pub fn use_todo_store() -> TodoStore {
    expect_context::<TodoStore>()
}

/// `ListView` backed by the reactive store.
#[derive(Clone, Copy)]
pub struct StoreView {
    store: TodoStore,
    toast_visible_ms: u32,
    toast_fade_ms: u32,
    cache_ttl_ms: u32,
}

impl StoreView {
    pub fn new(store: TodoStore, config: &AppConfig) -> Self {
        Self {
            store,
            toast_visible_ms: config.toast_visible_ms,
            toast_fade_ms: config.toast_fade_ms,
            cache_ttl_ms: config.cache_ttl_ms,
        }
    }
}

impl ListView for StoreView {
    fn display_items(&self, items: Vec<Todo>) {
        log::debug!("[VIEW] Rendering {} items", items.len());
        self.store.cache().write().replace(items, js_sys::Date::now());
    }

    fn add_item(&self, item: Todo) {
        self.store.cache().write().push(item);
    }

    fn items(&self) -> Vec<Todo> {
        self.store.cache().read_untracked().items().to_vec()
    }

    fn cache_is_fresh(&self) -> bool {
        self.store
            .cache()
            .read_untracked()
            .is_fresh(js_sys::Date::now(), self.cache_ttl_ms)
    }

    fn invalidate_cache(&self) {
        self.store.cache().write().invalidate();
    }

    fn show_loading(&self) {
        self.store.loading().set(true);
    }

    fn hide_loading(&self) {
        self.store.loading().set(false);
    }

    fn show_message(&self, text: &str, kind: ToastKind) {
        let generation = self.store.toast().write().show(text, kind);
        let store = self.store;
        let fade_ms = self.toast_fade_ms;
        Timeout::new(self.toast_visible_ms, move || {
            if store.toast().write().begin_hide(generation) {
                Timeout::new(fade_ms, move || {
                    store.toast().write().remove(generation);
                })
                .forget();
            }
        })
        .forget();
    }

    fn open_create(&self) {
        self.store.new_title().set(String::new());
        self.store.modal_open().set(true);
        request_animation_frame(|| dom::focus_by_id(CREATE_INPUT_ID));
    }

    fn close_create(&self) {
        self.store.modal_open().set(false);
        self.store.new_title().set(String::new());
    }

    fn validate_title(&self, title: &str) -> Option<String> {
        match validate_title(title) {
            Ok(title) => Some(title),
            Err(_) => {
                dom::alert(messages::EMPTY_TITLE);
                dom::focus_by_id(CREATE_INPUT_ID);
                None
            }
        }
    }

    fn input_title(&self) -> String {
        self.store.new_title().get_untracked().trim().to_string()
    }
}
