//! Application Controller
//!
//! Runs the create / edit / toggle / delete / refresh workflows against a
//! `TodoApi` and reflects the outcome in a `ListView`. The cache is only
//! touched after the server confirmed a change.

use std::rc::Rc;

use crate::api::TodoApi;
use crate::config::messages;
use crate::error::{Result, TodoError};
use crate::models::{validate_title, Todo, TodoId, TodoPatch};
use crate::store::ToastKind;

/// What the controller needs from the list view.
pub trait ListView {
    /// Replace the cache and the rendered rows together
    fn display_items(&self, items: Vec<Todo>);
    /// Append one row after a create
    fn add_item(&self, item: Todo);
    /// Snapshot of the cache
    fn items(&self) -> Vec<Todo>;
    fn cache_is_fresh(&self) -> bool;
    fn invalidate_cache(&self);
    fn show_loading(&self);
    fn hide_loading(&self);
    fn show_message(&self, text: &str, kind: ToastKind);
    fn open_create(&self);
    fn close_create(&self);
    /// Trimmed title, or `None` after telling the user why not
    fn validate_title(&self, title: &str) -> Option<String>;
    /// Trimmed value of the creation input
    fn input_title(&self) -> String;
}

pub struct TodoController<A, V> {
    api: Rc<A>,
    view: V,
}

impl<A, V: Clone> Clone for TodoController<A, V> {
    fn clone(&self) -> Self {
        Self { api: Rc::clone(&self.api), view: self.view.clone() }
    }
}

impl<A: TodoApi, V: ListView> TodoController<A, V> {
    pub fn new(api: A, view: V) -> Self {
        Self { api: Rc::new(api), view }
    }

    /// Initial load
    pub async fn init(&self) -> Result<Option<TodoId>> {
        log::info!("[APP] Initializing");
        self.refresh(true).await
    }

    /// Reload the list. Without `force`, a fresh non-empty cache is reused
    /// and the last cached id is returned without hitting the server.
    pub async fn refresh(&self, force: bool) -> Result<Option<TodoId>> {
        if !force && self.view.cache_is_fresh() {
            let cached = self.view.items();
            if let Some(last) = cached.last() {
                log::debug!("[APP] Cache fresh, skipping fetch ({} items)", cached.len());
                return Ok(Some(last.id.clone()));
            }
        }

        self.view.show_loading();
        let result = self.api.fetch_list().await;
        self.view.hide_loading();

        match result {
            Ok(items) => {
                log::info!("[APP] Loaded {} items", items.len());
                let last = items.last().map(|t| t.id.clone());
                self.view.display_items(items);
                Ok(last)
            }
            Err(e) => {
                self.report(&e, messages::LOAD_FAILED);
                Err(e)
            }
        }
    }

    pub fn open_create(&self) {
        self.view.open_create();
    }

    pub fn close_create(&self) {
        self.view.close_create();
    }

    /// Create from the modal input. `Ok(None)` means validation stopped it
    /// (the user was already told).
    pub async fn create(&self) -> Result<Option<Todo>> {
        let Some(title) = self.view.validate_title(&self.view.input_title()) else {
            return Ok(None);
        };

        let result = self.api.create(&title).await;
        self.view.close_create();

        match result {
            Ok(todo) => {
                log::info!("[APP] Created {}", todo.id);
                self.view.add_item(todo.clone());
                self.view.invalidate_cache();
                self.view.show_message(messages::CREATED, ToastKind::Status);
                Ok(Some(todo))
            }
            Err(e) => {
                self.report(&e, messages::CREATE_FAILED);
                Err(e)
            }
        }
    }

    /// Patch the given fields; `None` means unchanged.
    pub async fn edit(
        &self,
        id: &TodoId,
        title: Option<String>,
        completed: Option<bool>,
    ) -> Result<Todo> {
        let title = match title {
            Some(t) => match validate_title(&t) {
                Ok(t) => Some(t),
                Err(e) => {
                    self.report(&e, messages::UPDATE_FAILED);
                    return Err(e);
                }
            },
            None => None,
        };

        let patch = TodoPatch::new(title, completed);
        if patch.is_empty() {
            return self
                .view
                .items()
                .into_iter()
                .find(|t| &t.id == id)
                .ok_or_else(|| TodoError::Other(format!("unknown todo {}", id)));
        }

        match self.api.update(id, &patch).await {
            Ok(updated) => {
                let mut items = self.view.items();
                match items.iter_mut().find(|t| t.id == updated.id) {
                    Some(slot) => *slot = updated.clone(),
                    None => log::warn!("[APP] Updated {} is no longer cached", updated.id),
                }
                self.view.display_items(items);
                self.view.invalidate_cache();
                Ok(updated)
            }
            Err(e) => {
                self.report(&e, messages::UPDATE_FAILED);
                Err(e)
            }
        }
    }

    /// Toggle is an edit that only carries the completion flag.
    pub async fn toggle(&self, id: &TodoId, completed: bool) -> Result<Todo> {
        self.edit(id, None, Some(completed)).await
    }

    /// Delete after `confirm` agreed. `Ok(false)` if the user declined.
    pub async fn delete_confirmed(
        &self,
        id: &TodoId,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Result<bool> {
        if !confirm(messages::CONFIRM_DELETE) {
            log::debug!("[APP] Delete of {} declined", id);
            return Ok(false);
        }
        self.delete(id).await
    }

    pub async fn delete(&self, id: &TodoId) -> Result<bool> {
        match self.api.delete(id).await {
            Ok(deleted) => {
                let items = self.view.items().into_iter().filter(|t| &t.id != id).collect();
                self.view.display_items(items);
                self.view.invalidate_cache();
                self.view.show_message(messages::DELETED, ToastKind::Status);
                Ok(deleted)
            }
            Err(e) => {
                self.report(&e, messages::DELETE_FAILED);
                Err(e)
            }
        }
    }

    fn report(&self, error: &TodoError, fallback: &str) {
        log::error!("[APP] {}: {}", error.kind().as_str(), error);
        self.view.show_message(&error.user_message(fallback), ToastKind::Error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TodoCache;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::cell::{Cell, RefCell};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        List,
        Create(String),
        Update(TodoId, serde_json::Value),
        Delete(TodoId),
    }

    #[derive(Default)]
    struct FakeApi {
        server: RefCell<Vec<Todo>>,
        calls: RefCell<Vec<Call>>,
        fail_with: RefCell<Option<TodoError>>,
        next_id: Cell<i64>,
    }

    impl FakeApi {
        fn with(items: Vec<Todo>) -> Self {
            let next = items.len() as i64 + 1;
            let api = Self { server: RefCell::new(items), ..Default::default() };
            api.next_id.set(next);
            api
        }

        fn failing(error: TodoError) -> Self {
            let api = Self::default();
            *api.fail_with.borrow_mut() = Some(error);
            api
        }

        fn check(&self) -> Result<()> {
            match self.fail_with.borrow().clone() {
                Some(e) => Err(e),
                None => Ok(()),
            }
        }
    }

    #[async_trait(?Send)]
    impl TodoApi for FakeApi {
        async fn fetch_list(&self) -> Result<Vec<Todo>> {
            self.calls.borrow_mut().push(Call::List);
            self.check()?;
            Ok(self.server.borrow().clone())
        }

        async fn create(&self, title: &str) -> Result<Todo> {
            self.calls.borrow_mut().push(Call::Create(title.to_string()));
            self.check()?;
            let id = self.next_id.get();
            self.next_id.set(id + 1);
            let todo = Todo { id: TodoId::num(id), title: title.to_string(), completed: false };
            self.server.borrow_mut().push(todo.clone());
            Ok(todo)
        }

        async fn update(&self, id: &TodoId, patch: &TodoPatch) -> Result<Todo> {
            let body = serde_json::to_value(patch).unwrap();
            self.calls.borrow_mut().push(Call::Update(id.clone(), body));
            self.check()?;
            let mut server = self.server.borrow_mut();
            let todo = server
                .iter_mut()
                .find(|t| &t.id == id)
                .ok_or(TodoError::Http { status: 404 })?;
            if let Some(title) = &patch.title {
                todo.title = title.clone();
            }
            if let Some(completed) = patch.completed {
                todo.completed = completed;
            }
            Ok(todo.clone())
        }

        async fn delete(&self, id: &TodoId) -> Result<bool> {
            self.calls.borrow_mut().push(Call::Delete(id.clone()));
            self.check()?;
            self.server.borrow_mut().retain(|t| &t.id != id);
            Ok(true)
        }
    }

    #[derive(Default)]
    struct ViewInner {
        cache: RefCell<TodoCache>,
        fresh: Cell<bool>,
        loading: Cell<bool>,
        modal_open: Cell<bool>,
        input: RefCell<String>,
        messages: RefCell<Vec<(String, ToastKind)>>,
        alerts: Cell<usize>,
    }

    #[derive(Clone, Default)]
    struct RecordingView(Rc<ViewInner>);

    impl RecordingView {
        fn typed(&self, title: &str) {
            self.0.modal_open.set(true);
            *self.0.input.borrow_mut() = title.to_string();
        }

        fn last_message(&self) -> Option<(String, ToastKind)> {
            self.0.messages.borrow().last().cloned()
        }
    }

    impl ListView for RecordingView {
        fn display_items(&self, items: Vec<Todo>) {
            self.0.cache.borrow_mut().replace(items, 0.0);
            self.0.fresh.set(true);
        }
        fn add_item(&self, item: Todo) {
            self.0.cache.borrow_mut().push(item);
        }
        fn items(&self) -> Vec<Todo> {
            self.0.cache.borrow().items().to_vec()
        }
        fn cache_is_fresh(&self) -> bool {
            self.0.fresh.get()
        }
        fn invalidate_cache(&self) {
            self.0.fresh.set(false);
        }
        fn show_loading(&self) {
            self.0.loading.set(true);
        }
        fn hide_loading(&self) {
            self.0.loading.set(false);
        }
        fn show_message(&self, text: &str, kind: ToastKind) {
            self.0.messages.borrow_mut().push((text.to_string(), kind));
        }
        fn open_create(&self) {
            self.0.modal_open.set(true);
            self.0.input.borrow_mut().clear();
        }
        fn close_create(&self) {
            self.0.modal_open.set(false);
            self.0.input.borrow_mut().clear();
        }
        fn validate_title(&self, title: &str) -> Option<String> {
            match validate_title(title) {
                Ok(t) => Some(t),
                Err(_) => {
                    self.0.alerts.set(self.0.alerts.get() + 1);
                    None
                }
            }
        }
        fn input_title(&self) -> String {
            self.0.input.borrow().trim().to_string()
        }
    }

    fn todo(id: i64, title: &str, completed: bool) -> Todo {
        Todo { id: TodoId::num(id), title: title.to_string(), completed }
    }

    fn controller(api: FakeApi) -> (TodoController<FakeApi, RecordingView>, RecordingView) {
        let view = RecordingView::default();
        (TodoController::new(api, view.clone()), view)
    }

    #[tokio::test]
    async fn test_init_loads_list() {
        let (ctrl, view) = controller(FakeApi::with(vec![todo(1, "A", false), todo(2, "B", true)]));
        let last = ctrl.init().await.unwrap();
        assert_eq!(last, Some(TodoId::num(2)));
        assert_eq!(view.items(), vec![todo(1, "A", false), todo(2, "B", true)]);
        assert!(!view.0.loading.get());
    }

    #[tokio::test]
    async fn test_refresh_reuses_fresh_cache_unless_forced() {
        let (ctrl, _view) = controller(FakeApi::with(vec![todo(1, "A", false)]));
        ctrl.refresh(true).await.unwrap();
        assert_eq!(ctrl.refresh(false).await.unwrap(), Some(TodoId::num(1)));
        assert_eq!(ctrl.api.calls.borrow().len(), 1);

        ctrl.refresh(true).await.unwrap();
        assert_eq!(ctrl.api.calls.borrow().len(), 2);
    }

    #[tokio::test]
    async fn test_refresh_fetches_after_mutation_invalidates() {
        let (ctrl, _view) = controller(FakeApi::with(vec![todo(1, "A", false)]));
        ctrl.refresh(true).await.unwrap();
        ctrl.toggle(&TodoId::num(1), true).await.unwrap();
        ctrl.refresh(false).await.unwrap();
        assert_eq!(ctrl.api.calls.borrow().iter().filter(|c| **c == Call::List).count(), 2);
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_view_and_reports() {
        let (ctrl, view) = controller(FakeApi::failing(TodoError::Network("Failed to fetch".into())));
        view.display_items(vec![todo(5, "kept", false)]);
        view.invalidate_cache();

        let err = ctrl.refresh(false).await.unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Network);
        assert_eq!(view.items(), vec![todo(5, "kept", false)]);
        assert_eq!(view.last_message(), Some((messages::NETWORK.to_string(), ToastKind::Error)));
        assert!(!view.0.loading.get());
    }

    #[tokio::test]
    async fn test_create_appends_without_reload() {
        let (ctrl, view) = controller(FakeApi::with(vec![todo(1, "a", false), todo(2, "b", false)]));
        ctrl.init().await.unwrap();
        view.typed("  Walk dog ");

        let created = ctrl.create().await.unwrap().unwrap();
        assert_eq!(created.title, "Walk dog");
        assert_eq!(
            view.items(),
            vec![todo(1, "a", false), todo(2, "b", false), todo(3, "Walk dog", false)]
        );
        assert!(!view.0.modal_open.get());
        assert_eq!(
            *ctrl.api.calls.borrow(),
            vec![Call::List, Call::Create("Walk dog".to_string())]
        );
    }

    #[tokio::test]
    async fn test_create_with_blank_title_aborts_before_network() {
        let (ctrl, view) = controller(FakeApi::default());
        view.typed("   ");
        assert_eq!(ctrl.create().await.unwrap(), None);
        assert!(ctrl.api.calls.borrow().is_empty());
        assert_eq!(view.0.alerts.get(), 1);
        assert!(view.0.modal_open.get());
        assert!(view.0.messages.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_failed_create_closes_modal_and_leaves_cache() {
        let (ctrl, view) = controller(FakeApi::failing(TodoError::Other("boom".into())));
        view.display_items(vec![todo(1, "A", false)]);
        view.typed("New");

        assert!(ctrl.create().await.is_err());
        assert!(!view.0.modal_open.get());
        assert_eq!(view.items(), vec![todo(1, "A", false)]);
        let (text, kind) = view.last_message().unwrap();
        assert!(text.contains(messages::CREATE_FAILED));
        assert_eq!(kind, ToastKind::Error);
    }

    #[tokio::test]
    async fn test_toggle_sends_only_completed() {
        let (ctrl, view) = controller(FakeApi::with(vec![todo(1, "A", false)]));
        ctrl.init().await.unwrap();

        ctrl.toggle(&TodoId::num(1), true).await.unwrap();
        let updates: Vec<_> = ctrl
            .api
            .calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, Call::Update(..)))
            .cloned()
            .collect();
        assert_eq!(
            updates,
            vec![Call::Update(TodoId::num(1), serde_json::json!({ "completed": true }))]
        );
        assert_eq!(view.items(), vec![todo(1, "A", true)]);
    }

    #[tokio::test]
    async fn test_edit_replaces_entry_with_server_echo() {
        let api = FakeApi::with(vec![todo(1, "Buy milk", false), todo(2, "B", false)]);
        let (ctrl, view) = controller(api);
        ctrl.init().await.unwrap();

        let updated = ctrl.edit(&TodoId::from("1"), Some("Buy bread".into()), None).await.unwrap();
        assert_eq!(updated, todo(1, "Buy bread", false));
        assert_eq!(view.items(), vec![todo(1, "Buy bread", false), todo(2, "B", false)]);
    }

    #[tokio::test]
    async fn test_edit_rejects_blank_title_without_network() {
        let (ctrl, view) = controller(FakeApi::with(vec![todo(1, "A", false)]));
        ctrl.init().await.unwrap();

        let err = ctrl.edit(&TodoId::num(1), Some("  ".into()), None).await.unwrap_err();
        assert_eq!(err, TodoError::EmptyTitle);
        assert_eq!(*ctrl.api.calls.borrow(), vec![Call::List]);
        assert_eq!(view.items(), vec![todo(1, "A", false)]);
    }

    #[tokio::test]
    async fn test_failed_edit_leaves_cache() {
        let (ctrl, view) = controller(FakeApi::failing(TodoError::Server { status: 500 }));
        view.display_items(vec![todo(1, "A", false)]);

        let err = ctrl.edit(&TodoId::num(1), Some("B".into()), None).await.unwrap_err();
        assert_eq!(err, TodoError::Server { status: 500 });
        assert_eq!(view.items(), vec![todo(1, "A", false)]);
        assert_eq!(view.last_message(), Some((messages::SERVER.to_string(), ToastKind::Error)));
    }

    #[tokio::test]
    async fn test_delete_declined_keeps_item() {
        let (ctrl, view) = controller(FakeApi::with(vec![todo(1, "A", false)]));
        ctrl.init().await.unwrap();

        let deleted = ctrl.delete_confirmed(&TodoId::num(1), |_| false).await.unwrap();
        assert!(!deleted);
        assert_eq!(view.items(), vec![todo(1, "A", false)]);
        assert_eq!(*ctrl.api.calls.borrow(), vec![Call::List]);
    }

    #[tokio::test]
    async fn test_delete_confirmed_removes_item() {
        let (ctrl, view) = controller(FakeApi::with(vec![todo(1, "A", false), todo(2, "B", false)]));
        ctrl.init().await.unwrap();

        let mut prompt = String::new();
        let deleted = ctrl
            .delete_confirmed(&TodoId::num(1), |msg| {
                prompt = msg.to_string();
                true
            })
            .await
            .unwrap();
        assert!(deleted);
        assert_eq!(prompt, messages::CONFIRM_DELETE);
        assert_eq!(view.items(), vec![todo(2, "B", false)]);
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_item() {
        let (ctrl, view) = controller(FakeApi::failing(TodoError::Timeout { after_ms: 10 }));
        view.display_items(vec![todo(1, "A", false)]);

        assert!(ctrl.delete(&TodoId::num(1)).await.is_err());
        assert_eq!(view.items(), vec![todo(1, "A", false)]);
        assert_eq!(view.last_message(), Some((messages::TIMEOUT.to_string(), ToastKind::Error)));
    }

    #[tokio::test]
    async fn test_scenario_toggle_after_fetch() {
        let (ctrl, view) = controller(FakeApi::with(vec![todo(1, "A", false)]));
        ctrl.init().await.unwrap();
        ctrl.toggle(&TodoId::num(1), true).await.unwrap();
        assert_eq!(view.items(), vec![todo(1, "A", true)]);
    }
}
