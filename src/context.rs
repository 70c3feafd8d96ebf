//! Application Context
//!
//! The one handler object rows and dialogs talk to, provided once via the
//! Leptos Context API instead of being passed through every render.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::HttpTransport;
use crate::config::AppConfig;
use crate::controller::TodoController;
use crate::dom;
use crate::models::TodoId;
use crate::store::StoreView;

pub type AppController = TodoController<HttpTransport, StoreView>;

#[derive(Clone, Copy)]
pub struct AppContext {
    controller: StoredValue<AppController, LocalStorage>,
    config: StoredValue<AppConfig>,
}

impl AppContext {
    pub fn new(controller: AppController, config: AppConfig) -> Self {
        Self {
            controller: StoredValue::new_local(controller),
            config: StoredValue::new(config),
        }
    }

    fn controller(&self) -> AppController {
        self.controller.get_value()
    }

    pub fn config(&self) -> AppConfig {
        self.config.get_value()
    }

    /// Initial load
    pub fn init(&self) {
        let ctrl = self.controller();
        spawn_local(async move {
            let _ = ctrl.init().await;
        });
    }

    pub fn refresh(&self, force: bool) {
        let ctrl = self.controller();
        spawn_local(async move {
            let _ = ctrl.refresh(force).await;
        });
    }

    pub fn open_create(&self) {
        self.controller().open_create();
    }

    pub fn close_create(&self) {
        self.controller().close_create();
    }

    pub fn create(&self) {
        let ctrl = self.controller();
        spawn_local(async move {
            let _ = ctrl.create().await;
        });
    }

    /// Commit an inline title edit. `on_rejected` runs if the server refused it.
    pub fn edit_title(&self, id: TodoId, title: String, on_rejected: impl FnOnce() + 'static) {
        let ctrl = self.controller();
        spawn_local(async move {
            if ctrl.edit(&id, Some(title), None).await.is_err() {
                on_rejected();
            }
        });
    }

    pub fn toggle(&self, id: TodoId, completed: bool) {
        let ctrl = self.controller();
        spawn_local(async move {
            let _ = ctrl.toggle(&id, completed).await;
        });
    }

    /// Ask first, then delete.
    pub fn delete(&self, id: TodoId) {
        let ctrl = self.controller();
        spawn_local(async move {
            let _ = ctrl.delete_confirmed(&id, dom::confirm).await;
        });
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
