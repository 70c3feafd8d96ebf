//! HTTP Transport
//!
//! Frontend bindings to the `/todos` REST resource.

use async_trait::async_trait;
use gloo_net::http::{Method, RequestBuilder, Response};
use gloo_timers::callback::Timeout;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use web_sys::AbortController;

use crate::config::endpoints;
use crate::error::{classify_status, Result, TodoError};
use crate::models::{validate_title, NewTodo, Todo, TodoId, TodoPatch};

/// Operations the controller needs from the data server.
#[async_trait(?Send)]
pub trait TodoApi {
    /// Fetch the full list
    async fn fetch_list(&self) -> Result<Vec<Todo>>;

    /// Create a todo; the server assigns the id
    async fn create(&self, title: &str) -> Result<Todo>;

    /// Update only the fields present in `patch`
    async fn update(&self, id: &TodoId, patch: &TodoPatch) -> Result<Todo>;

    /// Delete a todo
    async fn delete(&self, id: &TodoId) -> Result<bool>;
}

/// `TodoApi` over `fetch`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    timeout_ms: u32,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, timeout_ms: u32) -> Self {
        Self { base_url: base_url.into(), timeout_ms }
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<(Response, Deadline)> {
        log::debug!("[API] {:?} {}", method, url);
        let deadline = Deadline::start(self.timeout_ms);

        let builder = RequestBuilder::new(url)
            .method(method.clone())
            .header("Content-Type", "application/json")
            .abort_signal(deadline.signal().as_ref());

        let request = match body {
            Some(body) => {
                let json = serde_json::to_string(body).map_err(|e| TodoError::Other(e.to_string()))?;
                builder.body(json)
            }
            None => builder.build(),
        }
        .map_err(|e| classify_fetch_error(e, self.timeout_ms))?;

        let response = request
            .send()
            .await
            .map_err(|e| classify_fetch_error(e, self.timeout_ms))?;

        let status = response.status();
        if !(200..300).contains(&status) {
            log::warn!("[API] {:?} {} -> HTTP {}", method, url, status);
            return Err(classify_status(status));
        }
        Ok((response, deadline))
    }

    async fn send_json<B, T>(&self, method: Method, url: &str, body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        // the deadline stays armed until the body has been read
        let (response, _deadline) = self.send(method, url, body).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| classify_fetch_error(e, self.timeout_ms))
    }
}

#[async_trait(?Send)]
impl TodoApi for HttpTransport {
    async fn fetch_list(&self) -> Result<Vec<Todo>> {
        let url = endpoints::todos_url(&self.base_url);
        let body: Value = self.send_json::<(), _>(Method::GET, &url, None).await?;
        decode_list(body)
    }

    async fn create(&self, title: &str) -> Result<Todo> {
        let title = validate_title(title)?;
        let url = endpoints::todos_url(&self.base_url);
        self.send_json(Method::POST, &url, Some(&NewTodo::new(&title))).await
    }

    async fn update(&self, id: &TodoId, patch: &TodoPatch) -> Result<Todo> {
        let url = endpoints::todo_url(&self.base_url, id);
        self.send_json(Method::PATCH, &url, Some(patch)).await
    }

    async fn delete(&self, id: &TodoId) -> Result<bool> {
        let url = endpoints::todo_url(&self.base_url, id);
        self.send::<()>(Method::DELETE, &url, None).await?;
        Ok(true)
    }
}

/// Aborts the in-flight request, body read included, when the timer fires.
/// Dropping it cancels the timer.
struct Deadline {
    controller: Option<AbortController>,
    _timer: Option<Timeout>,
}

impl Deadline {
    fn start(timeout_ms: u32) -> Self {
        if timeout_ms == 0 {
            return Self { controller: None, _timer: None };
        }
        match AbortController::new() {
            Ok(controller) => {
                let on_fire = controller.clone();
                let timer = Timeout::new(timeout_ms, move || on_fire.abort());
                Self { controller: Some(controller), _timer: Some(timer) }
            }
            Err(e) => {
                log::warn!("[API] AbortController unavailable, no deadline: {:?}", e);
                Self { controller: None, _timer: None }
            }
        }
    }

    fn signal(&self) -> Option<web_sys::AbortSignal> {
        self.controller.as_ref().map(|c| c.signal())
    }
}

fn classify_fetch_error(error: gloo_net::Error, timeout_ms: u32) -> TodoError {
    match error {
        gloo_net::Error::JsError(js) => classify_js_error(&js.name, &js.message, timeout_ms),
        gloo_net::Error::SerdeError(e) => TodoError::InvalidResponse(e.to_string()),
        gloo_net::Error::GlooError(msg) => TodoError::Other(msg),
    }
}

/// `AbortError` only comes from our own deadline; any other JS exception
/// thrown by `fetch` (e.g. `TypeError: Failed to fetch`) is a network failure.
pub fn classify_js_error(name: &str, message: &str, timeout_ms: u32) -> TodoError {
    if name == "AbortError" {
        TodoError::Timeout { after_ms: timeout_ms }
    } else {
        TodoError::Network(format!("{}: {}", name, message))
    }
}

/// The list endpoint must return an array.
pub fn decode_list(body: Value) -> Result<Vec<Todo>> {
    if !body.is_array() {
        return Err(TodoError::InvalidResponse("expected an array of todos".to_string()));
    }
    serde_json::from_value(body).map_err(|e| TodoError::InvalidResponse(e.to_string()))
}
