//! Todo List Frontend Entry Point

mod models;
mod error;
mod config;
mod api;
mod dom;
mod inline_edit;
mod store;
mod controller;
mod context;
mod components;
mod app;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    })
    .ok();

    mount_to_body(App);
}
