//! Waste Dashboard Frontend Entry Point

mod access;
mod api;
mod app;
mod cache;
mod components;
mod config;
mod context;
mod download;
mod error;
mod filters;
mod hooks;
mod models;
mod pages;
mod pivot;
mod record_form;
mod session;
mod slug;
mod storage;
mod store;
#[cfg(test)]
mod testing;

use app::App;
use config::AppConfig;
use leptos::prelude::*;
use tracing_wasm::WASMLayerConfigBuilder;

fn main() {
    console_error_panic_hook::set_once();
    let config = AppConfig::from_build_env();
    tracing_wasm::set_as_global_default_with_config(
        WASMLayerConfigBuilder::new().set_max_level(config.log_level).build(),
    );
    mount_to_body(App);
}
