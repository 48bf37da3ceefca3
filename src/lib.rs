//! Maintenance job tracking API.
//!
//! Library crate backing the `mro-api` binary: configuration, persistence,
//! the technician directory, the maintenance job registry with its
//! filter/sort/paginate pipeline, and the HTTP surface.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod migrator;
pub mod models;
pub mod openapi;
pub mod seed;
pub mod services;

use std::sync::Arc;

/// Shared application state handed to every HTTP handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<db::DbPool>,
    pub config: config::AppConfig,
    pub services: handlers::AppServices,
}

impl AppState {
    pub fn new(db: Arc<db::DbPool>, config: config::AppConfig) -> Self {
        let services = handlers::AppServices::new(db.clone());
        Self {
            db,
            config,
            services,
        }
    }
}
