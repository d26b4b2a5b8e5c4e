#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the alert map application.
//!
//! Serves the REST API for submitting and browsing sighting reports,
//! managing notification settings, and reading the static directory, plus
//! the frontend bundle from `app/dist`. Collections are hydrated from the
//! store at startup and persisted wholesale on every mutation; report
//! submission runs validate → persist → match → dispatch synchronously
//! within the request.

pub mod bootstrap;
mod handlers;

use std::sync::{Arc, PoisonError, RwLock};

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use alert_map_database::{JsonStore, Store, StoreError};
use alert_map_notify::{ChannelSender, LogSender};
use alert_map_sighting_models::Report;
use alert_map_user_models::User;

/// Shared application state.
///
/// The collections live in memory behind `RwLock`s — there is one logical
/// writer per collection (one user action, one state transition) and the
/// store is only the durability layer underneath.
pub struct AppState {
    /// Durability layer for the collections.
    pub store: Arc<dyn Store + Send + Sync>,
    /// The users collection, hydrated at startup.
    pub users: RwLock<Vec<User>>,
    /// The report collection, newest first, hydrated at startup.
    pub reports: RwLock<Vec<Report>>,
    /// Transport for delivery intents.
    pub sender: Arc<dyn ChannelSender + Send + Sync>,
    /// Public base URL used for SMS deep links.
    pub origin: String,
}

impl AppState {
    /// Hydrates the collections from `store`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if either collection cannot be loaded.
    pub fn hydrate(
        store: Arc<dyn Store + Send + Sync>,
        sender: Arc<dyn ChannelSender + Send + Sync>,
        origin: String,
    ) -> Result<Self, StoreError> {
        let users = store.load_users()?;
        let reports = store.load_reports()?;
        log::info!(
            "Hydrated {} user(s) and {} report(s) from the store",
            users.len(),
            reports.len()
        );
        Ok(Self {
            store,
            users: RwLock::new(users),
            reports: RwLock::new(reports),
            sender,
            origin,
        })
    }

    pub(crate) fn users_snapshot(&self) -> Vec<User> {
        self.users
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Registers the `/api` routes. Shared between [`run_server`] and the
/// handler tests.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/sighting-types", web::get().to(handlers::sighting_types))
            .route("/reports", web::get().to(handlers::list_reports))
            .route("/reports", web::post().to(handlers::submit_report))
            .route("/reports/{id}", web::delete().to(handlers::delete_report))
            .route("/users", web::post().to(handlers::register))
            .route("/users/{id}", web::get().to(handlers::get_user))
            .route(
                "/users/{id}/settings",
                web::put().to(handlers::update_settings),
            )
            .route("/lawyers", web::get().to(handlers::lawyers))
            .route("/facilities", web::get().to(handlers::facilities))
            .route("/news", web::get().to(handlers::news))
            .route("/lawsuits", web::get().to(handlers::lawsuits)),
    );
}

/// Starts the alert map API server.
///
/// Opens the JSON store, runs the idempotent bootstrap seeding step,
/// hydrates the collections, and starts the Actix-Web HTTP server. This
/// is a regular async function — the caller provides the async runtime
/// (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
///
/// # Panics
///
/// Panics if the store cannot be opened or the bootstrap step fails.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| "data/store".to_string());
    log::info!("Opening store at {data_dir}...");
    let store: Arc<dyn Store + Send + Sync> =
        Arc::new(JsonStore::open(data_dir).expect("Failed to open store"));

    log::info!("Running bootstrap seeding...");
    bootstrap::run(store.as_ref()).expect("Failed to run bootstrap seeding");

    let origin =
        std::env::var("APP_ORIGIN").unwrap_or_else(|_| "http://localhost:8080".to_string());

    let state = web::Data::new(
        AppState::hydrate(store, Arc::new(LogSender), origin)
            .expect("Failed to hydrate application state"),
    );

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure_api)
            // Serve frontend static files (production)
            .service(Files::new("/", "app/dist").index_file("index.html"))
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
