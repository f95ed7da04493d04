#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the booth map dashboard.
//!
//! Serves the REST API backing the constituency dashboard plus the static
//! frontend and the raw JSON fixture files. All booth state lives in one
//! [`booth_map_app::AppController`] behind an async mutex; each request
//! replays its query parameters as controller commands and reads the
//! resulting view back out, so the HTTP layer stays stateless from the
//! client's point of view.

mod handlers;

use std::path::PathBuf;
use std::sync::Arc;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use booth_map_app::AppController;
use booth_map_data::FsDataSource;
use tokio::sync::Mutex;

/// Shared application state.
pub struct AppState {
    /// The single booth dashboard controller, serialized behind a mutex.
    pub controller: Mutex<AppController>,
}

/// Server configuration, resolved from the environment.
#[derive(Debug, Clone)]
pub struct ServeOptions {
    /// Address to bind to.
    pub bind_addr: String,
    /// Port to listen on.
    pub port: u16,
    /// Directory holding `master.json` and the per-constituency files.
    pub data_dir: PathBuf,
    /// Directory holding the built frontend assets.
    pub frontend_dir: PathBuf,
}

impl ServeOptions {
    /// Reads `BIND_ADDR`, `PORT`, `BOOTH_MAP_DATA`, and
    /// `BOOTH_MAP_FRONTEND`, falling back to local-development defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        let data_dir = std::env::var("BOOTH_MAP_DATA")
            .map_or_else(|_| PathBuf::from("frontend/data"), PathBuf::from);
        let frontend_dir = std::env::var("BOOTH_MAP_FRONTEND")
            .map_or_else(|_| PathBuf::from("frontend"), PathBuf::from);
        Self {
            bind_addr,
            port,
            data_dir,
            frontend_dir,
        }
    }
}

/// Builds the controller from the configured data directory and runs the
/// HTTP server until shutdown.
///
/// # Errors
///
/// Returns an `std::io::Result` error if the master document cannot be
/// loaded or the server fails to bind.
pub async fn run_server(options: ServeOptions) -> std::io::Result<()> {
    let source = Arc::new(FsDataSource::new(&options.data_dir));
    let controller = AppController::new(source)
        .await
        .map_err(std::io::Error::other)?;
    let state = web::Data::new(AppState {
        controller: Mutex::new(controller),
    });

    log::info!("Starting server on {}:{}", options.bind_addr, options.port);

    let data_dir = options.data_dir.clone();
    let frontend_dir = options.frontend_dir.clone();
    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(handlers::health))
                    .route("/constituencies", web::get().to(handlers::constituencies))
                    .route("/summary", web::get().to(handlers::summary))
                    .route("/booths", web::get().to(handlers::booths))
                    .route("/cells", web::get().to(handlers::cells)),
            )
            // Serve the raw fixture documents for direct download
            .service(Files::new("/data", data_dir.clone()).show_files_listing())
            // Serve frontend static files (production)
            .service(Files::new("/", frontend_dir.clone()).index_file("index.html"))
    })
    .bind((options.bind_addr, options.port))?
    .run()
    .await
}
