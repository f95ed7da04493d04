#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Standalone entry point for the booth map API server.

use booth_map_server::{ServeOptions, run_server};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let options = ServeOptions::from_env();
    log::info!(
        "Serving fixtures from {} and frontend from {}",
        options.data_dir.display(),
        options.frontend_dir.display()
    );

    run_server(options).await
}
