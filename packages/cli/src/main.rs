#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line entry point for the booth map toolchain.
//!
//! Wraps the same application controller the server uses, so every view
//! the dashboard can show is also scriptable: list constituencies, dump
//! a table page or the spatial cells as JSON, or print a classification
//! breakdown straight from the fixture files.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use booth_map_analytics::category::categorize_booth;
use booth_map_analytics_models::{SortColumn, SortState};
use booth_map_app::{AppController, Command};
use booth_map_booth_models::Category;
use booth_map_data::FsDataSource;
use booth_map_server::{ServeOptions, run_server};
use booth_map_server_models::{ApiBoothRow, ApiCell, ApiTablePage};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "booth_map", about = "Booth-level election dashboard toolchain")]
struct Cli {
    /// Directory holding `master.json` and the constituency detail files
    #[arg(long, global = true, default_value = "frontend/data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server (`BIND_ADDR` / `PORT` configure the listener)
    Serve,
    /// List districts and constituencies from the master document
    Constituencies,
    /// Print the aggregate summary for one constituency as JSON
    Summary {
        /// Constituency name (case-insensitive)
        constituency: String,
    },
    /// Print one page of the filtered, sorted booth table as JSON
    Booths {
        /// Constituency name (case-insensitive)
        constituency: String,
        /// Village name to filter by
        #[arg(long)]
        area: Option<String>,
        /// Category to filter by (`strong-dmk`, `strong-aiadmk`, `swing`)
        #[arg(long)]
        category: Option<Category>,
        /// Free-text search over booth number, village, and building
        #[arg(long)]
        search: Option<String>,
        /// Column to sort by (camelCase column name, e.g. `marginPct`)
        #[arg(long)]
        sort_by: Option<SortColumn>,
        /// Sort descending
        #[arg(long)]
        desc: bool,
        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Print the spatial cell aggregates for the map overlay as JSON
    Cells {
        /// Constituency name (case-insensitive)
        constituency: String,
        /// Village name to filter by
        #[arg(long)]
        area: Option<String>,
        /// Category to filter by
        #[arg(long)]
        category: Option<Category>,
    },
    /// Recompute booth categories and print the breakdown
    Classify {
        /// Constituency name (case-insensitive)
        constituency: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve => {
            let mut options = ServeOptions::from_env();
            options.data_dir = cli.data_dir;
            log::info!("Serving fixtures from {}", options.data_dir.display());
            // The server uses actix-web's runtime, so run it in a blocking
            // task to avoid nesting tokio runtimes.
            tokio::task::spawn_blocking(move || {
                actix_web::rt::System::new().block_on(run_server(options))
            })
            .await??;
        }
        Commands::Constituencies => {
            let controller = idle_controller(&cli.data_dir).await?;
            let master = controller.master();
            println!("{} {}", master.state, master.election_year);
            for district in &master.districts {
                println!("  {} ({})", district.name, district.code);
                for c in &district.constituencies {
                    let geocoded = if c.has_geocoding { "  [geocoded]" } else { "" };
                    println!(
                        "    {}  {:<24}  {:<4}  {} booths{geocoded}",
                        c.ac_number, c.name, c.kind, c.total_booths
                    );
                }
            }
        }
        Commands::Summary { constituency } => {
            let controller = loaded_controller(&cli.data_dir, &constituency).await?;
            if let Some(session) = controller.session() {
                println!("{}", serde_json::to_string_pretty(&session.summary)?);
            }
        }
        Commands::Booths {
            constituency,
            area,
            category,
            search,
            sort_by,
            desc,
            page,
        } => {
            let mut controller = loaded_controller(&cli.data_dir, &constituency).await?;
            controller.dispatch(Command::SetAreaFilter(area)).await?;
            controller
                .dispatch(Command::SetCategoryFilter(category))
                .await?;
            controller
                .dispatch(Command::SetSearch(search.unwrap_or_default()))
                .await?;
            apply_sort(
                &mut controller,
                SortState {
                    column: sort_by.unwrap_or_default(),
                    descending: desc,
                },
            )
            .await?;
            controller.dispatch(Command::ChangePage(page)).await?;

            if let Some(table) = controller.table_page() {
                let out = ApiTablePage {
                    rows: table.rows.iter().map(ApiBoothRow::from).collect(),
                    page: table.page,
                    total_pages: table.total_pages,
                };
                println!("{}", serde_json::to_string_pretty(&out)?);
            }
        }
        Commands::Cells {
            constituency,
            area,
            category,
        } => {
            let mut controller = loaded_controller(&cli.data_dir, &constituency).await?;
            controller.dispatch(Command::SetAreaFilter(area)).await?;
            controller
                .dispatch(Command::SetCategoryFilter(category))
                .await?;

            let cells: Vec<ApiCell> = controller
                .overlay_cells()
                .into_iter()
                .map(ApiCell::from)
                .collect();
            println!("{}", serde_json::to_string_pretty(&cells)?);
        }
        Commands::Classify { constituency } => {
            let controller = loaded_controller(&cli.data_dir, &constituency).await?;
            if let Some(session) = controller.session() {
                classify_report(&session.constituency.name, &session.booths);
            }
        }
    }

    Ok(())
}

/// Builds a controller over the local data directory without loading any
/// constituency.
async fn idle_controller(data_dir: &Path) -> Result<AppController, booth_map_app::AppError> {
    let source = Arc::new(FsDataSource::new(data_dir));
    AppController::new(source).await
}

/// Builds a controller and loads the named constituency.
async fn loaded_controller(
    data_dir: &Path,
    constituency: &str,
) -> Result<AppController, booth_map_app::AppError> {
    let mut controller = idle_controller(data_dir).await?;
    controller
        .dispatch(Command::LoadConstituency(constituency.to_string()))
        .await?;
    Ok(controller)
}

/// Drives the toggle-style sort command to an absolute column and
/// direction.
async fn apply_sort(
    controller: &mut AppController,
    sort: SortState,
) -> Result<(), booth_map_app::AppError> {
    if sort.column != SortColumn::default() {
        controller.dispatch(Command::SetSort(sort.column)).await?;
    }
    if sort.descending {
        controller.dispatch(Command::SetSort(sort.column)).await?;
    }
    Ok(())
}

/// Prints the per-category breakdown of a booth set.
fn classify_report(constituency: &str, booths: &[booth_map_booth_models::Booth]) {
    println!("{constituency}: {} booths", booths.len());

    for category in Category::all() {
        let count = booths
            .iter()
            .filter(|b| categorize_booth(b) == *category)
            .count();
        #[allow(clippy::cast_precision_loss)]
        let pct = if booths.is_empty() {
            0.0
        } else {
            count as f64 / booths.len() as f64 * 100.0
        };
        println!("  {category:<14}  {count:>5}  ({pct:.1}%)");
    }

    let geocoded = booths.iter().filter(|b| b.location.is_some()).count();
    println!("  geocoded        {geocoded:>5}");
}
