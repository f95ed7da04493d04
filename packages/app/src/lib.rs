#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Command-driven application controller for the booth dashboard.
//!
//! All mutable dashboard state lives in one [`AppController`]: the loaded
//! constituency session (booths plus every derived structure) and nothing
//! else. UI layers translate user intent into [`Command`] values and read
//! typed views back out; there are no ambient globals and no partial
//! updates. A constituency switch replaces the whole [`Session`] bundle
//! atomically, and a generation counter discards any slower, superseded
//! load that completes late.

use std::collections::BTreeMap;
use std::sync::Arc;

use booth_map_analytics::{cells, filter, table};
use booth_map_analytics_models::{FilterState, SortColumn, SortState, SpatialCell, TablePage};
use booth_map_booth_models::{
    Booth, Category, ConstituencyRef, ConstituencySummary, MasterSummary,
};
use booth_map_data::{BoothDataSource, SourceError, normalize, normalize_master};
use booth_map_data_models::RawConstituency;

/// Errors surfaced by controller commands.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Fetching or parsing a fixture document failed. The previous
    /// session, if any, is left untouched.
    #[error("Load failed: {0}")]
    Load(#[from] SourceError),

    /// The requested constituency is not listed in the master document.
    #[error("Unknown constituency: {0}")]
    UnknownConstituency(String),
}

/// A user intent, decoupled from any particular UI toolkit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Load (or switch to) a constituency by name.
    LoadConstituency(String),
    /// Select a village to filter by, or `None` for all areas.
    SetAreaFilter(Option<String>),
    /// Activate a category filter, replacing any previous one, or
    /// `None` to clear it. Single-select by construction.
    SetCategoryFilter(Option<Category>),
    /// Replace the free-text search string.
    SetSearch(String),
    /// Sort by a column; repeating the active column flips direction.
    SetSort(SortColumn),
    /// Go to an absolute 1-based page, clamped to the navigable range.
    ChangePage(usize),
}

/// Everything derived from one loaded constituency, replaced wholesale
/// on every load.
#[derive(Debug, Clone)]
pub struct Session {
    /// The master-document entry this session was loaded from.
    pub constituency: ConstituencyRef,
    /// Aggregate figures from the detail file.
    pub summary: ConstituencySummary,
    /// Canonical booths with dense identifiers.
    pub booths: Vec<Booth>,
    /// Full-set spatial cell aggregates.
    pub cells: BTreeMap<String, SpatialCell>,
    /// Active filter predicates.
    pub filter: FilterState,
    /// Active sort column and direction.
    pub sort: SortState,
    /// Current 1-based table page.
    pub page: usize,
}

/// Ticket returned by [`AppController::begin_load`], tying an in-flight
/// fetch to the generation it was started under.
#[derive(Debug)]
pub struct LoadTicket {
    generation: u64,
    reference: ConstituencyRef,
}

impl LoadTicket {
    /// The detail file to fetch for this load.
    #[must_use]
    pub fn data_file(&self) -> &str {
        &self.reference.data_file
    }
}

/// Owner of the dashboard's single mutable state bundle.
pub struct AppController {
    source: Arc<dyn BoothDataSource>,
    master: MasterSummary,
    session: Option<Session>,
    generation: u64,
}

impl AppController {
    /// Fetches the master document and builds an idle controller (no
    /// constituency loaded yet).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Load`] if the master document cannot be
    /// fetched or parsed.
    pub async fn new(source: Arc<dyn BoothDataSource>) -> Result<Self, AppError> {
        let master = normalize_master(source.fetch_master().await?);
        log::info!(
            "Loaded master summary: {} {} ({} districts)",
            master.state,
            master.election_year,
            master.districts.len()
        );
        Ok(Self {
            source,
            master,
            session: None,
            generation: 0,
        })
    }

    /// Applies one command.
    ///
    /// Filter, search, and sort changes reset the table to page 1.
    /// Commands that need a loaded session are ignored while idle.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] only for [`Command::LoadConstituency`]; the
    /// synchronous view commands cannot fail.
    pub async fn dispatch(&mut self, command: Command) -> Result<(), AppError> {
        match command {
            Command::LoadConstituency(name) => {
                let ticket = self.begin_load(&name)?;
                let raw = self.source.fetch_constituency(ticket.data_file()).await?;
                self.complete_load(&ticket, raw);
                Ok(())
            }
            Command::SetAreaFilter(area) => {
                if let Some(session) = &mut self.session {
                    session.filter.area = area;
                    session.page = 1;
                }
                Ok(())
            }
            Command::SetCategoryFilter(category) => {
                if let Some(session) = &mut self.session {
                    session.filter.category = category;
                    session.page = 1;
                }
                Ok(())
            }
            Command::SetSearch(search) => {
                if let Some(session) = &mut self.session {
                    session.filter.search = search;
                    session.page = 1;
                }
                Ok(())
            }
            Command::SetSort(column) => {
                if let Some(session) = &mut self.session {
                    if session.sort.column == column {
                        session.sort.descending = !session.sort.descending;
                    } else {
                        session.sort = SortState {
                            column,
                            descending: false,
                        };
                    }
                    session.page = 1;
                }
                Ok(())
            }
            Command::ChangePage(page) => {
                if let Some(session) = &mut self.session {
                    let total = filter::filter(&session.booths, &session.filter)
                        .len()
                        .div_ceil(table::PAGE_SIZE);
                    session.page = page.clamp(1, total.max(1));
                }
                Ok(())
            }
        }
    }

    /// Starts a load: resolves the constituency and bumps the generation
    /// counter so any earlier in-flight load becomes stale.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::UnknownConstituency`] if the name is not in
    /// the master document.
    pub fn begin_load(&mut self, name: &str) -> Result<LoadTicket, AppError> {
        let reference = self
            .master
            .find_constituency(name)
            .ok_or_else(|| AppError::UnknownConstituency(name.to_string()))?
            .clone();

        self.generation += 1;
        Ok(LoadTicket {
            generation: self.generation,
            reference,
        })
    }

    /// Finishes a load, swapping in the new session atomically.
    ///
    /// Returns `false` (and changes nothing) if a newer load started
    /// after this ticket was issued; the stale result is discarded, not
    /// merged.
    pub fn complete_load(&mut self, ticket: &LoadTicket, raw: RawConstituency) -> bool {
        if ticket.generation != self.generation {
            log::info!(
                "Discarding stale load of {} (superseded by a newer switch)",
                ticket.reference.name
            );
            return false;
        }

        let (summary, booths) = normalize(raw);
        let spatial = cells::bucket(&booths, cells::CELL_PRECISION);
        log::info!(
            "Loaded {}: {} booths, {} spatial cells",
            ticket.reference.name,
            booths.len(),
            spatial.len()
        );

        self.session = Some(Session {
            constituency: ticket.reference.clone(),
            summary,
            booths,
            cells: spatial,
            filter: FilterState::default(),
            sort: SortState::default(),
            page: 1,
        });
        true
    }

    /// The district-level master summary.
    #[must_use]
    pub fn master(&self) -> &MasterSummary {
        &self.master
    }

    /// The loaded session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// The current table page: filter, sort, slice.
    ///
    /// Returns `None` while no constituency is loaded.
    #[must_use]
    pub fn table_page(&self) -> Option<TablePage> {
        let session = self.session.as_ref()?;
        let rows = filter::filter(&session.booths, &session.filter);
        let (page_rows, total_pages) =
            table::sort_and_page(rows, &session.sort, session.page, table::PAGE_SIZE);

        Some(TablePage {
            rows: page_rows.into_iter().cloned().collect(),
            page: session.page,
            total_pages,
        })
    }

    /// Spatial cells over the currently filtered booths, for the map
    /// overlay, in key order.
    #[must_use]
    pub fn overlay_cells(&self) -> Vec<SpatialCell> {
        let Some(session) = &self.session else {
            return Vec::new();
        };
        let rows = filter::filter(&session.booths, &session.filter);
        cells::bucket(rows.iter().copied(), cells::CELL_PRECISION)
            .into_values()
            .collect()
    }

    /// Distinct non-empty village names in the loaded set, sorted, for
    /// the area dropdown.
    #[must_use]
    pub fn area_names(&self) -> Vec<String> {
        let Some(session) = &self.session else {
            return Vec::new();
        };
        let mut names: Vec<String> = session
            .booths
            .iter()
            .filter(|b| !b.village.is_empty())
            .map(|b| b.village.clone())
            .collect();
        names.sort();
        names.dedup();
        names
    }
}

#[cfg(test)]
mod tests;
