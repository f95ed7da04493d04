#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! The booth analysis pipeline: categorization, spatial cell aggregation,
//! predicate filtering, and the sorted/paginated table view.
//!
//! Every function here is a pure transformation over an in-memory booth
//! slice. State (which filters are active, which page is shown) lives in
//! `booth_map_app`; this crate just applies whatever it is handed.

pub mod category;
pub mod cells;
pub mod filter;
pub mod table;
