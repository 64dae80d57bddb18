//! Core library for flagdex
//!
//! This crate implements the **Functional Core** of the flagdex application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`flagdex_core`** (this crate): Pure transformation functions with zero I/O
//! - **`flagdex`**: HTTP, persistence and terminal output (the Imperative Shell)
//!
//! Every function here takes plain data and returns plain data. Time, network
//! and storage are supplied by the caller, so the whole crate is testable with
//! fixture values.
//!
//! # Module Organization
//!
//! - [`country`]: The country model as returned by the REST Countries API
//! - [`api`]: URL construction and status classification for the API
//! - [`collate`]: Locale-aware string comparison used for name ordering
//! - [`filter`]: The filter/sort engine that derives views from the country list
//! - [`favorites`]: The in-memory favorites list and its invariants
//! - [`compare`]: Side-by-side comparison selection and table rows
//! - [`format`]: Human-readable number, currency and language formatting
//! - [`listing`]: Filtered, paged views ready for output
//! - [`pagination`]: Page bounds for list output
//! - [`retry`]: Retry policy for fallible network operations
//! - [`theme`]: The light/dark theme preference
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use flagdex_core::filter::{apply, Filters};
//!
//! let view = apply(&countries, &Filters::default().with_region("Europe"));
//! assert!(view.iter().all(|c| c.region == "Europe"));
//! ```

pub mod api;
pub mod collate;
pub mod compare;
pub mod country;
pub mod favorites;
pub mod filter;
pub mod format;
pub mod listing;
pub mod pagination;
pub mod retry;
pub mod theme;
