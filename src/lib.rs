//! Satisfactory catalog extractor
//!
//! Turns the game's Docs JSON dump into item, recipe and building catalogs
//! and renders them as TypeScript modules.

pub mod buildings;
pub mod classify;
pub mod docs;
pub mod emit;
pub mod error;
pub mod items;
pub mod logging;
pub mod models;
pub mod parse;
pub mod pipeline;
pub mod recipes;
pub mod resolve;
pub mod tables;

pub use docs::{DocsError, RawRecord, RawSection};
pub use error::SkipReason;
pub use pipeline::{Catalog, ExtractStats, extract};
pub use tables::Tables;
