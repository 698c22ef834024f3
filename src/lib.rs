//! gridmarks - Reactive bookmark views for grid controls
//!
//! Each [`BookmarkView`] holds a named snapshot of grid configuration,
//! takes part in an exclusive "active bookmark" selection shared with its
//! siblings through a [`StatesProvider`], and supports renaming in place.

pub mod config;
pub mod core;
pub mod error;
pub mod reactive;

pub use crate::config::{ConfigFile, ViewConfig};
pub use crate::core::{
    BookmarkView, EditState, ExportedView, Items, SharedStates, StatesProvider, ViewData,
    ViewIndex,
};
pub use crate::error::{GridmarksError, Result};
