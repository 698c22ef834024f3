//! Core module - Bookmark view state, data and sibling coordination

pub mod data;
pub mod mode;
pub mod states;
pub mod view;

pub use data::{ExportedView, Items, ViewData};
pub use mode::EditState;
pub use states::{SharedStates, StatesProvider, ViewIndex};
pub use view::BookmarkView;
