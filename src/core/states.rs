//! Shared active-index coordination between sibling views
//!
//! Siblings never reference each other. Each one publishes its own index
//! to a shared [`StatesProvider`] when it activates and listens for the
//! provider's broadcast to learn when someone else took over.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::reactive::{Observable, Subscription};

/// Opaque identifier of a view within its collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewIndex(String);

impl ViewIndex {
    pub fn new(index: impl Into<String>) -> Self {
        Self(index.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ViewIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ViewIndex {
    fn from(index: &str) -> Self {
        Self::new(index)
    }
}

impl From<String> for ViewIndex {
    fn from(index: String) -> Self {
        Self(index)
    }
}

/// Holder of the currently active sibling index
///
/// Writes are last-write-wins and must reach every subscriber before
/// `set_active_index` returns.
pub trait StatesProvider {
    /// Index of the active view, if any
    fn active_index(&self) -> Option<ViewIndex>;

    /// Publish `index` as the active view
    fn set_active_index(&self, index: ViewIndex);

    /// Listen for changes of the active index
    fn subscribe_active_index(
        &self,
        callback: Box<dyn Fn(&Option<ViewIndex>)>,
    ) -> Subscription;
}

/// Default provider backed by an observable
#[derive(Debug, Clone)]
pub struct SharedStates {
    active_index: Observable<Option<ViewIndex>>,
}

impl SharedStates {
    pub fn new() -> Self {
        Self {
            active_index: Observable::new(None),
        }
    }

    /// Clear the active index, which deactivates every listening view
    pub fn clear_active_index(&self) {
        self.active_index.set(None);
    }
}

impl Default for SharedStates {
    fn default() -> Self {
        Self::new()
    }
}

impl StatesProvider for SharedStates {
    fn active_index(&self) -> Option<ViewIndex> {
        self.active_index.get()
    }

    fn set_active_index(&self, index: ViewIndex) {
        tracing::trace!(%index, "active index published");
        self.active_index.set(Some(index));
    }

    fn subscribe_active_index(
        &self,
        callback: Box<dyn Fn(&Option<ViewIndex>)>,
    ) -> Subscription {
        self.active_index.subscribe(callback)
    }
}
