//! The data-driven table renderer.
//!
//! [`TableView`] owns a parsed table specification plus a style
//! configuration, derives display cells, builds the header/body/footer node
//! tree, and wires sort and expand/collapse interaction. Detail rows nest
//! further `TableView` instances recursively.

mod build;
mod cells;
mod state;
mod transpose;

pub use state::{SortState, TableView};

use std::sync::atomic::{AtomicUsize, Ordering};

/// Unique identifier for a TableView instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableViewId(usize);

impl TableViewId {
    pub(super) fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for TableViewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__grid_{}", self.0)
    }
}
