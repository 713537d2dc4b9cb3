//! Read-through cache of per-type action tables.
//!
//! Keyed by the controller's `TypeId`, so each entry stands for every
//! `(controller type, action name)` pair of that type. Tables are built by
//! running [`Controller::actions`] once and shared as `Arc`s afterwards.

use dashmap::DashMap;
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

use crate::controller::{ActionTable, Controller};

type SharedTable = Arc<dyn Any + Send + Sync>;

/// Concurrent cache of built [`ActionTable`]s.
///
/// Clones share the same storage.
#[derive(Clone, Default)]
pub struct ActionCache {
    tables: Arc<DashMap<TypeId, SharedTable>>,
}

impl fmt::Debug for ActionCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionCache")
            .field("tables", &self.tables.len())
            .finish()
    }
}

impl ActionCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached table for `C`, building it on first use.
    ///
    /// The table is built without holding any map lock, so registration
    /// code may use the cache itself. When two threads race on a cold
    /// entry, the first insert wins and the other build is discarded.
    #[must_use]
    pub fn get_or_build<C: Controller>(&self) -> Arc<ActionTable<C>> {
        let key = TypeId::of::<C>();
        let cached = self.tables.get(&key).map(|entry| Arc::clone(entry.value()));
        let shared = match cached {
            Some(shared) => shared,
            None => {
                let table = ActionTable::<C>::build();
                debug!(
                    controller = std::any::type_name::<C>(),
                    actions = table.len(),
                    "Action table cached"
                );
                let built = Arc::new(table) as SharedTable;
                Arc::clone(self.tables.entry(key).or_insert(built).value())
            }
        };

        match shared.downcast::<ActionTable<C>>() {
            Ok(table) => table,
            // Entries are keyed by TypeId, so this only happens if the map
            // was populated with a foreign value.
            Err(_) => Arc::new(ActionTable::<C>::build()),
        }
    }

    /// Number of controller types with a cached table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Drop every cached table; the next dispatch rebuilds them.
    pub fn clear(&self) {
        let dropped = self.tables.len();
        self.tables.clear();
        info!(dropped = dropped, "Action cache cleared");
    }
}
