//! Process-wide cache of dispatch tables.
//!
//! Tables live here keyed by (concept, concrete type) identity. An entry is
//! built on first request, leaked, and never evicted; its address is stable
//! for the lifetime of the process, which is what lets holders share and
//! compare bare `&'static` table pointers. Entries are pure data (tuples of
//! function pointers), so there is nothing to tear down.

use std::any::{type_name, Any, TypeId};
use std::sync::OnceLock;

use dashmap::DashMap;

use crate::concept::{Concept, Implements};

type TableMap = DashMap<(TypeId, TypeId), &'static (dyn Any + Send + Sync)>;

static TABLES: OnceLock<TableMap> = OnceLock::new();

fn tables() -> &'static TableMap {
    TABLES.get_or_init(DashMap::new)
}

/// The dispatch table for concept `C` and concrete type `T`.
///
/// The first call for a given pair builds the table, even when several
/// threads race on it: construction happens under the map's shard entry
/// lock, so exactly one table is ever materialized and every caller observes
/// the same address. Later calls are plain sharded reads. Holders cache the
/// returned reference, so dispatch itself never comes back here.
#[must_use]
pub fn table_of<C, T>() -> &'static C::Table
where
    C: Concept + ?Sized,
    T: Implements<C>,
{
    let key = (TypeId::of::<C>(), TypeId::of::<T>());
    let map = tables();
    let entry: &'static (dyn Any + Send + Sync) = match map.get(&key) {
        Some(entry) => *entry,
        None => *map.entry(key).or_insert_with(|| {
            log::trace!(
                "building dispatch table {{concept: {}, type: {}}}",
                type_name::<C>(),
                type_name::<T>()
            );
            let table: &'static C::Table = Box::leak(Box::new(T::dispatch_table()));
            table
        }),
    };
    entry
        .downcast_ref::<C::Table>()
        .unwrap_or_else(|| unreachable!("table registered under a mismatched key"))
}
