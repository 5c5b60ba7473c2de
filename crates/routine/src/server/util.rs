//! Helpers shared by the listing, grid, and ongoing endpoints.

use crate::db::cache::ListingKey;
use crate::schedule::filter::FilterState;
use crate::schedule::ClassEntry;
use crate::server::types::ApiFailure;
use crate::types::AppState;

/// Fetches the attribute-filtered class listing, via the TTL cache.
///
/// Only the attribute filters participate in the cache key; search and
/// ongoing predicates are applied by the caller on the returned snapshot.
pub fn fetch_classes(
    state: &AppState,
    filters: &FilterState,
) -> Result<Vec<ClassEntry>, ApiFailure> {
    let (department, batch, section) =
        (filters.department(), filters.batch(), filters.section());
    let key = ListingKey::new(department, batch, section);

    if let Some(classes) = state.listing_cache.get(&key) {
        return Ok(classes);
    }

    let classes = state.db.list_classes(department, batch, section)?;
    state.listing_cache.insert(key, classes.clone());
    Ok(classes)
}
