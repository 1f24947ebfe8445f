use tracing::info;

use crate::food::repo::{self, FoodItem};
use crate::state::AppState;

/// Barcode lookup with external backfill: on a local miss, fetch the
/// product from the nutrition API once and persist it for future reads.
/// `Ok(None)` means neither the catalog nor the upstream knows the code.
pub async fn lookup_or_fill(state: &AppState, upc: &str) -> anyhow::Result<Option<FoodItem>> {
    if let Some(hit) = repo::find_by_barcode(&state.db, upc).await? {
        return Ok(Some(hit));
    }

    let Some(external) = state.nutrition.lookup_barcode(upc).await? else {
        return Ok(None);
    };

    info!(upc, name = %external.name, "caching food from nutrition API");
    match repo::insert_from_external(&state.db, upc, &external).await? {
        Some(row) => Ok(Some(row)),
        // Lost the insert race to a concurrent miss; the row exists now.
        None => repo::find_by_barcode(&state.db, upc).await,
    }
}
