//! Preset catalog handler.

use axum::Json;
use muse_core::models::Preset;
use muse_core::presets;

use super::resolve_limit;
use crate::error::AppResult;
use crate::extract::AppQuery;
use crate::models::LimitQuery;

const DEFAULT_PRESET_LIMIT: usize = 50;

/// `GET /presets` — built-in presets in declaration order.
pub async fn list_presets_handler(
    AppQuery(query): AppQuery<LimitQuery>,
) -> AppResult<Json<&'static [Preset]>> {
    let limit = resolve_limit(query.limit, DEFAULT_PRESET_LIMIT)?;
    Ok(Json(presets::list(limit)))
}
