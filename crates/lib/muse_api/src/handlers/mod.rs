//! Request handlers.

pub mod chat;
pub mod conversations;
pub mod health;
pub mod messages;
pub mod presets;

use crate::error::{AppError, AppResult};

/// Upper bound on any `?limit=`.
pub const MAX_LIMIT: usize = 1000;

/// Resolve a `?limit=` value: absent → `default`, negative → 400, large → capped.
pub(crate) fn resolve_limit(raw: Option<i64>, default: usize) -> AppResult<usize> {
    match raw {
        None => Ok(default.min(MAX_LIMIT)),
        Some(n) if n < 0 => Err(AppError::Validation("limit: must be at least 0".into())),
        Some(n) => Ok(usize::try_from(n).map_or(MAX_LIMIT, |n| n.min(MAX_LIMIT))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_resolution() {
        assert_eq!(resolve_limit(None, 50).unwrap(), 50);
        assert_eq!(resolve_limit(Some(0), 50).unwrap(), 0);
        assert_eq!(resolve_limit(Some(7), 50).unwrap(), 7);
        assert_eq!(resolve_limit(Some(1_000_000), 50).unwrap(), MAX_LIMIT);
        assert!(resolve_limit(Some(-1), 50).is_err());
    }
}
