//! Shared query parameter types for API handlers.

use chrono::Duration;
use officehub_core::booking::TimeRange;
use officehub_core::error::CoreError;
use officehub_core::notification::clamp_limit;
use officehub_core::types::Timestamp;
use serde::Deserialize;

/// Generic pagination parameters (`?limit=&offset=`).
///
/// `limit` defaults to 50 and is capped at 100.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl PaginationParams {
    pub fn limit(&self) -> usize {
        clamp_limit(self.limit)
    }

    pub fn offset(&self) -> usize {
        self.offset.unwrap_or(0)
    }
}

/// Default half-width of a time window when `from` / `to` are omitted.
const DEFAULT_WINDOW_DAYS: i64 = 7;

/// A `?from=&to=` time window (RFC 3339).
///
/// Missing bounds default to seven days either side of now.
#[derive(Debug, Default, Deserialize)]
pub struct WindowParams {
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
}

impl WindowParams {
    pub fn resolve(&self, now: Timestamp) -> Result<TimeRange, CoreError> {
        let from = self
            .from
            .unwrap_or(now - Duration::days(DEFAULT_WINDOW_DAYS));
        let to = self.to.unwrap_or(now + Duration::days(DEFAULT_WINDOW_DAYS));
        TimeRange::new(from, to)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn window_defaults_around_now() {
        let now = Utc.with_ymd_and_hms(2030, 3, 4, 12, 0, 0).unwrap();
        let window = WindowParams::default().resolve(now).unwrap();
        assert_eq!(window.start, now - Duration::days(7));
        assert_eq!(window.end, now + Duration::days(7));
    }

    #[test]
    fn inverted_window_rejected() {
        let now = Utc.with_ymd_and_hms(2030, 3, 4, 12, 0, 0).unwrap();
        let params = WindowParams {
            from: Some(now),
            to: Some(now - Duration::hours(1)),
        };
        assert_matches!(params.resolve(now), Err(CoreError::Validation(_)));
    }

    #[test]
    fn pagination_defaults() {
        let params = PaginationParams::default();
        assert_eq!(params.limit(), 50);
        assert_eq!(params.offset(), 0);
    }
}
