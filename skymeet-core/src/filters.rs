use serde::{Deserialize, Serialize};

/// Sort key for the shaped result list. Unknown keys fall back to `Price`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Price,
    Distance,
}

impl SortKey {
    /// Lenient parse: anything unrecognized sorts by price.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "distance" => SortKey::Distance,
            _ => SortKey::Price,
        }
    }
}

/// Default view parameters, passed in explicitly so the filter engine stays
/// testable in isolation.
#[derive(Debug, Clone, Copy)]
pub struct FilterDefaults {
    pub sort: SortKey,
    pub page_size: u32,
}

impl Default for FilterDefaults {
    fn default() -> Self {
        Self {
            sort: SortKey::Price,
            page_size: 10,
        }
    }
}

/// User-requested view parameters for one search, parsed and sanitized by the
/// API layer. Consumed read-only by the filter engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterParams {
    pub sort: SortKey,
    /// 1-based.
    pub page: u32,
    pub limit: u32,
    pub max_connections: Option<u32>,
    pub price_from: Option<f64>,
    pub price_to: Option<f64>,
}

impl FilterParams {
    pub fn new(defaults: FilterDefaults) -> Self {
        Self {
            sort: defaults.sort,
            page: 1,
            limit: defaults.page_size,
            max_connections: None,
            price_from: None,
            price_to: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_key_fallback() {
        assert_eq!(SortKey::parse("distance"), SortKey::Distance);
        assert_eq!(SortKey::parse("price"), SortKey::Price);
        assert_eq!(SortKey::parse("quality"), SortKey::Price);
        assert_eq!(SortKey::parse(""), SortKey::Price);
    }

    #[test]
    fn test_params_from_defaults() {
        let params = FilterParams::new(FilterDefaults::default());
        assert_eq!(params.page, 1);
        assert_eq!(params.limit, 10);
        assert!(params.max_connections.is_none());
    }
}
