//! Matcher configuration.

/// Parameters for ranking and paging point candidates.
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Shortest normalized query accepted.
    pub min_query_chars: usize,

    /// Queries of exactly this length ask the directory for exact titles
    /// only; longer ones get a substring prefilter.
    pub strict_query_chars: usize,

    /// Maximum number of ranked points kept.
    pub max_results: usize,

    /// Points per page of buttons.
    pub page_size: usize,

    /// Upper bound on candidates requested from the directory.
    pub lookup_limit: usize,
}

impl MatchConfig {
    /// Create a new configuration with the given limits.
    pub fn new(max_results: usize, page_size: usize) -> Self {
        Self {
            max_results,
            page_size,
            ..Self::default()
        }
    }

    /// Set the directory lookup bound.
    pub fn with_lookup_limit(mut self, limit: usize) -> Self {
        self.lookup_limit = limit;
        self
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            min_query_chars: 2,
            strict_query_chars: 2,
            max_results: 50,
            page_size: 10,
            lookup_limit: 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = MatchConfig::default();

        assert_eq!(config.min_query_chars, 2);
        assert_eq!(config.strict_query_chars, 2);
        assert_eq!(config.max_results, 50);
        assert_eq!(config.page_size, 10);
        assert_eq!(config.lookup_limit, 500);
    }

    #[test]
    fn custom_config() {
        let config = MatchConfig::new(20, 5).with_lookup_limit(100);

        assert_eq!(config.max_results, 20);
        assert_eq!(config.page_size, 5);
        assert_eq!(config.lookup_limit, 100);
        assert_eq!(config.min_query_chars, 2);
    }
}
