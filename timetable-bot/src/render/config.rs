//! Rendering configuration.

/// Parameters for turning threads into chat messages.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Longest message the chat transport accepts, in characters.
    pub max_block_length: usize,

    /// Station-to-station timetables with more threads than this show
    /// short route titles.
    pub full_title_max_threads: usize,

    /// Appended to the departure time of express trains.
    pub express_marker: String,
}

impl RenderConfig {
    /// Set the message length limit.
    pub fn with_max_block_length(mut self, max_block_length: usize) -> Self {
        self.max_block_length = max_block_length;
        self
    }

    /// Set the thread count above which short titles are used.
    pub fn with_full_title_max_threads(mut self, n: usize) -> Self {
        self.full_title_max_threads = n;
        self
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_block_length: 4096,
            full_title_max_threads: 10,
            express_marker: "⚡".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = RenderConfig::default();

        assert_eq!(config.max_block_length, 4096);
        assert_eq!(config.full_title_max_threads, 10);
        assert_eq!(config.express_marker, "⚡");
    }

    #[test]
    fn builder_methods() {
        let config = RenderConfig::default()
            .with_max_block_length(1000)
            .with_full_title_max_threads(3);

        assert_eq!(config.max_block_length, 1000);
        assert_eq!(config.full_title_max_threads, 3);
    }
}
