//! Rendering error types.

/// Errors from turning threads into messages.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// No thread survived validation (or none were given). The caller
    /// should send the "no departures" text instead.
    #[error("no renderable threads")]
    NoRenderableThreads,

    /// Decorations leave too little room for timetable lines
    #[error("message limit {max_block_length} leaves no room for lines after {reserved} reserved characters")]
    BudgetTooSmall {
        max_block_length: usize,
        reserved: usize,
    },

    /// A message template failed to render
    #[error("template error: {0}")]
    Template(#[from] askama::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            RenderError::NoRenderableThreads.to_string(),
            "no renderable threads"
        );

        let err = RenderError::BudgetTooSmall {
            max_block_length: 100,
            reserved: 90,
        };
        assert_eq!(
            err.to_string(),
            "message limit 100 leaves no room for lines after 90 reserved characters"
        );
    }
}
