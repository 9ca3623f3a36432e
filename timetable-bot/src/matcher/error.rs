//! Matcher error types.

/// Errors from selecting points for a user query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    /// The query is too short to search for
    #[error("query must be at least {min} characters")]
    InputTooShort { min: usize },

    /// Nothing matched the query
    #[error("no points match the query")]
    NoMatch,

    /// A candidate from the directory does not contain the query at all.
    /// This means the directory prefilter and the ranker disagree.
    #[error("candidate {title:?} does not match query {query:?}")]
    UnclassifiedCandidate { title: String, query: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = MatchError::InputTooShort { min: 2 };
        assert_eq!(err.to_string(), "query must be at least 2 characters");

        assert_eq!(MatchError::NoMatch.to_string(), "no points match the query");

        let err = MatchError::UnclassifiedCandidate {
            title: "Омск".into(),
            query: "мос".into(),
        };
        assert_eq!(
            err.to_string(),
            "candidate \"Омск\" does not match query \"мос\""
        );
    }
}
