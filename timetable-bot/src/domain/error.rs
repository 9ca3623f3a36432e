//! Domain error types.
//!
//! These errors represent validation failures in records coming from the
//! timetable API. They are distinct from transport/IO errors.

use std::fmt;

/// A thread record that cannot be rendered: a required field is missing,
/// a timestamp does not parse, or the times are inconsistent.
///
/// Renderers drop such records one by one instead of failing the whole
/// timetable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub struct MalformedThread {
    /// UID of the record, when it had one.
    pub uid: Option<String>,
    pub reason: String,
}

impl MalformedThread {
    pub fn new(uid: Option<&str>, reason: impl Into<String>) -> Self {
        Self {
            uid: uid.map(str::to_string),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for MalformedThread {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.uid {
            Some(uid) => write!(f, "malformed thread {uid}: {}", self.reason),
            None => write!(f, "malformed thread: {}", self.reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = MalformedThread::new(Some("6001_0"), "missing departure");
        assert_eq!(err.to_string(), "malformed thread 6001_0: missing departure");

        let err = MalformedThread::new(None, "missing uid");
        assert_eq!(err.to_string(), "malformed thread: missing uid");
    }
}
