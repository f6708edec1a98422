//! Error types for the tilegraph toolkit

use thiserror::Error;

/// Main error type for shared tilegraph types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A graph id component does not fit its bit width
    #[error("Invalid graph id: {component} {value} exceeds maximum {max}")]
    InvalidGraphId {
        component: &'static str,
        value: u64,
        max: u64,
    },

    /// An integer code has no matching enumeration variant
    #[error("Unknown {kind} code: {code}")]
    UnknownCode { kind: &'static str, code: u8 },

    /// A name has no matching enumeration variant
    #[error("Unknown {kind} name: '{name}'")]
    UnknownName { kind: &'static str, name: String },
}

/// Convenience result type for shared tilegraph types
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::InvalidGraphId {
            component: "level",
            value: 9,
            max: 7,
        };
        assert_eq!(
            err.to_string(),
            "Invalid graph id: level 9 exceeds maximum 7"
        );

        let err = Error::UnknownCode {
            kind: "use",
            code: 17,
        };
        assert_eq!(err.to_string(), "Unknown use code: 17");
    }
}
