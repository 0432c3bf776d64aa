//! Error type for formatting, parsing and label lookup

/// Errors that can occur while parsing unit text or resolving labels
#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// Unexpected character or token in the input
    UnknownToken { token: String, position: usize },
    /// Parentheses do not balance
    UnbalancedGrouping { position: usize },
    /// The exponent after '^' is not a plain integer
    InvalidExponent { token: String, position: usize },
    /// A numeric literal does not parse or overflows
    InvalidNumber { token: String, position: usize },
    /// A symbol resolves to no known unit
    UnknownUnit(String),
    /// A label bundle has no entry for the key
    MissingKey { bundle: String, key: String },
    /// No bundle family registered under the name
    UnknownBundle(String),
}

impl std::fmt::Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatError::UnknownToken { token, position } => {
                write!(f, "Unknown token '{}' at position {}", token, position)
            }
            FormatError::UnbalancedGrouping { position } => {
                write!(f, "Unbalanced parentheses at position {}", position)
            }
            FormatError::InvalidExponent { token, position } => {
                write!(f, "Invalid exponent '{}' at position {}", token, position)
            }
            FormatError::InvalidNumber { token, position } => {
                write!(f, "Invalid number '{}' at position {}", token, position)
            }
            FormatError::UnknownUnit(symbol) => {
                write!(f, "Unknown unit: '{}'", symbol)
            }
            FormatError::MissingKey { bundle, key } => {
                write!(f, "No entry for key '{}' in bundle '{}'", key, bundle)
            }
            FormatError::UnknownBundle(name) => {
                write!(f, "No bundle family registered as '{}'", name)
            }
        }
    }
}

impl std::error::Error for FormatError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let err = FormatError::UnknownUnit("xyz".to_string());
        assert_eq!(err.to_string(), "Unknown unit: 'xyz'");

        let err = FormatError::UnknownToken {
            token: "%".to_string(),
            position: 3,
        };
        assert!(err.to_string().contains('%'));
        assert!(err.to_string().contains('3'));

        let err = FormatError::MissingKey {
            bundle: "units".to_string(),
            key: "FURLONG".to_string(),
        };
        assert!(err.to_string().contains("FURLONG"));
        assert!(err.to_string().contains("units"));
    }
}
