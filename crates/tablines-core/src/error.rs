//! Error types for tablines-core.
//!
//! Only precondition violations are errors. Numeric edge cases (empty
//! rectangle lists, crops without text) have explicit fallbacks instead.

use thiserror::Error;

use crate::ruling::Ruling;

/// Fatal error types for page construction and mutation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// Only horizontal and vertical rulings can be added to a page.
    #[error("can't add an oblique ruling: {ruling}")]
    ObliqueRuling {
        /// The rejected ruling.
        ruling: Ruling,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oblique_ruling_message() {
        let err = CoreError::ObliqueRuling {
            ruling: Ruling::new(0.0, 0.0, 5.0, 10.0),
        };
        assert_eq!(
            err.to_string(),
            "can't add an oblique ruling: (0.00, 0.00)-(5.00, 10.00)"
        );
    }

    #[test]
    fn core_error_implements_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(CoreError::ObliqueRuling {
            ruling: Ruling::new(1.0, 1.0, 2.0, 2.0),
        });
        assert!(err.to_string().contains("oblique"));
    }

    #[test]
    fn core_error_clone_and_eq() {
        let err1 = CoreError::ObliqueRuling {
            ruling: Ruling::new(1.0, 1.0, 2.0, 2.0),
        };
        let err2 = err1.clone();
        assert_eq!(err1, err2);
    }
}
