//! # Error Types
//!
//! This module defines all error types for the fretwork theory engine.
//!
//! Every failure is local to the call that produced it. Core functions return
//! `Result<_, TheoryError>`; the lenient functions in [`crate::api`] turn an error into an
//! empty result plus a [`crate::api::Diagnostic`].
//!
//! ## Error Types
//! - `InvalidRoot` - A root string is not one of the 12 chromatic spellings
//! - `InvalidScaleType` - Scale type is neither `major` nor `minor`
//! - `RotationFailure` - Minor root missing from its relative major scale
//! - `UnrecognizedQuality` - No chord quality suffix matched
//! - `NoShapeForQuality` - No shape template for that quality on that root string
//! - `MalformedTemplate` - A built-in template has no root cell (a defect, never an input error)
//! - `RootNotOnString` - Root pitch class absent from the anchor string (recoverable)
//!
//! ## Usage
//! ```rust
//! use fretwork::{chord_voicing, RootString, TheoryError};
//!
//! match chord_voicing("Zm7", RootString::Sixth) {
//!     Ok(notes) => println!("{} notes", notes.len()),
//!     Err(TheoryError::InvalidRoot(root)) => eprintln!("unknown root {}", root),
//!     Err(e) => eprintln!("error: {}", e),
//! }
//! ```

use serde::Serialize;
use thiserror::Error;

/// How a failure should be reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TheoryError {
    /// Root note is not in the chromatic set.
    ///
    /// # Example
    /// ```
    /// # use fretwork::TheoryError;
    /// let err = TheoryError::InvalidRoot("H".to_string());
    /// assert_eq!(err.to_string(), "Root note 'H' is not in the chromatic scale");
    /// ```
    #[error("Root note '{0}' is not in the chromatic scale")]
    InvalidRoot(String),

    /// Scale type is not `major` or `minor`.
    ///
    /// # Example
    /// ```
    /// # use fretwork::TheoryError;
    /// let err = TheoryError::InvalidScaleType("lydian".to_string());
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Invalid scale type 'lydian': expected 'major' or 'minor'"
    /// );
    /// ```
    #[error("Invalid scale type '{0}': expected 'major' or 'minor'")]
    InvalidScaleType(String),

    /// The minor root could not be found in its relative major scale.
    #[error("Minor root {root} not found in the {relative_major} major scale")]
    RotationFailure {
        root: String,
        relative_major: String,
    },

    /// No quality suffix matched the chord name.
    #[error("No chord quality recognized in '{0}'")]
    UnrecognizedQuality(String),

    /// The root string's template table has no entry for the quality.
    #[error("No root-{root_string} shape defined for quality '{quality}'")]
    NoShapeForQuality { root_string: u8, quality: String },

    /// A built-in template has no `R` cell.
    #[error("Shape template for quality '{0}' has no root cell")]
    MalformedTemplate(String),

    /// The root pitch class does not occur on the anchor string within the modeled frets.
    ///
    /// Callers retry with the other root string.
    ///
    /// # Example
    /// ```
    /// # use fretwork::TheoryError;
    /// let err = TheoryError::RootNotOnString { root: "C".to_string(), string_number: 6 };
    /// assert_eq!(err.to_string(), "Root note C not found on string 6");
    /// ```
    #[error("Root note {root} not found on string {string_number}")]
    RootNotOnString { root: String, string_number: u8 },

    /// Scale intervals are 1-based; 0 is rejected.
    #[error("Invalid scale interval {0}: intervals are 1-based")]
    InvalidInterval(u8),

    #[error("Invalid root string {0}: expected 6 or 5")]
    InvalidRootString(u8),

    /// A pitched note string such as `E_4` could not be parsed.
    #[error("Invalid note '{0}'")]
    InvalidNote(String),

    #[error("Fretboard position string {string_index}, fret {fret_index} is out of range")]
    PositionOutOfRange {
        string_index: usize,
        fret_index: usize,
    },

    #[error("Unknown scale '{0}'")]
    UnknownScale(String),

    /// Settings file could not be parsed or holds out-of-range values.
    ///
    /// # Example
    /// ```
    /// # use fretwork::TheoryError;
    /// let err = TheoryError::Config("tempo must be between 40 and 240".to_string());
    /// assert_eq!(err.to_string(), "Invalid config: tempo must be between 40 and 240");
    /// ```
    #[error("Invalid config: {0}")]
    Config(String),
}

impl TheoryError {
    /// `RootNotOnString` is recoverable by switching root strings, so it is a warning.
    /// Everything else is an error.
    pub fn severity(&self) -> Severity {
        match self {
            TheoryError::RootNotOnString { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// True for failures that point at a corrupt built-in table rather than bad input.
    pub fn is_structural(&self) -> bool {
        matches!(self, TheoryError::MalformedTemplate(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity() {
        let warn = TheoryError::RootNotOnString {
            root: "C".to_string(),
            string_number: 5,
        };
        assert_eq!(warn.severity(), Severity::Warning);
        assert_eq!(
            TheoryError::InvalidRoot("Z".to_string()).severity(),
            Severity::Error
        );
    }

    #[test]
    fn test_structural() {
        assert!(TheoryError::MalformedTemplate("m7".to_string()).is_structural());
        assert!(!TheoryError::UnrecognizedQuality(String::new()).is_structural());
    }
}
