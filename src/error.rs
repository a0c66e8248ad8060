//! # Error Types
//!
//! This module defines the error and warning types for the rendering pipeline.
//!
//! Rendering a song never fails: problems with single directives or chord tokens are
//! recorded as [`Warning`]s and the affected line degrades locally. Hard errors only
//! come from the direct parsing APIs ([`ChordError`]) and from loading options
//! ([`ConfigError`]).
//!
//! ## Error Types
//! - `ChordError` - A chord or key symbol could not be parsed
//! - `ConfigError` - Invalid render options (YAML or values)
//! - `Warning` - Recoverable problem found while rendering, with line information
//!
//! ## Usage
//! ```rust
//! use chordbook::{render_song, RenderOptions, Warning};
//!
//! let rendered = render_song("{chorus: R1}", &RenderOptions::default());
//! for warning in &rendered.warnings {
//!     if let Warning::UnknownRecallLabel { line, .. } = warning {
//!         eprintln!("line {}: {}", line, warning);
//!     }
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChordError {
    /// The root of a chord symbol is not a note of the active notation.
    ///
    /// # Example
    /// ```
    /// # use chordbook::ChordError;
    /// let err = ChordError::InvalidChordSymbol("Xm7".to_string());
    /// assert_eq!(err.to_string(), "Invalid chord symbol: Xm7");
    /// ```
    #[error("Invalid chord symbol: {0}")]
    InvalidChordSymbol(String),

    /// A key name could not be parsed.
    ///
    /// # Example
    /// ```
    /// # use chordbook::ChordError;
    /// let err = ChordError::InvalidKey("C7".to_string());
    /// assert_eq!(err.to_string(), "Invalid key: C7");
    /// ```
    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    /// The options file could not be read.
    #[error("Cannot read options file: {0}")]
    Io(#[from] std::io::Error),

    /// The options document is not valid YAML or has unknown fields.
    #[error("Invalid options file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A field has a value that cannot be used.
    ///
    /// # Example
    /// ```
    /// # use chordbook::ConfigError;
    /// let err = ConfigError::InvalidValue {
    ///     field: "notation".to_string(),
    ///     message: "unknown notation 'solfege'".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Invalid value for 'notation': unknown notation 'solfege'");
    /// ```
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// A recoverable problem found while rendering a song.
///
/// Line numbers are 1-based and refer to the markup handed to the preprocessor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    #[error("Invalid chord symbol '{symbol}' left unchanged")]
    InvalidChordSymbol { symbol: String },

    #[error("Line {line}: recalled {kind} '{label}' is not defined")]
    UnknownRecallLabel {
        line: usize,
        kind: String,
        label: String,
    },

    #[error("Line {line}: malformed label in directive {directive}")]
    MalformedLabel { line: usize, directive: String },

    #[error("Line {line}: a variant is already pending, the previous one is replaced")]
    VariantAlreadyPending { line: usize },

    #[error("Line {line}: variants apply to recalls only, the pending variant is dropped")]
    VariantOnDefinition { line: usize },

    #[error("Line {line}: unknown variant type '{kind}'")]
    UnknownVariantKind { line: usize, kind: String },

    #[error("Line {line}: sections cannot be recalled from within a section")]
    RecallInsideSection { line: usize },

    #[error("Line {line}: {kind} section is never closed")]
    UnterminatedSection { line: usize, kind: String },

    #[error("Line {line}: variant is never applied to a recall")]
    UnconsumedVariant { line: usize },

    #[error("Cannot transpose to {target}: the song key is unknown")]
    UnknownSourceKey { target: String },
}

/// Collects warnings for one render call and logs each as it is recorded.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Warnings(Vec<Warning>);

impl Warnings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, warning: Warning) {
        tracing::warn!(%warning, "render warning");
        self.0.push(warning);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Warning> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<Warning> {
        self.0
    }
}

impl Extend<Warning> for Warnings {
    fn extend<T: IntoIterator<Item = Warning>>(&mut self, iter: T) {
        for warning in iter {
            self.push(warning);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_messages_carry_line_numbers() {
        let warning = Warning::UnknownRecallLabel {
            line: 7,
            kind: "chorus".to_string(),
            label: "R2".to_string(),
        };
        assert_eq!(warning.to_string(), "Line 7: recalled chorus 'R2' is not defined");
    }

    #[test]
    fn test_warnings_collector() {
        let mut warnings = Warnings::new();
        assert!(warnings.is_empty());
        warnings.push(Warning::VariantAlreadyPending { line: 3 });
        warnings.extend(vec![Warning::VariantOnDefinition { line: 9 }]);
        assert_eq!(warnings.len(), 2);
        assert_eq!(
            warnings.into_vec(),
            vec![
                Warning::VariantAlreadyPending { line: 3 },
                Warning::VariantOnDefinition { line: 9 },
            ]
        );
    }
}
