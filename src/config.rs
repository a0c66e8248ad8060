//! # Render Options
//!
//! [`RenderOptions`] controls transposition, notation and the optional rewriting passes
//! of a render. It can be built in code or loaded from a YAML document:
//!
//! ```yaml
//! notation: central-european   # english | central-european
//! input-notation: english
//! transpose: 2                 # semitones, ignored when target-key is set
//! target-key: D
//! source-key: C                # overrides {key} and the guessed key
//! capo: 0                      # overrides {capo}
//! shorthand: true              # collapsed copy after each recalled section
//! compress-recalls: true       # "(2x) R" for consecutive identical recalls
//! use-labels: true             # group repeated sections by title
//! max-chord-distance: 3
//! ```
//!
//! All fields are optional. Values are validated when the raw document is converted, so
//! a bad key or notation name is reported with the field it came from.
//!
//! ## Example
//! ```rust
//! use chordbook::{NotationConvention, RenderOptions};
//!
//! let options = RenderOptions::from_yaml("notation: czech\ntranspose: -3")?;
//! assert_eq!(options.notation, NotationConvention::CentralEuropean);
//! assert_eq!(options.transpose, -3);
//! assert!(options.shorthand);
//! # Ok::<(), chordbook::ConfigError>(())
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::chord::NotationConvention;
use crate::error::ConfigError;
use crate::key::Key;
use crate::postprocess::{RepeatOptions, MAX_CHORD_MATCH_DISTANCE};
use crate::preprocess::PreprocessOptions;

/// Options for one render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Notation chords are displayed in
    pub notation: NotationConvention,
    /// Notation chords are written in
    pub input_notation: NotationConvention,
    /// Semitones to shift by; ignored when `target_key` is set
    pub transpose: i32,
    pub target_key: Option<Key>,
    /// Key the song is written in; defaults to `{key}`, then to the guessed key
    pub source_key: Option<Key>,
    /// Capo fret; defaults to `{capo}`
    pub capo: Option<i32>,
    pub shorthand: bool,
    pub compress_recalls: bool,
    pub use_labels: bool,
    pub max_chord_distance: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            notation: NotationConvention::English,
            input_notation: NotationConvention::English,
            transpose: 0,
            target_key: None,
            source_key: None,
            capo: None,
            shorthand: true,
            compress_recalls: true,
            use_labels: true,
            max_chord_distance: MAX_CHORD_MATCH_DISTANCE,
        }
    }
}

impl RenderOptions {
    /// Parse options from a YAML document.
    ///
    /// # Errors
    /// Returns [`ConfigError::Yaml`] for malformed YAML or unknown fields and
    /// [`ConfigError::InvalidValue`] for values that do not convert.
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        // An empty document is valid and means "all defaults"
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let raw: RawRenderOptions = serde_yaml::from_str(text)?;
        raw.into_options()
    }

    /// Read and parse a YAML options file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    pub fn preprocess_options(&self) -> PreprocessOptions {
        PreprocessOptions {
            shorthand: self.shorthand,
            compress_recalls: self.compress_recalls,
        }
    }

    pub fn repeat_options(&self) -> RepeatOptions {
        RepeatOptions {
            use_labels: self.use_labels,
            max_distance: self.max_chord_distance,
        }
    }
}

/// Options exactly as written in YAML, before validation
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RawRenderOptions {
    pub notation: Option<String>,
    pub input_notation: Option<String>,
    pub transpose: Option<i32>,
    pub target_key: Option<String>,
    pub source_key: Option<String>,
    pub capo: Option<i32>,
    pub shorthand: Option<bool>,
    pub compress_recalls: Option<bool>,
    pub use_labels: Option<bool>,
    pub max_chord_distance: Option<usize>,
}

impl RawRenderOptions {
    /// Validate and convert, filling absent fields with defaults
    pub fn into_options(self) -> Result<RenderOptions, ConfigError> {
        let defaults = RenderOptions::default();

        let notation = parse_notation("notation", self.notation)?.unwrap_or(defaults.notation);
        let input_notation = parse_notation("input-notation", self.input_notation)?
            .unwrap_or(defaults.input_notation);

        // Keys are written the same way as the song's chords
        let target_key = parse_key("target-key", self.target_key, input_notation)?;
        let source_key = parse_key("source-key", self.source_key, input_notation)?;

        if let Some(capo) = self.capo {
            if capo < 0 {
                return Err(invalid("capo", format!("capo must not be negative, got {}", capo)));
            }
        }

        Ok(RenderOptions {
            notation,
            input_notation,
            transpose: self.transpose.unwrap_or(defaults.transpose),
            target_key,
            source_key,
            capo: self.capo,
            shorthand: self.shorthand.unwrap_or(defaults.shorthand),
            compress_recalls: self.compress_recalls.unwrap_or(defaults.compress_recalls),
            use_labels: self.use_labels.unwrap_or(defaults.use_labels),
            max_chord_distance: self.max_chord_distance.unwrap_or(defaults.max_chord_distance),
        })
    }
}

fn invalid(field: &str, message: String) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message,
    }
}

fn parse_notation(
    field: &str,
    value: Option<String>,
) -> Result<Option<NotationConvention>, ConfigError> {
    value
        .map(|name| {
            NotationConvention::from_name(&name)
                .ok_or_else(|| invalid(field, format!("unknown notation '{}'", name)))
        })
        .transpose()
}

fn parse_key(
    field: &str,
    value: Option<String>,
    notation: NotationConvention,
) -> Result<Option<Key>, ConfigError> {
    value
        .map(|text| Key::parse(&text, notation).map_err(|e| invalid(field, e.to_string())))
        .transpose()
}
