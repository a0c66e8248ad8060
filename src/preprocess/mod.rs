//! # Preprocess Module
//!
//! Expand section recalls and variant patches before the song reaches the formatter.
//!
//! ## Purpose
//! Lead sheets define a chorus once and refer back to it. This module rewrites the
//! markup so every reference becomes a full copy of the section, which the formatter
//! can render without knowing anything about recalls:
//! 1. **Definitions** - `{start_of_chorus: R1}` … `{end_of_chorus}` are emitted in place
//!    and remembered under `(chorus, R1)`
//! 2. **Recalls** - `{chorus: R1}` (or `{chorus}` for the unlabelled one) is replaced by
//!    the stored body
//! 3. **Variants** - `{start_of_variant: kind}` … `{end_of_variant}` patches the next
//!    recall only
//!
//! ## Sub-modules
//! - `types` - SectionKind, Label, RecallSection, PreprocessOptions
//! - `directive` - Line recognizer
//! - `variant` - VariantKind, VariantPatch and the one-shot pending slot
//! - `engine` - The single-pass state machine
//!
//! ## Entry Point
//! [`preprocess()`] - Rewrite markup, collecting warnings
//!
//! ## Example
//! ```rust
//! use chordbook::preprocess::{preprocess, PreprocessOptions};
//! use chordbook::Warnings;
//!
//! let source = "{start_of_chorus: R1}\nLa la\n{end_of_chorus}\n{chorus: R1}";
//! let options = PreprocessOptions { shorthand: false, compress_recalls: false };
//! let mut warnings = Warnings::new();
//!
//! let output = preprocess(source, &options, &mut warnings);
//!
//! assert_eq!(output.matches("La la").count(), 2);
//! assert!(warnings.is_empty());
//! ```
//!
//! ## Markers
//!
//! Recalled copies carry `{comment: %...%}` marker lines (expanded/shorthand copy,
//! recall label, section title). They render as ordinary comments and are turned into
//! classes and titles by the post-processor.

mod directive;
mod engine;
mod types;
mod variant;

pub(crate) use directive::{section_name, split_directive};
pub use directive::{recognize, Directive, Line};
pub use engine::preprocess;
pub use types::{Label, PreprocessOptions, RecallSection, SectionKind};
pub use variant::{PendingVariant, VariantKind, VariantPatch};
