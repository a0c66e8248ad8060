//! The single-pass recall/variant expansion state machine.

use std::collections::HashMap;

use super::directive::{recognize, Directive, Line};
use super::types::{Label, PreprocessOptions, RecallSection, SectionKind};
use super::variant::{PendingVariant, VariantKind, VariantPatch};
use crate::error::{Warning, Warnings};
use crate::markers;

/// Section definition being collected
struct Definition {
    kind: SectionKind,
    label: Label,
    start_line: String,
    line: usize,
    body: Vec<String>,
}

/// Variant block being collected
struct VariantDraft {
    kind: Option<VariantKind>,
    raw_kind: String,
    line: usize,
    content: Vec<String>,
}

enum Mode {
    Text,
    Defining(Definition),
    CapturingVariant(VariantDraft),
}

/// Expand recalls and variants of `source` into plain section directives.
///
/// Never fails: problems are recorded in `warnings` and the offending line degrades
/// locally (passed through, dropped to a marker, or flushed verbatim).
pub fn preprocess(source: &str, options: &PreprocessOptions, warnings: &mut Warnings) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let mut preprocessor = Preprocessor::new(options, warnings);

    let mut index = 0;
    while index < lines.len() {
        index = preprocessor.step(&lines, index);
    }

    preprocessor.finish()
}

struct Preprocessor<'a> {
    options: &'a PreprocessOptions,
    warnings: &'a mut Warnings,
    sections: HashMap<(SectionKind, Label), RecallSection>,
    pending: PendingVariant,
    pending_line: usize,
    mode: Mode,
    output: Vec<String>,
}

impl<'a> Preprocessor<'a> {
    fn new(options: &'a PreprocessOptions, warnings: &'a mut Warnings) -> Self {
        Self {
            options,
            warnings,
            sections: HashMap::new(),
            pending: PendingVariant::None,
            pending_line: 0,
            mode: Mode::Text,
            output: Vec::new(),
        }
    }

    /// Process the line at `index`, returning the index of the next unprocessed line
    fn step(&mut self, lines: &[&str], index: usize) -> usize {
        let line = lines[index];
        let line_number = index + 1;
        let recognized = recognize(line);

        match std::mem::replace(&mut self.mode, Mode::Text) {
            Mode::CapturingVariant(mut draft) => {
                if recognized == Line::Directive(Directive::EndOfVariant) {
                    self.finish_variant(draft);
                } else {
                    draft.content.push(line.to_string());
                    self.mode = Mode::CapturingVariant(draft);
                }
            }
            Mode::Defining(mut definition) => match recognized {
                Line::Directive(Directive::EndOfSection(kind)) if kind == definition.kind => {
                    self.store_definition(definition);
                }
                Line::Directive(Directive::StartOfSection { kind, label }) => {
                    self.warnings.push(Warning::UnterminatedSection {
                        line: definition.line,
                        kind: definition.kind.name().to_string(),
                    });
                    self.flush_definition(definition);
                    self.start_definition(kind, label, line, line_number);
                }
                Line::Directive(Directive::Recall { .. }) => {
                    self.warnings.push(Warning::RecallInsideSection { line: line_number });
                    definition
                        .body
                        .push(markers::comment("Error: Cannot recall from within a section."));
                    self.mode = Mode::Defining(definition);
                }
                Line::MalformedLabel => {
                    self.malformed(line, line_number);
                    definition.body.push(line.to_string());
                    self.mode = Mode::Defining(definition);
                }
                Line::Directive(_) | Line::Text => {
                    definition.body.push(line.to_string());
                    self.mode = Mode::Defining(definition);
                }
            },
            Mode::Text => match recognized {
                Line::Directive(Directive::StartOfVariant(argument)) => {
                    self.start_variant(argument, line_number);
                }
                Line::Directive(Directive::StartOfSection { kind, label }) => {
                    self.start_definition(kind, label, line, line_number);
                }
                Line::Directive(Directive::Recall { kind, label }) => {
                    return self.recall(kind, label, lines, index);
                }
                Line::MalformedLabel => {
                    self.malformed(line, line_number);
                    self.output.push(line.to_string());
                }
                // Stray end directives pass through for the formatter to ignore
                Line::Directive(Directive::EndOfSection(_) | Directive::EndOfVariant) | Line::Text => {
                    self.output.push(line.to_string());
                }
            },
        }

        index + 1
    }

    fn malformed(&mut self, line: &str, line_number: usize) {
        self.warnings.push(Warning::MalformedLabel {
            line: line_number,
            directive: line.trim().to_string(),
        });
    }

    fn start_variant(&mut self, argument: String, line_number: usize) {
        // The previous patch is gone even if this one turns out unusable
        if self.pending.take().is_some() {
            self.warnings
                .push(Warning::VariantAlreadyPending { line: line_number });
        }
        let kind = VariantKind::parse(&argument);
        if kind.is_none() {
            self.warnings.push(Warning::UnknownVariantKind {
                line: line_number,
                kind: argument.clone(),
            });
        }
        self.mode = Mode::CapturingVariant(VariantDraft {
            kind,
            raw_kind: argument,
            line: line_number,
            content: Vec::new(),
        });
    }

    fn finish_variant(&mut self, draft: VariantDraft) {
        match draft.kind {
            Some(kind) => {
                self.pending.replace(VariantPatch::new(kind, draft.content));
                self.pending_line = draft.line;
            }
            None => {
                // Keep the text, it just cannot be applied
                self.output.push(markers::comment(&format!(
                    "Invalid variant type: {}",
                    draft.raw_kind
                )));
                self.output.extend(draft.content);
            }
        }
    }

    fn start_definition(&mut self, kind: SectionKind, label: Label, line: &str, line_number: usize) {
        if self.pending.take().is_some() {
            self.warnings
                .push(Warning::VariantOnDefinition { line: line_number });
        }
        self.mode = Mode::Defining(Definition {
            kind,
            label,
            start_line: line.trim().to_string(),
            line: line_number,
            body: Vec::new(),
        });
    }

    /// Emit a completed definition in place and remember it for later recalls
    fn store_definition(&mut self, definition: Definition) {
        let section = RecallSection {
            kind: definition.kind,
            label: definition.label,
            start_line: definition.start_line,
            body: definition.body,
        };

        self.output.push(section.start_line.clone());
        if let Some(title) = section.label.title(section.kind) {
            self.output
                .push(markers::comment(&markers::section_title(&title)));
        }
        self.output.extend(section.body.iter().cloned());
        self.output.push(end_directive(section.kind));

        self.sections
            .insert((section.kind, section.label.clone()), section);
    }

    /// Emit an unterminated definition verbatim without storing it
    fn flush_definition(&mut self, definition: Definition) {
        self.output.push(definition.start_line);
        self.output.extend(definition.body);
    }

    fn recall(&mut self, kind: SectionKind, label: Label, lines: &[&str], index: usize) -> usize {
        let line_number = index + 1;
        let Some(section) = self.sections.get(&(kind, label.clone())).cloned() else {
            // The pending variant, if any, waits for the next recall that resolves
            self.warnings.push(Warning::UnknownRecallLabel {
                line: line_number,
                kind: kind.name().to_string(),
                label: label.to_string(),
            });
            self.output.push(markers::comment(&markers::unknown_recall(
                kind.name(),
                &label.to_string(),
            )));
            return index + 1;
        };

        let patch = self.pending.take();
        let (count, next) = match patch {
            None if self.options.compress_recalls => consecutive_recalls(kind, &label, lines, index),
            _ => (1, index + 1),
        };

        let modifier = if count > 1 {
            format!("({}x) ", count)
        } else {
            String::new()
        };
        let marker_label = section
            .label
            .title(kind)
            .unwrap_or_else(|| kind.shorthand().to_string());
        // Untitled verses still need a title to carry the repeat count
        let title = match section.label.title(kind) {
            Some(title) => Some(format!("{}{}", modifier, title)),
            None if count > 1 => Some(format!("{}{}", modifier, section.label.shorthand_title(kind))),
            None => None,
        };
        let body = match &patch {
            Some(patch) => patch.apply(&section.body),
            None => section.body.clone(),
        };

        self.output.push(section.start_line.clone());
        if self.options.shorthand {
            self.output.push(markers::comment(markers::EXPANDED_SECTION));
        }
        self.output
            .push(markers::comment(&markers::recall(&marker_label, patch.is_some())));
        if let Some(title) = &title {
            self.output
                .push(markers::comment(&markers::section_title(title)));
        }
        self.output.extend(body);
        self.output.push(end_directive(kind));

        if self.options.shorthand {
            let summary = match &patch {
                Some(patch) => patch.summary(),
                None if section.body.len() == 1 => section.body.clone(),
                None => Vec::new(),
            };

            self.output.push(start_directive(kind));
            self.output.push(markers::comment(markers::SHORTHAND_SECTION));
            self.output.push(markers::comment(&markers::section_title(&format!(
                "{}{}",
                modifier,
                section.label.shorthand_title(kind)
            ))));
            self.output.extend(summary);
            self.output.push(end_directive(kind));
        }

        next
    }

    fn finish(mut self) -> String {
        match std::mem::replace(&mut self.mode, Mode::Text) {
            Mode::Text => {}
            Mode::Defining(definition) => {
                self.warnings.push(Warning::UnterminatedSection {
                    line: definition.line,
                    kind: definition.kind.name().to_string(),
                });
                self.flush_definition(definition);
            }
            Mode::CapturingVariant(draft) => self.finish_variant(draft),
        }

        if let Some(patch) = self.pending.take() {
            self.warnings.push(Warning::UnconsumedVariant {
                line: self.pending_line,
            });
            self.output.extend(patch.content);
        }

        self.output.join("\n")
    }
}

/// Count identical recalls starting at `index`, skipping blank lines between them.
/// Returns the count and the index after the last one.
fn consecutive_recalls(
    kind: SectionKind,
    label: &Label,
    lines: &[&str],
    index: usize,
) -> (usize, usize) {
    let mut count = 1;
    let mut next = index + 1;
    let mut cursor = index + 1;

    while cursor < lines.len() {
        if lines[cursor].trim().is_empty() {
            cursor += 1;
            continue;
        }
        match recognize(lines[cursor]) {
            Line::Directive(Directive::Recall { kind: k, label: l }) if k == kind && &l == label => {
                count += 1;
                cursor += 1;
                next = cursor;
            }
            _ => break,
        }
    }

    (count, next)
}

fn start_directive(kind: SectionKind) -> String {
    format!("{{start_of_{}}}", kind.name())
}

fn end_directive(kind: SectionKind) -> String {
    format!("{{end_of_{}}}", kind.name())
}
