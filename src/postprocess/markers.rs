//! Turns the preprocessor's marker comments into classes and section titles.
//!
//! Reads every comment line first and applies all changes afterwards, so removing one
//! marker never shifts the lookup of another.

use crate::dom::{Document, NodeId};
use crate::markers::{parse, Marker};

pub const EXPANDED_SECTION_CLASS: &str = "expanded-section";
pub const SHORTHAND_SECTION_CLASS: &str = "shorthand-section";
pub const RECALLED_SECTION_CLASS: &str = "recalled-section";
pub const VARIANT_SECTION_CLASS: &str = "variant-section";

enum Mutation {
    AddClass(NodeId, &'static str),
    InsertTitle {
        comment: NodeId,
        line: Option<NodeId>,
        title: String,
    },
    Remove(NodeId),
}

/// Apply every marker comment found in `doc`, removing the comment lines
pub fn apply_markers(doc: &mut Document) {
    let mut mutations = Vec::new();

    for comment in doc.find_by_class(doc.root(), "comment-line") {
        let Some(marker) = parse(&doc.text_content(comment)) else {
            continue;
        };
        let section = doc.closest_ancestor(comment, "section");

        match marker {
            Marker::ExpandedSection => {
                mutations.extend(section.map(|s| Mutation::AddClass(s, EXPANDED_SECTION_CLASS)));
            }
            Marker::ShorthandSection => {
                mutations.extend(section.map(|s| Mutation::AddClass(s, SHORTHAND_SECTION_CLASS)));
            }
            Marker::Recall { variant, .. } => {
                mutations.extend(section.map(|s| Mutation::AddClass(s, RECALLED_SECTION_CLASS)));
                if variant {
                    mutations
                        .extend(section.map(|s| Mutation::AddClass(s, VARIANT_SECTION_CLASS)));
                }
            }
            Marker::SectionTitle(title) => {
                let line = doc
                    .following_siblings(comment)
                    .into_iter()
                    .find(|node| doc.has_class(*node, "lyrics-line"));
                mutations.push(Mutation::InsertTitle {
                    comment,
                    line,
                    title,
                });
            }
            Marker::UnknownRecall => {}
        }
        mutations.push(Mutation::Remove(comment));
    }

    for mutation in mutations {
        match mutation {
            Mutation::AddClass(node, class) => doc.add_class(node, class),
            Mutation::InsertTitle {
                comment,
                line,
                title,
            } => insert_title(doc, comment, line, &title),
            Mutation::Remove(node) => doc.detach(node),
        }
    }
}

/// Put `title` in a word at the start of `line`, or in a new lyrics line after `comment`
fn insert_title(doc: &mut Document, comment: NodeId, line: Option<NodeId>, title: &str) {
    let heading = doc.create_element("div", &["section-title"]);
    let text = doc.create_text(&format!("{}: ", title));
    doc.append_child(heading, text);

    let word = doc.create_element("div", &["word"]);
    doc.append_child(word, heading);

    match line {
        Some(line) => doc.insert_child(line, 0, word),
        None => {
            let line = doc.create_element("div", &["line", "lyrics-line"]);
            doc.append_child(line, word);
            doc.insert_after(comment, line);
        }
    }
}
