use std::io::{Cursor, Write};

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::errors::{SnapshotError, SnapshotResult};
use crate::model::{Document, Node};

impl Document {
    /// Serializes the tree with an XML 1.0 declaration. Childless, textless
    /// elements are written self-closing.
    pub fn to_xml_string(&self) -> SnapshotResult<String> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
            .map_err(serialization)?;
        write_node(&mut writer, self.root())?;
        let bytes = writer.into_inner().into_inner();
        String::from_utf8(bytes).map_err(serialization)
    }
}

enum Step<'a> {
    Open(&'a Node),
    Close(&'a Node),
}

// Explicit stack so arbitrarily deep dumps cannot exhaust the thread stack.
fn write_node<W: Write>(writer: &mut Writer<W>, root: &Node) -> SnapshotResult<()> {
    let mut steps = vec![Step::Open(root)];
    while let Some(step) = steps.pop() {
        let node = match step {
            Step::Open(node) => node,
            Step::Close(node) => {
                writer
                    .write_event(Event::End(BytesEnd::new(node.tag())))
                    .map_err(serialization)?;
                continue;
            }
        };

        if !is_xml_name(node.tag()) {
            return Err(SnapshotError::Serialization(format!(
                "invalid element name <{}>",
                node.tag()
            )));
        }
        let mut start = BytesStart::new(node.tag());
        for (key, value) in node.attributes() {
            start.push_attribute((key, value));
        }

        if node.children().is_empty() && node.text().is_none() {
            writer
                .write_event(Event::Empty(start))
                .map_err(serialization)?;
            continue;
        }

        writer
            .write_event(Event::Start(start))
            .map_err(serialization)?;
        if let Some(text) = node.text() {
            writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(serialization)?;
        }
        steps.push(Step::Close(node));
        steps.extend(node.children().iter().rev().map(Step::Open));
    }
    Ok(())
}

/// Namespace-safe XML name (`NCName`): the XML 1.0 `Name` production
/// without `:`, which query engines read as a prefix separator.
pub fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_name_start_char(first) => chars.all(is_name_char),
        _ => false,
    }
}

fn is_name_start_char(c: char) -> bool {
    matches!(
        c,
        'A'..='Z'
            | '_'
            | 'a'..='z'
            | '\u{C0}'..='\u{D6}'
            | '\u{D8}'..='\u{F6}'
            | '\u{F8}'..='\u{2FF}'
            | '\u{370}'..='\u{37D}'
            | '\u{37F}'..='\u{1FFF}'
            | '\u{200C}'..='\u{200D}'
            | '\u{2070}'..='\u{218F}'
            | '\u{2C00}'..='\u{2FEF}'
            | '\u{3001}'..='\u{D7FF}'
            | '\u{F900}'..='\u{FDCF}'
            | '\u{FDF0}'..='\u{FFFD}'
            | '\u{10000}'..='\u{EFFFF}'
    )
}

fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || matches!(
            c,
            '-' | '.' | '0'..='9' | '\u{B7}' | '\u{300}'..='\u{36F}' | '\u{203F}'..='\u{2040}'
        )
}

fn serialization(err: impl std::fmt::Display) -> SnapshotError {
    SnapshotError::Serialization(err.to_string())
}
