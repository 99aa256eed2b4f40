//! Raw dump → [`Document`] using quick-xml events.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::errors::{SnapshotError, SnapshotResult};
use crate::model::{Document, Node};

pub fn parse_hierarchy(xml: &str) -> SnapshotResult<Document> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Node> = Vec::new();
    let mut root: Option<Node> = None;

    loop {
        let event = reader.read_event().map_err(|err| {
            SnapshotError::malformed(format!(
                "xml error at position {}: {err}",
                reader.buffer_position()
            ))
        })?;
        match event {
            Event::Start(ref e) => {
                let node = start_node(e)?;
                if stack.is_empty() && root.is_some() {
                    return Err(SnapshotError::malformed("multiple root elements"));
                }
                stack.push(node);
            }
            Event::Empty(ref e) => {
                let node = start_node(e)?;
                attach(&mut stack, &mut root, node)?;
            }
            Event::End(_) => {
                let completed = stack
                    .pop()
                    .ok_or_else(|| SnapshotError::malformed("unexpected closing tag"))?;
                attach(&mut stack, &mut root, completed)?;
            }
            Event::Text(ref e) => {
                let text = e
                    .unescape()
                    .map_err(|err| SnapshotError::malformed(format!("text error: {err}")))?;
                if text.chars().all(char::is_whitespace) {
                    continue;
                }
                match stack.last_mut() {
                    Some(parent) => parent.push_text(&text),
                    None => return Err(SnapshotError::malformed("text outside root element")),
                }
            }
            Event::CData(ref e) => {
                let text = std::str::from_utf8(e.as_ref())
                    .map_err(|err| SnapshotError::malformed(format!("cdata error: {err}")))?;
                if let Some(parent) = stack.last_mut() {
                    parent.push_text(text);
                }
            }
            Event::Eof => {
                if !stack.is_empty() {
                    let unclosed: Vec<&str> = stack.iter().map(Node::tag).collect();
                    return Err(SnapshotError::malformed(format!(
                        "unclosed element(s): <{}>",
                        unclosed.join(">, <")
                    )));
                }
                break;
            }
            // declarations, comments, processing instructions, doctype
            _ => {}
        }
    }

    root.map(Document::new)
        .ok_or_else(|| SnapshotError::malformed("no root element found"))
}

fn attach(stack: &mut [Node], root: &mut Option<Node>, node: Node) -> SnapshotResult<()> {
    if let Some(parent) = stack.last_mut() {
        parent.push_child(node);
        return Ok(());
    }
    if root.is_some() {
        return Err(SnapshotError::malformed("multiple root elements"));
    }
    *root = Some(node);
    Ok(())
}

fn start_node(e: &BytesStart<'_>) -> SnapshotResult<Node> {
    let name = std::str::from_utf8(e.name().as_ref())
        .map_err(|err| SnapshotError::malformed(format!("invalid element name: {err}")))?
        .to_string();
    let mut node = Node::new(name);
    for attr in e.attributes() {
        let attr =
            attr.map_err(|err| SnapshotError::malformed(format!("attribute error: {err}")))?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|err| SnapshotError::malformed(format!("attribute key error: {err}")))?
            .to_string();
        let value = attr
            .unescape_value()
            .map_err(|err| SnapshotError::malformed(format!("attribute value error: {err}")))?;
        node.set_attribute(key, value);
    }
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_hierarchy() {
        let xml = r#"<?xml version='1.0' encoding='UTF-8' standalone='yes' ?>
<hierarchy rotation="0">
  <node index="0" class="android.widget.FrameLayout" bounds="[0,0][1080,1920]">
    <node index="0" class="android.widget.TextView" text="Hello &amp; welcome" />
  </node>
</hierarchy>"#;
        let document = parse_hierarchy(xml).expect("parse");
        let root = document.root();
        assert_eq!(root.tag(), "hierarchy");
        assert_eq!(root.attribute("rotation"), Some("0"));
        let frame = &root.children()[0];
        assert_eq!(frame.attribute("class"), Some("android.widget.FrameLayout"));
        let text = &frame.children()[0];
        assert_eq!(text.attribute("text"), Some("Hello & welcome"));
    }

    #[test]
    fn keeps_attribute_order() {
        let document = parse_hierarchy(r#"<n b="1" a="2" c="3"/>"#).expect("parse");
        let keys: Vec<&str> = document.root().attributes().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn control_characters_in_values_are_sanitized() {
        let document = parse_hierarchy("<n text=\"a\u{1}b\"/>").expect("parse");
        assert_eq!(document.root().attribute("text"), Some("a?b"));
    }

    #[test]
    fn unclosed_element_is_malformed() {
        let err = parse_hierarchy("<hierarchy><node>").unwrap_err();
        assert!(matches!(err, SnapshotError::MalformedSnapshot { .. }));
    }

    #[test]
    fn mismatched_end_tag_is_malformed() {
        let err = parse_hierarchy("<a><b></a>").unwrap_err();
        assert!(matches!(err, SnapshotError::MalformedSnapshot { .. }));
    }

    #[test]
    fn empty_input_is_malformed() {
        let err = parse_hierarchy("   ").unwrap_err();
        assert!(matches!(err, SnapshotError::MalformedSnapshot { .. }));
    }

    #[test]
    fn multiple_roots_are_malformed() {
        let err = parse_hierarchy("<a/><b/>").unwrap_err();
        assert!(matches!(err, SnapshotError::MalformedSnapshot { .. }));
    }

    #[test]
    fn text_content_is_kept() {
        let document = parse_hierarchy("<a>  hello <!-- c --> world </a>").expect("parse");
        assert!(document.root().text().unwrap_or_default().contains("hello"));
    }
}
