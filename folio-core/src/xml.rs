//! Reading XML and XHTML text into a [`Document`]

use crate::error::ParseError;
use crate::node::{Attributes, Document, NodeId};
use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::Reader;

/// How markup text is turned into nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    /// Keep text nodes made only of whitespace
    pub keep_whitespace: bool,

    /// Keep comment nodes
    pub keep_comments: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            keep_whitespace: false,
            keep_comments: true,
        }
    }
}

impl ReadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keep_whitespace(mut self, keep: bool) -> Self {
        self.keep_whitespace = keep;
        self
    }

    pub fn keep_comments(mut self, keep: bool) -> Self {
        self.keep_comments = keep;
        self
    }
}

/// Parse markup text into a document
///
/// Elements keep their qualified names and unescaped attribute values. Text
/// and CDATA sections both become text nodes. XML declarations, processing
/// instructions and doctypes are dropped. Common HTML named entities such as
/// `&nbsp;` are resolved as well as the XML ones.
pub fn parse_document(text: &str, options: &ReadOptions) -> Result<Document, ParseError> {
    TreeBuilder::new(text, *options).build()
}

struct TreeBuilder<'a> {
    reader: Reader<&'a [u8]>,
    options: ReadOptions,
    doc: Document,
    /// Open elements, innermost last
    open: Vec<(NodeId, String)>,
}

impl<'a> TreeBuilder<'a> {
    fn new(text: &'a str, options: ReadOptions) -> Self {
        let mut reader = Reader::from_str(text);
        let config = reader.config_mut();
        config.trim_text_start = false;
        config.trim_text_end = false;
        config.check_end_names = false;

        Self {
            reader,
            options,
            doc: Document::new(),
            open: Vec::new(),
        }
    }

    fn build(mut self) -> Result<Document, ParseError> {
        loop {
            let event = match self.reader.read_event() {
                Ok(event) => event,
                Err(e) => {
                    return Err(ParseError::InvalidXml(format!(
                        "{} at byte {}",
                        e,
                        self.reader.error_position()
                    )))
                }
            };

            match event {
                Event::Start(e) => {
                    let (name, attributes) = element_parts(&e)?;
                    let id = self.doc.push_element(self.parent(), name.clone(), attributes);
                    self.open.push((id, name));
                }
                Event::Empty(e) => {
                    let (name, attributes) = element_parts(&e)?;
                    self.doc.push_element(self.parent(), name, attributes);
                }
                Event::End(e) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    self.close(&name)?;
                }
                Event::Text(e) => {
                    let text = unescape_text(&e)?;
                    self.push_text(text);
                }
                Event::CData(e) => {
                    let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                    self.push_text(text);
                }
                Event::Comment(e) => {
                    if self.options.keep_comments {
                        let content = String::from_utf8_lossy(&e).into_owned();
                        self.doc.push_comment(self.parent(), content);
                    }
                }
                Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
                Event::Eof => break,
            }
        }

        if let Some((_, name)) = self.open.last() {
            return Err(ParseError::InvalidXml(format!(
                "unexpected end of input: <{}> is not closed",
                name
            )));
        }
        Ok(self.doc)
    }

    fn parent(&self) -> Option<NodeId> {
        self.open.last().map(|(id, _)| *id)
    }

    fn close(&mut self, name: &str) -> Result<(), ParseError> {
        match self.open.pop() {
            Some((_, expected)) if expected == name => Ok(()),
            Some((_, expected)) => Err(ParseError::InvalidXml(format!(
                "mismatched closing tag: expected </{}>, found </{}> at byte {}",
                expected,
                name,
                self.reader.buffer_position()
            ))),
            None => Err(ParseError::InvalidXml(format!(
                "unexpected closing tag </{}> at byte {}",
                name,
                self.reader.buffer_position()
            ))),
        }
    }

    fn push_text(&mut self, text: String) {
        if !self.options.keep_whitespace && text.trim().is_empty() {
            return;
        }
        self.doc.push_text(self.parent(), text);
    }
}

fn element_parts(e: &BytesStart<'_>) -> Result<(String, Attributes), ParseError> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut attributes = Attributes::new();
    for attr in e.attributes() {
        let attr = attr
            .map_err(|err| ParseError::InvalidXml(format!("bad attribute in <{}>: {}", name, err)))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value_with(html_entity)
            .map_err(|err| ParseError::InvalidXml(format!("bad value for {}: {}", key, err)))?;
        attributes.insert(key, value.into_owned());
    }
    Ok((name, attributes))
}

fn unescape_text(e: &BytesText<'_>) -> Result<String, ParseError> {
    e.unescape_with(html_entity)
        .map(|text| text.into_owned())
        .map_err(|err| ParseError::InvalidXml(format!("invalid text content: {}", err)))
}

/// HTML named entities that show up in ebook XHTML without a DTD
fn html_entity(name: &str) -> Option<&'static str> {
    Some(match name {
        "nbsp" => "\u{a0}",
        "mdash" => "\u{2014}",
        "ndash" => "\u{2013}",
        "hellip" => "\u{2026}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "ldquo" => "\u{201c}",
        "rdquo" => "\u{201d}",
        "copy" => "\u{a9}",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeType;

    #[test]
    fn test_elements_text_and_attributes() {
        let doc = parse_document(
            r#"<?xml version="1.0"?>
<html xmlns="http://www.w3.org/1999/xhtml">
  <body class="main">
    <p id="p1">Tom &amp; Jerry&nbsp;&mdash; together</p>
    <br/>
  </body>
</html>"#,
            &ReadOptions::default(),
        )
        .unwrap();

        let html = doc.root().unwrap();
        assert_eq!(html.name(), Some("html"));
        let body = html.children().head().unwrap();
        assert_eq!(body.attribute("class"), Some("main"));

        let children: Vec<_> = body.children().iter().collect();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].attribute("id"), Some("p1"));
        assert_eq!(children[0].text_content(), "Tom & Jerry\u{a0}\u{2014} together");
        assert_eq!(children[1].name(), Some("br"));
        assert!(!children[1].has_children());
    }

    #[test]
    fn test_whitespace_and_comments_options() {
        let source = "<a> <!-- note --> <b/></a>";

        let doc = parse_document(source, &ReadOptions::default()).unwrap();
        let kinds: Vec<_> = doc.root().unwrap().children().iter().map(|n| n.node_type()).collect();
        assert_eq!(kinds, vec![NodeType::Comment, NodeType::Element]);

        let options = ReadOptions::new().keep_whitespace(true).keep_comments(false);
        let doc = parse_document(source, &options).unwrap();
        let kinds: Vec<_> = doc.root().unwrap().children().iter().map(|n| n.node_type()).collect();
        assert_eq!(kinds, vec![NodeType::Text, NodeType::Text, NodeType::Element]);
    }

    #[test]
    fn test_cdata_becomes_text() {
        let doc = parse_document("<s><![CDATA[a < b]]></s>", &ReadOptions::default()).unwrap();
        assert_eq!(doc.root().unwrap().text_content(), "a < b");
    }

    #[test]
    fn test_prefixed_names_are_kept() {
        let doc = parse_document(
            r#"<metadata><dc:title>Emma</dc:title></metadata>"#,
            &ReadOptions::default(),
        )
        .unwrap();
        let title = doc.root().unwrap().children().head().unwrap();
        assert_eq!(title.name(), Some("dc:title"));
        assert_eq!(title.local_name(), Some("title"));
    }

    #[test]
    fn test_mismatched_tag() {
        let err = parse_document("<a><b></a></b>", &ReadOptions::default()).unwrap_err();
        assert!(matches!(err, ParseError::InvalidXml(ref msg) if msg.contains("expected </b>")));
    }

    #[test]
    fn test_unclosed_tag() {
        let err = parse_document("<a><b></b>", &ReadOptions::default()).unwrap_err();
        assert!(matches!(err, ParseError::InvalidXml(ref msg) if msg.contains("<a> is not closed")));
    }

    #[test]
    fn test_stray_closing_tag() {
        let err = parse_document("<a/></b>", &ReadOptions::default()).unwrap_err();
        assert!(matches!(err, ParseError::InvalidXml(_)));
    }
}
