// Generic XML element tree the description parser reads from

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{DescriptionError, DescriptionResult};

/// One element with its attributes, child elements and concatenated text content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlNode {
    /// Qualified name as written, prefix included
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
    pub text: String,
}

fn local_part(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}

impl XmlNode {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Name without its namespace prefix
    pub fn local_name(&self) -> &str {
        local_part(&self.name)
    }

    /// First attribute whose local name matches, ignoring the prefix
    pub fn attr(&self, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| !key.starts_with("xmlns") && local_part(key) == local)
            .map(|(_, value)| value.as_str())
    }

    /// Attribute value trimmed, with empty values treated as absent
    pub fn attr_text(&self, local: &str) -> Option<&str> {
        self.attr(local).map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn child(&self, local: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.local_name() == local)
    }

    pub fn children_named<'s, 'n>(&'s self, local: &'n str) -> impl Iterator<Item = &'s XmlNode> + 'n
    where
        's: 'n,
    {
        self.children.iter().filter(move |c| c.local_name() == local)
    }

    /// Trimmed text of the first matching child, `None` when missing or blank
    pub fn child_text(&self, local: &str) -> Option<&str> {
        self.child(local)
            .map(|c| c.text.trim())
            .filter(|t| !t.is_empty())
    }

    /// Parse a complete document and return its root element
    pub fn parse(text: &str) -> DescriptionResult<XmlNode> {
        let mut reader = Reader::from_str(text);
        reader.trim_text(true);
        let mut buf = Vec::new();
        let mut stack: Vec<XmlNode> = Vec::new();
        let mut root: Option<XmlNode> = None;

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    if root.is_some() && stack.is_empty() {
                        return Err(multiple_roots());
                    }
                    stack.push(element(&e)?);
                }
                Event::Empty(e) => {
                    let node = element(&e)?;
                    attach(node, &mut stack, &mut root)?;
                }
                Event::End(_) => {
                    let node = stack.pop().ok_or_else(|| {
                        DescriptionError::MalformedDocument("unexpected closing tag".to_string())
                    })?;
                    attach(node, &mut stack, &mut root)?;
                }
                Event::Text(t) => {
                    if let Some(top) = stack.last_mut() {
                        top.text.push_str(&t.unescape()?);
                    }
                }
                Event::CData(c) => {
                    if let Some(top) = stack.last_mut() {
                        top.text.push_str(&String::from_utf8_lossy(&c.into_inner()));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if let Some(open) = stack.last() {
            return Err(DescriptionError::MalformedDocument(format!(
                "unclosed element <{}>",
                open.name
            )));
        }
        root.ok_or_else(|| DescriptionError::MalformedDocument("no root element".to_string()))
    }
}

fn element(start: &BytesStart<'_>) -> DescriptionResult<XmlNode> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut node = XmlNode::new(&name);
    for attr in start.attributes() {
        let attr = attr.map_err(|err| DescriptionError::MalformedDocument(err.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        node.attributes.push((key, value));
    }
    Ok(node)
}

fn attach(node: XmlNode, stack: &mut [XmlNode], root: &mut Option<XmlNode>) -> DescriptionResult<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None if root.is_some() => return Err(multiple_roots()),
        None => *root = Some(node),
    }
    Ok(())
}

fn multiple_roots() -> DescriptionError {
    DescriptionError::MalformedDocument("more than one root element".to_string())
}
