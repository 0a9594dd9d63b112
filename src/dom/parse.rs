//! XML text to arena tree.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::arena::{Attribute, Document, NodeData, NodeId};
use crate::error::{Error, Result};

/// Local name of the required root element.
const ROOT_ELEMENT: &str = "svg";

/// Parse XML text into a [`Document`] whose root element is `<svg>`.
pub fn parse(text: &str) -> Result<Document> {
    let mut reader = Reader::from_str(strip_bom(text));
    reader.config_mut().trim_text(false);
    reader.config_mut().check_end_names = true;

    let mut doc = Document::new();
    let mut open: Vec<(NodeId, String)> = Vec::new();
    let mut scopes = NamespaceScopes::default();

    loop {
        let parent = open.last().map_or(doc.document(), |(id, _)| *id);
        match reader.read_event()? {
            Event::Start(e) => {
                let id = start_element(&mut doc, &mut scopes, parent, &e, !open.is_empty())?;
                open.push((id, decode(e.name().as_ref())));
            }
            Event::Empty(e) => {
                start_element(&mut doc, &mut scopes, parent, &e, !open.is_empty())?;
                scopes.pop();
            }
            Event::End(e) => {
                let name = decode(e.name().as_ref());
                match open.pop() {
                    Some((_, open_name)) if open_name == name => scopes.pop(),
                    Some((_, open_name)) => return Err(Error::UnclosedTag(open_name)),
                    None => return Err(Error::UnexpectedEndTag(name)),
                }
            }
            Event::Text(e) => {
                let raw = decode(&e);
                if open.is_empty() {
                    if !raw.trim().is_empty() {
                        return Err(Error::ContentOutsideRoot(raw.trim().to_string()));
                    }
                } else {
                    unescape(&raw)?;
                    doc.append_text(parent, &raw);
                }
            }
            Event::GeneralRef(e) => {
                let raw = format!("&{};", decode(&e));
                if open.is_empty() {
                    return Err(Error::ContentOutsideRoot(raw));
                }
                unescape(&raw)?;
                doc.append_text(parent, &raw);
            }
            Event::CData(e) => {
                let node = doc.create_node(NodeData::CData(decode(&e)));
                doc.append(parent, node);
            }
            Event::Comment(e) => {
                let node = doc.create_node(NodeData::Comment(decode(&e)));
                doc.append(parent, node);
            }
            Event::PI(e) => {
                let node = doc.create_node(NodeData::ProcessingInstruction(decode(&e)));
                doc.append(parent, node);
            }
            Event::Decl(e) => {
                let node = doc.create_node(NodeData::Declaration(decode(&e)));
                doc.append(parent, node);
            }
            Event::DocType(e) => {
                let node = doc.create_node(NodeData::Doctype(decode(&e)));
                doc.append(parent, node);
            }
            Event::Eof => break,
            #[allow(unreachable_patterns)]
            _ => {}
        }
    }

    if let Some((_, name)) = open.pop() {
        return Err(Error::UnclosedTag(name));
    }

    match doc.root_element() {
        Some(root) if doc.local_name(root) == Some(ROOT_ELEMENT) => Ok(doc),
        _ => Err(Error::MissingRoot),
    }
}

/// Create an element for a start (or empty) tag and attach it to `parent`.
///
/// Pushes a namespace scope that the caller pops when the element closes.
fn start_element(
    doc: &mut Document,
    scopes: &mut NamespaceScopes,
    parent: NodeId,
    e: &BytesStart<'_>,
    nested: bool,
) -> Result<NodeId> {
    if !nested && doc.root_element().is_some() {
        return Err(Error::MultipleRoots);
    }

    let name = decode(e.name().as_ref());
    let mut attrs = Vec::new();
    let mut declared = Vec::new();

    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = decode(attr.key.as_ref());
        let raw = decode(&attr.value);
        if raw.contains('<') {
            return Err(Error::InvalidAttributeValue(key));
        }
        let value = unescape(&raw)?;

        if key == "xmlns" {
            declared.push((String::new(), value.clone()));
        } else if let Some(prefix) = key.strip_prefix("xmlns:") {
            declared.push((prefix.to_string(), value.clone()));
        }
        attrs.push(Attribute { name: key, value });
    }

    scopes.push(declared);
    let prefix = name.split_once(':').map_or("", |(p, _)| p);
    let namespace = scopes.resolve(prefix).to_string();

    let id = doc.create_element(name, namespace, attrs);
    doc.append(parent, id);
    Ok(id)
}

/// Stack of `xmlns` declarations, one frame per open element.
#[derive(Default)]
struct NamespaceScopes {
    frames: Vec<Vec<(String, String)>>,
}

impl NamespaceScopes {
    fn push(&mut self, declared: Vec<(String, String)>) {
        self.frames.push(declared);
    }

    fn pop(&mut self) {
        self.frames.pop();
    }

    fn resolve(&self, prefix: &str) -> &str {
        self.frames
            .iter()
            .rev()
            .flat_map(|frame| frame.iter())
            .find(|(p, _)| p == prefix)
            .map_or("", |(_, uri)| uri.as_str())
    }
}

/// Resolve character and predefined entity references.
fn unescape(raw: &str) -> Result<String> {
    quick_xml::escape::unescape(raw)
        .map(|text| text.into_owned())
        .map_err(|e| Error::InvalidEntity(e.to_string()))
}

fn decode(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}
