//! Arena tree back to XML text.

use quick_xml::escape::escape;

use super::arena::{Document, NodeData, NodeId};

/// Serialize the whole document.
///
/// Output is compact: no whitespace is added between nodes, so the result
/// is suited for [`crate::pretty::format_markup`] when shown to a person.
pub fn serialize(doc: &Document) -> String {
    let mut out = String::new();
    for child in doc.children(doc.document()) {
        write_node(doc, child, &mut out);
    }
    out
}

/// Serialize a single node and its subtree.
pub fn serialize_node(doc: &Document, id: NodeId) -> String {
    let mut out = String::new();
    write_node(doc, id, &mut out);
    out
}

fn write_node(doc: &Document, id: NodeId, out: &mut String) {
    let Some(node) = doc.get(id) else {
        return;
    };

    match &node.data {
        NodeData::Document => {
            for child in doc.children(id) {
                write_node(doc, child, out);
            }
        }
        NodeData::Element { name, attrs, .. } => {
            out.push('<');
            out.push_str(name);
            for attr in attrs {
                out.push(' ');
                out.push_str(&attr.name);
                out.push_str("=\"");
                out.push_str(&escape(attr.value.as_str()));
                out.push('"');
            }

            if node.first_child.is_none() {
                out.push_str("/>");
                return;
            }

            out.push('>');
            for child in doc.children(id) {
                write_node(doc, child, out);
            }
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
        // Already escaped at parse time
        NodeData::Text(raw) => out.push_str(raw),
        NodeData::CData(text) => {
            out.push_str("<![CDATA[");
            out.push_str(text);
            out.push_str("]]>");
        }
        NodeData::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
        NodeData::ProcessingInstruction(body) | NodeData::Declaration(body) => {
            out.push_str("<?");
            out.push_str(body);
            out.push_str("?>");
        }
        NodeData::Doctype(body) => {
            out.push_str("<!DOCTYPE ");
            out.push_str(body.trim_start());
            out.push('>');
        }
    }
}
