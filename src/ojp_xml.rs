//! Namespace-aware lookup helpers over OJP/SIRI response documents.
//!
//! The OJP schema nests optional elements deeply; every accessor here
//! returns `Option` so the consumers can spell out their fallback per
//! field instead of sprinkling presence checks through the tree walks.

use roxmltree::Node;

pub const SIRI_NS: &str = "http://www.siri.org.uk/siri";
pub const OJP_NS: &str = "http://www.vdv.de/ojp";

pub fn element_is(node: Node, ns: &str, name: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == name
        && node.tag_name().namespace() == Some(ns)
}

/// First direct child element `{ns}name`.
pub fn child<'a, 'input>(
    parent: Node<'a, 'input>,
    ns: &str,
    name: &str,
) -> Option<Node<'a, 'input>> {
    parent.children().find(|c| element_is(*c, ns, name))
}

/// All direct child elements `{ns}name`, in document order.
pub fn children<'a, 'input: 'a>(
    parent: Node<'a, 'input>,
    ns: &'static str,
    name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    parent.children().filter(move |c| element_is(*c, ns, name))
}

/// First descendant element `{ns}name` (the `.//` lookup).
pub fn descendant<'a, 'input>(
    scope: Node<'a, 'input>,
    ns: &str,
    name: &str,
) -> Option<Node<'a, 'input>> {
    scope
        .descendants()
        .find(|c| *c != scope && element_is(*c, ns, name))
}

/// All descendant elements `{ns}name`, in document order.
pub fn descendants<'a, 'input: 'a>(
    scope: Node<'a, 'input>,
    ns: &'static str,
    name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    scope
        .descendants()
        .filter(move |c| element_is(*c, ns, name))
}

/// Trimmed, non-empty text content of a node.
pub fn text_of(node: Node) -> Option<String> {
    node.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

pub fn child_text(parent: Node, ns: &str, name: &str) -> Option<String> {
    child(parent, ns, name).and_then(text_of)
}

pub fn descendant_text(scope: Node, ns: &str, name: &str) -> Option<String> {
    descendant(scope, ns, name).and_then(text_of)
}
