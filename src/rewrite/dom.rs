//! Thin helpers over the parsed document tree

use kuchiki::iter::NodeIterator;
use kuchiki::traits::TendrilSink;
use kuchiki::{ElementData, NodeDataRef, NodeRef};

/// Doctype written in front of every serialized document
pub const DOCTYPE: &str = "<!DOCTYPE html>";

pub fn parse(html: &str) -> NodeRef {
    kuchiki::parse_html().one(html)
}

/// Serialize a parsed document as `<!DOCTYPE html>` followed by its root element
pub fn serialize(document: &NodeRef) -> String {
    match document.select_first("html") {
        Ok(root) => format!("{DOCTYPE}\n{}", root.as_node().to_string()),
        Err(()) => document.to_string(),
    }
}

/// Collect all elements matching `selector`, so the tree can be mutated afterwards
pub fn select_all(document: &NodeRef, selector: &str) -> Vec<NodeDataRef<ElementData>> {
    match document.select(selector) {
        Ok(found) => found.collect(),
        Err(()) => Vec::new(),
    }
}

/// Find the element with the given `id` attribute
pub fn element_by_id(document: &NodeRef, id: &str) -> Option<NodeDataRef<ElementData>> {
    document
        .descendants()
        .elements()
        .find(|el| el.attributes.borrow().get("id") == Some(id))
}

/// Read an attribute value
pub fn attr(element: &NodeDataRef<ElementData>, name: &str) -> Option<String> {
    element.attributes.borrow().get(name).map(ToString::to_string)
}

pub fn set_attr(element: &NodeDataRef<ElementData>, name: &str, value: String) {
    element.attributes.borrow_mut().insert(name, value);
}

/// Create a detached element by parsing `markup` and lifting out the first `tag`
pub fn new_element(markup: &str, tag: &str) -> Option<NodeRef> {
    let scratch = parse(markup);
    let node = scratch.select_first(tag).ok()?.as_node().clone();
    node.detach();
    Some(node)
}

/// Current classes of an element, in attribute order
pub fn classes(element: &ElementData) -> Vec<String> {
    element
        .attributes
        .borrow()
        .get("class")
        .map(|value| value.split_ascii_whitespace().map(ToString::to_string).collect())
        .unwrap_or_default()
}

/// Replace the class list; an empty list removes the attribute
pub fn set_classes(element: &ElementData, classes: &[String]) {
    let mut attributes = element.attributes.borrow_mut();
    if classes.is_empty() {
        attributes.remove("class");
    } else {
        attributes.insert("class", classes.join(" "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_prefixes_doctype() {
        let doc = parse("<p>hi</p>");
        let out = serialize(&doc);
        assert!(out.starts_with("<!DOCTYPE html>\n<html>"));
        assert!(out.contains("<p>hi</p>"));
    }

    #[test]
    fn test_serialize_is_stable() {
        let once = serialize(&parse("<html><head><title>t</title></head><body>x</body></html>\n"));
        let twice = serialize(&parse(&once));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_element_by_id_and_classes() {
        let doc = parse(r#"<div id="a" class="one  two"></div>"#);
        let el = element_by_id(&doc, "a").unwrap();
        assert_eq!(classes(&el), ["one", "two"]);
        set_classes(&el, &["three".to_string()]);
        assert_eq!(attr(&el, "class").as_deref(), Some("three"));
        set_classes(&el, &[]);
        assert!(attr(&el, "class").is_none());
        assert!(element_by_id(&doc, "missing").is_none());
    }

    #[test]
    fn test_new_element_is_detached() {
        let style = new_element("<style></style>", "style").unwrap();
        assert!(style.parent().is_none());
    }
}
