//! Ordered XML element tree.

/// One XML element.
///
/// Attributes and children keep insertion order; nothing is ever sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Tag name
    pub tag: String,
    /// Attributes in insertion order
    pub attrs: Vec<(String, String)>,
    /// Text content, rendered between the open and close tags
    pub text: Option<String>,
    /// Whether text content renders inside a CDATA section
    pub cdata: bool,
    /// Child elements in insertion order
    pub children: Vec<Element>,
}

impl Element {
    /// Create an empty element.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            text: None,
            cdata: false,
            children: Vec::new(),
        }
    }

    /// Add an attribute.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    /// Set text content.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set text content rendered inside a CDATA section.
    #[must_use]
    pub fn cdata(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self.cdata = true;
        self
    }

    /// Add a child element.
    #[must_use]
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Append a child element in place.
    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Look up an attribute value.
    #[must_use]
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// First direct child with the given tag.
    #[must_use]
    pub fn find(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.tag == tag)
    }

    /// All direct children with the given tag.
    #[must_use]
    pub fn find_all(&self, tag: &str) -> Vec<&Element> {
        self.children.iter().filter(|c| c.tag == tag).collect()
    }

    /// First element anywhere in the subtree with the given tag and `name`
    /// attribute. Search is depth-first in document order.
    #[must_use]
    pub fn find_named(&self, tag: &str, name: &str) -> Option<&Element> {
        for child in &self.children {
            if child.tag == tag && child.get_attr("name") == Some(name) {
                return Some(child);
            }
            if let Some(found) = child.find_named(tag, name) {
                return Some(found);
            }
        }
        None
    }

    /// Tags of the direct children, in document order.
    #[must_use]
    pub fn child_tags(&self) -> Vec<&str> {
        self.children.iter().map(|c| c.tag.as_str()).collect()
    }
}
