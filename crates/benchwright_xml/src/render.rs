//! Deterministic XML renderer.
//!
//! Renders an [`Element`] tree with four-space indentation, one element per
//! line, self-closing empty elements, and CDATA sections where requested.
//! Output is byte-identical for identical trees.

use crate::element::Element;
use crate::escape::{escape_attr, escape_text};

const INDENT: &str = "    ";

/// Render an element tree to an XML string.
#[must_use]
pub fn render(root: &Element) -> String {
    let mut out = String::new();
    render_into(root, 0, &mut out);
    out
}

fn render_into(el: &Element, depth: usize, out: &mut String) {
    let pad = INDENT.repeat(depth);
    out.push_str(&pad);
    out.push('<');
    out.push_str(&el.tag);
    for (name, value) in &el.attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_attr(value));
        out.push('"');
    }

    let has_text = el.text.as_deref().is_some_and(|t| !t.is_empty());
    if !has_text && el.children.is_empty() {
        out.push_str("/>\n");
        return;
    }
    out.push('>');

    if let Some(text) = el.text.as_deref() {
        if el.cdata {
            out.push_str("<![CDATA[\n");
            out.push_str(text);
            if !text.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(&pad);
            out.push_str("]]>");
        } else {
            out.push_str(&escape_text(text));
        }
    }

    if el.children.is_empty() {
        out.push_str(&format!("</{}>\n", el.tag));
        return;
    }

    out.push('\n');
    for child in &el.children {
        render_into(child, depth + 1, out);
    }
    out.push_str(&pad);
    out.push_str(&format!("</{}>\n", el.tag));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_closing_empty_element() {
        let el = Element::new("param").attr("name", "x");
        assert_eq!(render(&el), "<param name=\"x\"/>\n");
    }

    #[test]
    fn test_text_element_single_line() {
        let el = Element::new("description").text("A tool");
        assert_eq!(render(&el), "<description>A tool</description>\n");
    }

    #[test]
    fn test_attr_escaping() {
        let el = Element::new("param").attr("label", "a < \"b\"");
        assert_eq!(render(&el), "<param label=\"a &lt; &quot;b&quot;\"/>\n");
    }

    #[test]
    fn test_nested_indentation() {
        let tree = Element::new("inputs")
            .child(Element::new("section").attr("name", "s").child(Element::new("param")));
        let expected = "<inputs>\n    <section name=\"s\">\n        <param/>\n    </section>\n</inputs>\n";
        assert_eq!(render(&tree), expected);
    }

    #[test]
    fn test_cdata_is_not_escaped() {
        let el = Element::new("command")
            .attr("detect_errors", "exit_code")
            .cdata("run 'a' && run 'b'");
        let rendered = render(&el);
        assert!(rendered.contains("<![CDATA[\nrun 'a' && run 'b'\n]]>"));
        assert!(!rendered.contains("&amp;&amp;"));
    }

    #[test]
    fn test_render_deterministic() {
        let el = Element::new("tool")
            .attr("id", "t")
            .child(Element::new("inputs"))
            .child(Element::new("outputs"));
        assert_eq!(render(&el), render(&el));
    }
}
