//! HTML serialization of the element tree

use crate::element::{Element, Node};

/// Elements rendered without a closing tag.
const VOID_ELEMENTS: &[&str] = &[
	"area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
	"wbr",
];

/// Escapes text for use in HTML content and double-quoted attributes.
///
/// # Examples
///
/// ```
/// use formsmith_dom::html_escape;
///
/// assert_eq!(html_escape(r#"<a href="x">"#), "&lt;a href=&quot;x&quot;&gt;");
/// ```
pub fn html_escape(s: &str) -> String {
	s.replace('&', "&amp;")
		.replace('<', "&lt;")
		.replace('>', "&gt;")
		.replace('"', "&quot;")
		.replace('\'', "&#x27;")
}

impl Element {
	pub fn is_void(&self) -> bool {
		VOID_ELEMENTS.iter().any(|tag| self.is(tag))
	}

	/// Renders the element and its subtree to an HTML string.
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_dom::Element;
	///
	/// let wrapper = Element::new("div");
	/// let input = Element::new("input");
	/// input.set_attribute("name", "email");
	/// wrapper.append_child(&input).unwrap();
	///
	/// assert_eq!(wrapper.render_to_string(), r#"<div><input name="email" /></div>"#);
	/// ```
	pub fn render_to_string(&self) -> String {
		let mut output = String::new();
		self.render_into(&mut output);
		output
	}

	fn render_into(&self, output: &mut String) {
		let tag = self.tag_name();
		output.push('<');
		output.push_str(&tag);

		for (name, value) in self.attributes() {
			output.push(' ');
			output.push_str(&name);
			output.push_str("=\"");
			output.push_str(&html_escape(&value));
			output.push('"');
		}

		if self.is_void() {
			output.push_str(" />");
			return;
		}

		output.push('>');
		for node in self.nodes() {
			match node {
				Node::Element(child) => child.render_into(output),
				Node::Text(text) => output.push_str(&html_escape(&text)),
			}
		}
		output.push_str("</");
		output.push_str(&tag);
		output.push('>');
	}
}
