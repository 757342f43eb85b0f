//! Page-level document

use crate::element::Element;

/// A page holding a `body` element.
///
/// Cloning a `Document` yields another handle to the same page.
#[derive(Debug, Clone)]
pub struct Document {
	body: Element,
}

impl Document {
	pub fn new() -> Self {
		Self {
			body: Element::new("body"),
		}
	}

	pub fn body(&self) -> &Element {
		&self.body
	}

	/// Creates a detached element; attach it with `append_child`.
	pub fn create_element(&self, tag: &str) -> Element {
		Element::new(tag)
	}

	/// Finds the first element in the page with the given `id` attribute.
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_dom::Document;
	///
	/// let document = Document::new();
	/// let status = document.create_element("div");
	/// status.set_id("responseMessage");
	/// document.body().append_child(&status).unwrap();
	///
	/// assert!(document.get_element_by_id("responseMessage").is_some());
	/// assert!(document.get_element_by_id("missing").is_none());
	/// ```
	pub fn get_element_by_id(&self, id: &str) -> Option<Element> {
		if self.body.id().as_deref() == Some(id) {
			return Some(self.body.clone());
		}
		self.body.find_by_id(id)
	}
}

impl Default for Document {
	fn default() -> Self {
		Self::new()
	}
}
