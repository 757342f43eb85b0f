//! Status element used by the submission pipeline

use crate::settings::FormSettings;
use formsmith_dom::{Document, Element};

/// Handle to the element that displays submission status.
#[derive(Debug, Clone)]
pub struct StatusMessage {
	element: Element,
}

impl StatusMessage {
	pub fn new(element: Element) -> Self {
		Self { element }
	}

	/// Looks up the status element configured in `settings`.
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_dom::Document;
	/// use formsmith_forms::{FormSettings, StatusMessage};
	///
	/// let document = Document::new();
	/// let settings = FormSettings::default();
	/// assert!(StatusMessage::from_document(&document, &settings).is_none());
	///
	/// let element = document.create_element("div");
	/// element.set_id("responseMessage");
	/// document.body().append_child(&element).unwrap();
	/// assert!(StatusMessage::from_document(&document, &settings).is_some());
	/// ```
	pub fn from_document(document: &Document, settings: &FormSettings) -> Option<Self> {
		document
			.get_element_by_id(&settings.status_element_id)
			.map(Self::new)
	}

	pub fn element(&self) -> &Element {
		&self.element
	}

	/// Sets text and color and makes the element visible.
	pub fn show(&self, text: &str, color: &str) {
		self.element.set_text_content(text);
		self.element.set_style("color", color);
		self.element.set_style("display", "block");
	}

	/// Hides the element, keeping its text.
	pub fn hide(&self) {
		self.element.set_style("display", "none");
	}

	pub fn is_visible(&self) -> bool {
		self.element.style("display").as_deref() != Some("none")
	}

	pub fn text(&self) -> String {
		self.element.text_content()
	}

	pub fn color(&self) -> Option<String> {
		self.element.style("color")
	}
}
