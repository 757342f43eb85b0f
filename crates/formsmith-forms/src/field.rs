//! Field fragments
//!
//! A [`FieldFragment`] is the unit produced by every field factory: a `div`
//! wrapper holding an optional `label`, one control, and (for some kinds) an
//! error element. The fragment keeps typed handles to each part, so wiring
//! code never has to rediscover them by walking the tree.

use formsmith_dom::Element;
use serde::{Deserialize, Serialize};

/// Class toggled on a control that passed validation.
pub const VALID_CLASS: &str = "is-valid";
/// Class toggled on a control that failed validation.
pub const INVALID_CLASS: &str = "is-invalid";
/// Marker class of inline error elements.
pub const ERROR_MESSAGE_CLASS: &str = "error-message";

/// Kind of control held by a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
	Text,
	Password,
	Textarea,
	Dropdown,
	Checkbox,
	Radio,
	Date,
	File,
}

impl FieldKind {
	/// The `type` attribute of `input`-based kinds.
	pub fn input_type(&self) -> Option<&'static str> {
		match self {
			FieldKind::Text => Some("text"),
			FieldKind::Password => Some("password"),
			FieldKind::Checkbox => Some("checkbox"),
			FieldKind::Radio => Some("radio"),
			FieldKind::Date => Some("date"),
			FieldKind::File => Some("file"),
			FieldKind::Textarea | FieldKind::Dropdown => None,
		}
	}

	pub fn control_tag(&self) -> &'static str {
		match self {
			FieldKind::Textarea => "textarea",
			FieldKind::Dropdown => "select",
			_ => "input",
		}
	}

	/// Checkboxes and radios render the control before the label.
	pub fn label_after_control(&self) -> bool {
		matches!(self, FieldKind::Checkbox | FieldKind::Radio)
	}

	/// Infers the kind of an existing control element.
	pub fn from_control(control: &Element) -> Option<Self> {
		if control.is("textarea") {
			return Some(FieldKind::Textarea);
		}
		if control.is("select") {
			return Some(FieldKind::Dropdown);
		}
		if !control.is("input") {
			return None;
		}
		let input_type = control
			.get_attribute("type")
			.unwrap_or_else(|| "text".to_string());
		match input_type.to_ascii_lowercase().as_str() {
			"password" => Some(FieldKind::Password),
			"checkbox" => Some(FieldKind::Checkbox),
			"radio" => Some(FieldKind::Radio),
			"date" => Some(FieldKind::Date),
			"file" => Some(FieldKind::File),
			_ => Some(FieldKind::Text),
		}
	}
}

/// One `(value, display text)` pair of a dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
	pub value: String,
	pub text: String,
}

impl SelectOption {
	pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
		Self {
			value: value.into(),
			text: text.into(),
		}
	}
}

impl<V: Into<String>, T: Into<String>> From<(V, T)> for SelectOption {
	fn from((value, text): (V, T)) -> Self {
		Self::new(value, text)
	}
}

/// Returns true for `input`, `textarea` and `select` elements.
pub fn is_input_like(element: &Element) -> bool {
	element.is("input") || element.is("textarea") || element.is("select")
}

/// A labeled control wrapped in a `div`.
#[derive(Debug, Clone)]
pub struct FieldFragment {
	kind: FieldKind,
	name: String,
	wrapper: Element,
	label: Option<Element>,
	control: Element,
	error: Option<Element>,
}

impl FieldFragment {
	/// Wraps `control` together with an optional label.
	pub(crate) fn assemble(
		kind: FieldKind,
		name: &str,
		label_text: Option<&str>,
		control: Element,
	) -> Self {
		let wrapper = Element::new("div");
		let label = label_text
			.filter(|text| !text.is_empty())
			.map(|text| build_label(name, text));

		// Appending fresh elements to a fresh wrapper cannot fail.
		if kind.label_after_control() {
			let _ = wrapper.append_child(&control);
			if let Some(label) = &label {
				let _ = wrapper.append_child(label);
			}
		} else {
			if let Some(label) = &label {
				let _ = wrapper.append_child(label);
			}
			let _ = wrapper.append_child(&control);
		}

		Self {
			kind,
			name: name.to_string(),
			wrapper,
			label,
			control,
			error: None,
		}
	}

	/// Places an empty error element right after the control.
	pub(crate) fn attach_error_element(mut self) -> Self {
		let error = Element::new("small");
		error.add_class(ERROR_MESSAGE_CLASS);
		error.set_style("color", "red");
		let next = self.control.next_element_sibling();
		let _ = self.wrapper.insert_before(&error, next.as_ref());
		self.error = Some(error);
		self
	}

	/// Rebuilds a fragment handle from a wrapper element already in a tree.
	///
	/// The control is the first `input`, `textarea` or `select` descendant;
	/// the error element is the control's next sibling when it carries the
	/// `error-message` class.
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::{FieldFragment, FieldKind, create_password_input};
	///
	/// let original = create_password_input("password", Some("Password:"), "Enter your password");
	/// let rebuilt = FieldFragment::from_wrapper(original.wrapper()).unwrap();
	///
	/// assert_eq!(rebuilt.kind(), FieldKind::Password);
	/// assert_eq!(rebuilt.name(), "password");
	/// assert!(rebuilt.error_element().is_some());
	/// ```
	pub fn from_wrapper(wrapper: &Element) -> Option<Self> {
		let control = wrapper.find_first(is_input_like)?;
		let kind = FieldKind::from_control(&control)?;
		let name = control.name().unwrap_or_default();
		let label = wrapper.find_by_tag("label");
		let error = control
			.next_element_sibling()
			.filter(|e| e.has_class(ERROR_MESSAGE_CLASS));
		Some(Self {
			kind,
			name,
			wrapper: wrapper.clone(),
			label,
			control,
			error,
		})
	}

	pub fn kind(&self) -> FieldKind {
		self.kind
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn wrapper(&self) -> &Element {
		&self.wrapper
	}

	pub fn label(&self) -> Option<&Element> {
		self.label.as_ref()
	}

	pub fn control(&self) -> &Element {
		&self.control
	}

	/// The error element associated with this field at creation time.
	pub fn error_element(&self) -> Option<&Element> {
		self.error.as_ref()
	}

	pub fn value(&self) -> String {
		self.control.value()
	}

	pub fn set_value(&self, value: &str) {
		self.control.set_value(value);
	}

	pub fn is_required(&self) -> bool {
		self.control.has_attribute("required")
	}

	pub fn set_required(&self, required: bool) {
		self.control.set_bool_attribute("required", required);
	}

	pub fn is_checked(&self) -> bool {
		self.control.has_attribute("checked")
	}

	pub fn set_checked(&self, checked: bool) {
		self.control.set_bool_attribute("checked", checked);
	}

	pub fn into_element(self) -> Element {
		self.wrapper
	}
}

fn build_label(name: &str, text: &str) -> Element {
	let label = Element::new("label");
	label.set_attribute("for", name);
	label.set_text_content(text);
	label
}

/// Creates an `input` control of the given type and name.
pub(crate) fn input_control(input_type: &str, name: &str) -> Element {
	let input = Element::new("input");
	input.set_attribute("type", input_type);
	input.set_attribute("name", name);
	input
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(FieldKind::Text, "input", Some("text"))]
	#[case(FieldKind::Password, "input", Some("password"))]
	#[case(FieldKind::Textarea, "textarea", None)]
	#[case(FieldKind::Dropdown, "select", None)]
	#[case(FieldKind::File, "input", Some("file"))]
	fn test_kind_markup(
		#[case] kind: FieldKind,
		#[case] tag: &str,
		#[case] input_type: Option<&str>,
	) {
		assert_eq!(kind.control_tag(), tag);
		assert_eq!(kind.input_type(), input_type);
	}

	#[rstest]
	fn test_from_control_defaults_to_text() {
		let input = Element::new("input");

		assert_eq!(FieldKind::from_control(&input), Some(FieldKind::Text));
		assert_eq!(FieldKind::from_control(&Element::new("div")), None);
	}

	#[rstest]
	fn test_assemble_orders_label_by_kind() {
		// Arrange & Act
		let text = FieldFragment::assemble(
			FieldKind::Text,
			"name",
			Some("Name:"),
			input_control("text", "name"),
		);
		let checkbox = FieldFragment::assemble(
			FieldKind::Checkbox,
			"terms",
			Some("I agree"),
			input_control("checkbox", "terms"),
		);

		// Assert
		assert!(text.wrapper().children()[0].is("label"));
		assert!(checkbox.wrapper().children()[0].is("input"));
		assert_eq!(
			checkbox.label().unwrap().get_attribute("for").as_deref(),
			Some("terms")
		);
	}

	#[rstest]
	fn test_empty_label_text_is_omitted() {
		let fragment =
			FieldFragment::assemble(FieldKind::Date, "dob", Some(""), input_control("date", "dob"));

		assert!(fragment.label().is_none());
		assert_eq!(fragment.wrapper().children().len(), 1);
	}

	#[rstest]
	fn test_select_option_from_tuple() {
		let option: SelectOption = ("us", "United States").into();

		assert_eq!(option, SelectOption::new("us", "United States"));
	}
}
