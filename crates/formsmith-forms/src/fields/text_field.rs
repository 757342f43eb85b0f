//! Text, password and textarea fields

use crate::field::{FieldFragment, FieldKind, input_control};
use formsmith_dom::Element;

/// Single-line text input
#[derive(Debug, Clone, Default)]
pub struct TextField {
	pub name: String,
	pub label: Option<String>,
	pub placeholder: String,
	pub value: String,
	pub required: bool,
}

impl TextField {
	/// Create a new TextField with the given name
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::fields::TextField;
	///
	/// let field = TextField::new("username");
	/// assert_eq!(field.name, "username");
	/// assert!(!field.required);
	/// ```
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Self::default()
		}
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
		self.placeholder = placeholder.into();
		self
	}

	pub fn with_value(mut self, value: impl Into<String>) -> Self {
		self.value = value.into();
		self
	}

	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	/// Builds the `div` wrapper with its label and `input type="text"`.
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::fields::TextField;
	///
	/// let field = TextField::new("email")
	/// 	.with_label("Email:")
	/// 	.with_placeholder("you@example.com")
	/// 	.build();
	///
	/// assert_eq!(
	/// 	field.wrapper().render_to_string(),
	/// 	r#"<div><label for="email">Email:</label><input type="text" name="email" placeholder="you@example.com" value="" /></div>"#
	/// );
	/// ```
	pub fn build(&self) -> FieldFragment {
		let input = input_control("text", &self.name);
		input.set_attribute("placeholder", &self.placeholder);
		input.set_attribute("value", &self.value);
		input.set_bool_attribute("required", self.required);
		FieldFragment::assemble(FieldKind::Text, &self.name, self.label.as_deref(), input)
	}
}

/// Password input that is always required and carries an error element
#[derive(Debug, Clone, Default)]
pub struct PasswordField {
	pub name: String,
	pub label: Option<String>,
	pub placeholder: String,
}

impl PasswordField {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Self::default()
		}
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
		self.placeholder = placeholder.into();
		self
	}

	/// Builds the fragment; the `small.error-message` element sits right
	/// after the input.
	pub fn build(&self) -> FieldFragment {
		let input = input_control("password", &self.name);
		input.set_bool_attribute("required", true);
		input.set_attribute("placeholder", &self.placeholder);
		FieldFragment::assemble(
			FieldKind::Password,
			&self.name,
			self.label.as_deref(),
			input,
		)
		.attach_error_element()
	}
}

/// Multi-line text area
#[derive(Debug, Clone, Default)]
pub struct TextareaField {
	pub name: String,
	pub label: Option<String>,
	pub placeholder: String,
	pub value: String,
	pub required: bool,
}

impl TextareaField {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Self::default()
		}
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
		self.placeholder = placeholder.into();
		self
	}

	pub fn with_value(mut self, value: impl Into<String>) -> Self {
		self.value = value.into();
		self
	}

	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	pub fn build(&self) -> FieldFragment {
		let textarea = Element::new("textarea");
		textarea.set_attribute("name", &self.name);
		textarea.set_attribute("placeholder", &self.placeholder);
		textarea.set_bool_attribute("required", self.required);
		textarea.set_text_content(&self.value);
		FieldFragment::assemble(
			FieldKind::Textarea,
			&self.name,
			self.label.as_deref(),
			textarea,
		)
	}
}
