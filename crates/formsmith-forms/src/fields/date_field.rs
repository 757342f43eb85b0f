//! Date input field

use crate::field::{FieldFragment, FieldKind, input_control};

/// `input type="date"`
#[derive(Debug, Clone, Default)]
pub struct DateField {
	pub name: String,
	pub label: Option<String>,
	pub value: String,
	pub required: bool,
}

impl DateField {
	/// Create a new DateField with the given name
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::fields::DateField;
	///
	/// let fragment = DateField::new("dob").with_value("2000-01-31").build();
	/// assert_eq!(fragment.value(), "2000-01-31");
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

	pub fn with_value(mut self, value: impl Into<String>) -> Self {
		self.value = value.into();
		self
	}

	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	pub fn build(&self) -> FieldFragment {
		let input = input_control("date", &self.name);
		input.set_attribute("value", &self.value);
		input.set_bool_attribute("required", self.required);
		FieldFragment::assemble(FieldKind::Date, &self.name, self.label.as_deref(), input)
	}
}
