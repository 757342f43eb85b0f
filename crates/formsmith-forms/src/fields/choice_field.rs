//! Dropdown, checkbox and radio fields

use crate::field::{FieldFragment, FieldKind, SelectOption, input_control};
use formsmith_dom::Element;

/// `select` with an ordered option list
#[derive(Debug, Clone, Default)]
pub struct DropdownField {
	pub name: String,
	pub label: Option<String>,
	pub options: Vec<SelectOption>,
	pub selected: Option<String>,
	pub required: bool,
}

impl DropdownField {
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

	/// Replaces the option list, keeping the given order.
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_forms::fields::DropdownField;
	///
	/// let field = DropdownField::new("size").with_options([("s", "Small"), ("l", "Large")]);
	/// assert_eq!(field.options.len(), 2);
	/// assert_eq!(field.options[1].text, "Large");
	/// ```
	pub fn with_options<I, O>(mut self, options: I) -> Self
	where
		I: IntoIterator<Item = O>,
		O: Into<SelectOption>,
	{
		self.options = options.into_iter().map(Into::into).collect();
		self
	}

	pub fn with_option(mut self, value: impl Into<String>, text: impl Into<String>) -> Self {
		self.options.push(SelectOption::new(value, text));
		self
	}

	/// Marks the option with this value as selected.
	pub fn with_selected(mut self, value: impl Into<String>) -> Self {
		self.selected = Some(value.into());
		self
	}

	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	pub fn build(&self) -> FieldFragment {
		let select = Element::new("select");
		select.set_attribute("name", &self.name);
		select.set_bool_attribute("required", self.required);
		for option in &self.options {
			let element = Element::new("option");
			element.set_attribute("value", &option.value);
			element.set_text_content(&option.text);
			if self.selected.as_deref() == Some(option.value.as_str()) {
				element.set_bool_attribute("selected", true);
			}
			let _ = select.append_child(&element);
		}
		FieldFragment::assemble(
			FieldKind::Dropdown,
			&self.name,
			self.label.as_deref(),
			select,
		)
	}
}

/// Checkbox rendered before its label
#[derive(Debug, Clone, Default)]
pub struct CheckboxField {
	pub name: String,
	pub label: Option<String>,
	pub checked: bool,
}

impl CheckboxField {
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

	pub fn with_checked(mut self, checked: bool) -> Self {
		self.checked = checked;
		self
	}

	pub fn build(&self) -> FieldFragment {
		let input = input_control("checkbox", &self.name);
		input.set_bool_attribute("checked", self.checked);
		FieldFragment::assemble(
			FieldKind::Checkbox,
			&self.name,
			self.label.as_deref(),
			input,
		)
	}
}

/// One radio button of a group sharing `name`
#[derive(Debug, Clone, Default)]
pub struct RadioField {
	pub name: String,
	pub value: String,
	pub label: Option<String>,
	pub checked: bool,
}

impl RadioField {
	pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			value: value.into(),
			..Self::default()
		}
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn with_checked(mut self, checked: bool) -> Self {
		self.checked = checked;
		self
	}

	pub fn build(&self) -> FieldFragment {
		let input = input_control("radio", &self.name);
		input.set_attribute("value", &self.value);
		input.set_bool_attribute("checked", self.checked);
		FieldFragment::assemble(FieldKind::Radio, &self.name, self.label.as_deref(), input)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_dropdown_preserves_option_order() {
		// Arrange
		let field = DropdownField::new("country")
			.with_label("Country:")
			.with_option("us", "United States")
			.with_option("ca", "Canada")
			.with_option("mx", "Mexico");

		// Act
		let fragment = field.build();

		// Assert
		let options = fragment.control().children();
		let values: Vec<_> = options
			.iter()
			.map(|o| o.get_attribute("value").unwrap())
			.collect();
		assert_eq!(values, vec!["us", "ca", "mx"]);
		assert_eq!(options[1].text_content(), "Canada");
		assert!(fragment.wrapper().children()[0].is("label"));
	}

	#[rstest]
	fn test_dropdown_selected_value() {
		// Act
		let fragment = DropdownField::new("size")
			.with_options([("s", "Small"), ("m", "Medium")])
			.with_selected("m")
			.build();

		// Assert
		assert_eq!(fragment.value(), "m");
	}

	#[rstest]
	fn test_empty_dropdown_has_empty_value() {
		let fragment = DropdownField::new("empty").build();

		assert_eq!(fragment.value(), "");
		assert!(fragment.control().children().is_empty());
	}

	#[rstest]
	#[case(true)]
	#[case(false)]
	fn test_checkbox_checked_flag(#[case] checked: bool) {
		// Act
		let fragment = CheckboxField::new("subscribe")
			.with_label("Subscribe")
			.with_checked(checked)
			.build();

		// Assert
		assert_eq!(fragment.is_checked(), checked);
		assert!(fragment.wrapper().children()[0].is("input"));
		assert!(fragment.wrapper().children()[1].is("label"));
	}

	#[rstest]
	fn test_radio_carries_value() {
		// Act
		let fragment = RadioField::new("plan", "pro").with_label("Pro").build();

		// Assert
		assert_eq!(fragment.value(), "pro");
		assert_eq!(fragment.name(), "plan");
		assert!(!fragment.is_checked());
	}
}
