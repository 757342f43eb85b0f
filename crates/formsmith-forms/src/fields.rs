//! Field builders and factory functions
//!
//! Every field kind has a builder (`TextField::new("email").with_label(..)`)
//! and a `create_*` function taking positional arguments. Both return a
//! detached [`FieldFragment`]; attaching it to a form is the caller's job.

pub mod choice_field;
pub mod date_field;
pub mod file_field;
pub mod text_field;

pub use choice_field::{CheckboxField, DropdownField, RadioField};
pub use date_field::DateField;
pub use file_field::FileField;
pub use text_field::{PasswordField, TextField, TextareaField};

use crate::error::{FormError, FormResult};
use crate::field::{FieldFragment, SelectOption, is_input_like};
use formsmith_dom::Element;

/// Creates a text input with an optional label.
///
/// # Examples
///
/// ```
/// use formsmith_forms::create_text_input;
///
/// let field = create_text_input("username", Some("Username:"), "Enter your username", "");
/// assert_eq!(field.control().get_attribute("placeholder").as_deref(), Some("Enter your username"));
/// assert_eq!(field.label().unwrap().text_content(), "Username:");
/// ```
pub fn create_text_input(
	name: &str,
	label: Option<&str>,
	placeholder: &str,
	value: &str,
) -> FieldFragment {
	let mut field = TextField::new(name)
		.with_placeholder(placeholder)
		.with_value(value);
	if let Some(label) = label {
		field = field.with_label(label);
	}
	field.build()
}

/// Creates a required password input followed by an empty error element.
pub fn create_password_input(name: &str, label: Option<&str>, placeholder: &str) -> FieldFragment {
	let mut field = PasswordField::new(name).with_placeholder(placeholder);
	if let Some(label) = label {
		field = field.with_label(label);
	}
	field.build()
}

pub fn create_textarea(
	name: &str,
	label: Option<&str>,
	placeholder: &str,
	value: &str,
) -> FieldFragment {
	let mut field = TextareaField::new(name)
		.with_placeholder(placeholder)
		.with_value(value);
	if let Some(label) = label {
		field = field.with_label(label);
	}
	field.build()
}

/// Creates a `select` with one option per pair, in order.
///
/// # Examples
///
/// ```
/// use formsmith_forms::create_dropdown;
///
/// let field = create_dropdown(
/// 	"country",
/// 	[("us", "United States"), ("ca", "Canada")],
/// 	Some("Country:"),
/// );
/// assert_eq!(field.control().children().len(), 2);
/// assert_eq!(field.value(), "us");
/// ```
pub fn create_dropdown<I, O>(name: &str, options: I, label: Option<&str>) -> FieldFragment
where
	I: IntoIterator<Item = O>,
	O: Into<SelectOption>,
{
	let mut field = DropdownField::new(name).with_options(options);
	if let Some(label) = label {
		field = field.with_label(label);
	}
	field.build()
}

pub fn create_checkbox_input(name: &str, label: Option<&str>, checked: bool) -> FieldFragment {
	let mut field = CheckboxField::new(name).with_checked(checked);
	if let Some(label) = label {
		field = field.with_label(label);
	}
	field.build()
}

/// Creates one radio button. Radios sharing `name` form a group; exclusivity
/// of `checked` is not enforced.
pub fn create_radio_input(
	name: &str,
	value: &str,
	label: Option<&str>,
	checked: bool,
) -> FieldFragment {
	let mut field = RadioField::new(name, value).with_checked(checked);
	if let Some(label) = label {
		field = field.with_label(label);
	}
	field.build()
}

pub fn create_date_input(name: &str, label: Option<&str>, value: &str) -> FieldFragment {
	let mut field = DateField::new(name).with_value(value);
	if let Some(label) = label {
		field = field.with_label(label);
	}
	field.build()
}

pub fn create_file_input(name: &str, label: Option<&str>, accept: &str) -> FieldFragment {
	let mut field = FileField::new(name).with_accept(accept);
	if let Some(label) = label {
		field = field.with_label(label);
	}
	field.build()
}

/// Marks the first `input`, `textarea` or `select` inside `wrapper` as required.
///
/// Leaves the tree untouched and returns [`FormError::MissingInput`] when the
/// wrapper holds no such control.
pub fn set_required_true(wrapper: &Element) -> FormResult<()> {
	match wrapper.find_first(is_input_like) {
		Some(control) => {
			control.set_bool_attribute("required", true);
			Ok(())
		}
		None => {
			let err = FormError::MissingInput;
			tracing::error!(wrapper = %wrapper.element_id(), "{}", err);
			Err(err)
		}
	}
}
