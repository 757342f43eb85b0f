//! Form Assembly Integration Tests
//!
//! Builds a complete registration page the way an application would:
//! factories, form assembly against a document, validation wiring and
//! formatters, then checks the resulting tree and rendered HTML.
//!
//! Test Categories:
//! - Category 1: Page assembly
//! - Category 2: Field removal
//! - Category 3: Interactive validation and formatting

use formsmith_dom::{Document, EventType};
use formsmith_forms::{
	FieldKind, FormContainer, Formatter, Method, ValidationRule, add_field_to_form,
	add_form_field, attach_formatter, bind_validator, create_checkbox_input, create_date_input,
	create_dropdown, create_file_input, create_form, create_password_input, create_radio_input,
	create_text_input, create_textarea, remove_field_from, serialize_form, set_required_true,
};
use rstest::*;

#[fixture]
fn document() -> Document {
	Document::new()
}

fn registration_form(document: &Document) -> FormContainer {
	let form = create_form("Form", "/submit", Method::POST);
	form.element().add_class("container");
	document.body().append_child(form.element()).unwrap();

	let name = create_text_input("name", Some("Name:"), "Enter your name", "");
	set_required_true(name.wrapper()).unwrap();

	let fields = [
		name,
		create_password_input("password", Some("Password:"), "Enter your password"),
		create_textarea("bio", Some("Biography:"), "Tell us about yourself", ""),
		create_dropdown(
			"country",
			[("us", "United States"), ("ca", "Canada")],
			Some("Country:"),
		),
		create_checkbox_input("terms", Some("I agree to the terms and conditions"), false),
		create_radio_input("gender", "male", Some("Male"), true),
		create_radio_input("gender", "female", Some("Female"), false),
		create_date_input("dob", Some("Date of Birth:"), ""),
		create_file_input("resume", Some("Upload your resume:"), "application/pdf"),
	];
	for field in &fields {
		add_form_field(&form, field).unwrap();
	}
	form.add_submit_button("Submit");
	form
}

// ============================================================================
// Category 1: Page assembly
// ============================================================================

/// Tests that every fragment lands in the form in call order
#[rstest]
fn test_registration_form_layout(document: Document) {
	// Act
	let form = registration_form(&document);

	// Assert
	let kinds: Vec<_> = form.fields().iter().map(|f| f.kind()).collect();
	assert_eq!(
		kinds,
		vec![
			FieldKind::Text,
			FieldKind::Password,
			FieldKind::Textarea,
			FieldKind::Dropdown,
			FieldKind::Checkbox,
			FieldKind::Radio,
			FieldKind::Radio,
			FieldKind::Date,
			FieldKind::File,
		]
	);
	assert!(form.field("name").unwrap().is_required());
	assert!(document.get_element_by_id("Form").unwrap().ptr_eq(form.element()));
}

/// Tests the rendered markup of a labeled password field
#[rstest]
fn test_password_field_markup(document: Document) {
	// Act
	let form = registration_form(&document);
	let html = form.field("password").unwrap().wrapper().render_to_string();

	// Assert
	assert_eq!(
		html,
		concat!(
			r#"<div><label for="password">Password:</label>"#,
			r#"<input type="password" name="password" required="" placeholder="Enter your password" />"#,
			r#"<small class="error-message" style="color: red"></small></div>"#,
		)
	);
}

/// Tests adding by form id when no such form exists
#[rstest]
fn test_add_field_to_missing_form_leaves_page_untouched(document: Document) {
	// Arrange
	let form = registration_form(&document);
	let before = document.body().render_to_string();
	let extra = create_text_input("nickname", None, "", "");

	// Act
	let result = add_field_to_form(&document, "Other", &extra);

	// Assert
	assert!(result.is_err());
	assert_eq!(document.body().render_to_string(), before);
	assert_eq!(form.fields().len(), 9);
}

/// Tests that the initial payload reflects factory defaults
#[rstest]
fn test_initial_payload(document: Document) {
	// Act
	let form = registration_form(&document);
	let payload = serialize_form(form.element());

	// Assert
	let keys: Vec<_> = payload.keys().map(String::as_str).collect();
	assert_eq!(
		keys,
		vec!["name", "password", "bio", "country", "gender", "dob", "resume"]
	);
	assert_eq!(payload["country"], "us");
	assert_eq!(payload["gender"], "male");
}

// ============================================================================
// Category 2: Field removal
// ============================================================================

/// Tests that removal by name drops exactly one wrapper
#[rstest]
fn test_remove_field_from_keeps_relative_order(document: Document) {
	// Arrange
	let form = registration_form(&document);

	// Act
	remove_field_from(&document, "Form", "bio").unwrap();
	remove_field_from(&document, "Form", "gender").unwrap();

	// Assert
	let names: Vec<_> = form.fields().iter().map(|f| f.name().to_string()).collect();
	assert_eq!(
		names,
		vec!["name", "password", "country", "terms", "gender", "dob", "resume"]
	);
	assert_eq!(form.field("gender").unwrap().value(), "female");
}

/// Tests removal lookups that fail
#[rstest]
#[case("Missing", "name", "Form with id 'Missing' not found.")]
#[case("Form", "missing", "Field with name 'missing' not found in form.")]
fn test_remove_field_from_failures(
	document: Document,
	#[case] form_id: &str,
	#[case] field_name: &str,
	#[case] message: &str,
) {
	// Arrange
	let form = registration_form(&document);

	// Act
	let result = remove_field_from(&document, form_id, field_name);

	// Assert
	assert_eq!(result.unwrap_err().to_string(), message);
	assert_eq!(form.fields().len(), 9);
}

// ============================================================================
// Category 3: Interactive validation and formatting
// ============================================================================

/// Tests password validation feedback while typing
#[rstest]
fn test_password_validation_while_typing(document: Document) {
	// Arrange
	let form = registration_form(&document);
	let password = form.field("password").unwrap();
	let message = "Password needs a capital letter, special character and a number.";
	bind_validator(
		&password,
		ValidationRule::PasswordStrength { min_length: 8 },
		Some(message),
	);
	let control = password.control();
	let error = password.error_element().unwrap();

	// Act & Assert
	control.set_value("secret");
	control.dispatch_event(EventType::Input);
	assert!(control.has_class("is-invalid"));
	assert_eq!(error.text_content(), message);

	control.set_value("Secret123!");
	control.dispatch_event(EventType::Input);
	assert!(control.has_class("is-valid"));
	assert!(!control.has_class("is-invalid"));
	assert_eq!(error.text_content(), "");
}

/// Tests formatters attached to live controls
#[rstest]
#[case(Formatter::PhoneNumber, "555.123.4567", "(555) 123-4567")]
#[case(Formatter::CapitalizeName, "ada LOVELACE", "Ada Lovelace")]
#[case(Formatter::Date, "12312024", "12/31/2024")]
fn test_formatter_on_input(
	document: Document,
	#[case] formatter: Formatter,
	#[case] typed: &str,
	#[case] expected: &str,
) {
	// Arrange
	let form = registration_form(&document);
	let field = create_text_input("extra", None, "", "");
	add_form_field(&form, &field).unwrap();
	attach_formatter(field.control(), formatter);

	// Act
	field.set_value(typed);
	field.control().dispatch_event(EventType::Input);

	// Assert
	assert_eq!(field.value(), expected);
	assert_eq!(serialize_form(form.element())["extra"], expected);
}
