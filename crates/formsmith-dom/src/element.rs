//! Element handles and tree manipulation
//!
//! An [`Element`] is a cheap, clonable handle to a node in a single-threaded
//! element tree. Clones share the same underlying node, so a handle returned
//! from a factory stays valid after the element has been attached elsewhere.

use crate::error::{DomError, DomResult};
use crate::event::{Event, EventType, ListenerId};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ELEMENT_ID: AtomicU64 = AtomicU64::new(1);
static NEXT_LISTENER_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identity of an element, usable as a map key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(u64);

impl fmt::Display for ElementId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "el-{}", self.0)
	}
}

/// Child node of an element.
#[derive(Clone)]
pub(crate) enum Node {
	Element(Element),
	Text(String),
}

type Listener = Rc<dyn Fn(&mut Event)>;

struct ElementData {
	id: ElementId,
	tag: String,
	attrs: Vec<(String, String)>,
	classes: Vec<String>,
	styles: Vec<(String, String)>,
	children: Vec<Node>,
	parent: Weak<RefCell<ElementData>>,
	listeners: Vec<(ListenerId, EventType, Listener)>,
}

/// Handle to an element in the tree.
#[derive(Clone)]
pub struct Element {
	inner: Rc<RefCell<ElementData>>,
}

impl fmt::Debug for Element {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let data = self.inner.borrow();
		f.debug_struct("Element")
			.field("id", &data.id)
			.field("tag", &data.tag)
			.field("attrs", &data.attrs)
			.field("classes", &data.classes)
			.field("children_count", &data.children.len())
			.field("listeners_count", &data.listeners.len())
			.finish()
	}
}

impl PartialEq for Element {
	fn eq(&self, other: &Self) -> bool {
		self.ptr_eq(other)
	}
}

impl Eq for Element {}

impl Element {
	/// Creates a detached element with the given tag name.
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_dom::Element;
	///
	/// let div = Element::new("div");
	/// assert_eq!(div.tag_name(), "div");
	/// assert!(div.parent().is_none());
	/// ```
	pub fn new(tag: impl Into<String>) -> Self {
		let data = ElementData {
			id: ElementId(NEXT_ELEMENT_ID.fetch_add(1, Ordering::Relaxed)),
			tag: tag.into().to_ascii_lowercase(),
			attrs: Vec::new(),
			classes: Vec::new(),
			styles: Vec::new(),
			children: Vec::new(),
			parent: Weak::new(),
			listeners: Vec::new(),
		};
		Self {
			inner: Rc::new(RefCell::new(data)),
		}
	}

	pub fn element_id(&self) -> ElementId {
		self.inner.borrow().id
	}

	pub fn tag_name(&self) -> String {
		self.inner.borrow().tag.clone()
	}

	/// Returns true if this element has the given tag name.
	pub fn is(&self, tag: &str) -> bool {
		self.inner.borrow().tag.eq_ignore_ascii_case(tag)
	}

	/// Returns true if both handles point at the same element.
	pub fn ptr_eq(&self, other: &Element) -> bool {
		Rc::ptr_eq(&self.inner, &other.inner)
	}

	pub fn id(&self) -> Option<String> {
		self.get_attribute("id")
	}

	pub fn set_id(&self, id: &str) {
		self.set_attribute("id", id);
	}

	pub fn name(&self) -> Option<String> {
		self.get_attribute("name")
	}

	// ------------------------------------------------------------------
	// Attributes
	// ------------------------------------------------------------------

	/// Sets an attribute, replacing any previous value.
	///
	/// `class` and `style` are parsed into the class list and inline style.
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_dom::Element;
	///
	/// let input = Element::new("input");
	/// input.set_attribute("type", "text");
	/// input.set_attribute("class", "form-control wide");
	///
	/// assert_eq!(input.get_attribute("type").as_deref(), Some("text"));
	/// assert!(input.has_class("wide"));
	/// ```
	pub fn set_attribute(&self, name: &str, value: &str) {
		let name = name.to_ascii_lowercase();
		match name.as_str() {
			"class" => {
				self.inner.borrow_mut().classes =
					value.split_whitespace().map(str::to_string).collect();
			}
			"style" => {
				self.inner.borrow_mut().styles = parse_style(value);
			}
			_ => {
				let mut data = self.inner.borrow_mut();
				if let Some(slot) = data.attrs.iter_mut().find(|(k, _)| *k == name) {
					slot.1 = value.to_string();
				} else {
					data.attrs.push((name, value.to_string()));
				}
			}
		}
	}

	pub fn get_attribute(&self, name: &str) -> Option<String> {
		let name = name.to_ascii_lowercase();
		let data = self.inner.borrow();
		match name.as_str() {
			"class" if !data.classes.is_empty() => Some(data.classes.join(" ")),
			"class" => None,
			"style" if !data.styles.is_empty() => Some(render_style(&data.styles)),
			"style" => None,
			_ => data
				.attrs
				.iter()
				.find(|(k, _)| *k == name)
				.map(|(_, v)| v.clone()),
		}
	}

	pub fn has_attribute(&self, name: &str) -> bool {
		self.get_attribute(name).is_some()
	}

	pub fn remove_attribute(&self, name: &str) {
		let name = name.to_ascii_lowercase();
		let mut data = self.inner.borrow_mut();
		match name.as_str() {
			"class" => data.classes.clear(),
			"style" => data.styles.clear(),
			_ => data.attrs.retain(|(k, _)| *k != name),
		}
	}

	/// Adds or removes a boolean attribute such as `required` or `checked`.
	pub fn set_bool_attribute(&self, name: &str, on: bool) {
		if on {
			self.set_attribute(name, "");
		} else {
			self.remove_attribute(name);
		}
	}

	/// All attributes in render order, `class` and `style` last.
	pub fn attributes(&self) -> Vec<(String, String)> {
		let mut attrs = self.inner.borrow().attrs.clone();
		if let Some(class) = self.get_attribute("class") {
			attrs.push(("class".to_string(), class));
		}
		if let Some(style) = self.get_attribute("style") {
			attrs.push(("style".to_string(), style));
		}
		attrs
	}

	// ------------------------------------------------------------------
	// Class list and inline style
	// ------------------------------------------------------------------

	pub fn add_class(&self, class: &str) {
		let mut data = self.inner.borrow_mut();
		if !data.classes.iter().any(|c| c == class) {
			data.classes.push(class.to_string());
		}
	}

	pub fn remove_class(&self, class: &str) {
		self.inner.borrow_mut().classes.retain(|c| c != class);
	}

	pub fn has_class(&self, class: &str) -> bool {
		self.inner.borrow().classes.iter().any(|c| c == class)
	}

	pub fn classes(&self) -> Vec<String> {
		self.inner.borrow().classes.clone()
	}

	pub fn set_style(&self, property: &str, value: &str) {
		let property = property.trim().to_ascii_lowercase();
		let mut data = self.inner.borrow_mut();
		if let Some(slot) = data.styles.iter_mut().find(|(k, _)| *k == property) {
			slot.1 = value.to_string();
		} else {
			data.styles.push((property, value.to_string()));
		}
	}

	pub fn style(&self, property: &str) -> Option<String> {
		let property = property.trim().to_ascii_lowercase();
		self.inner
			.borrow()
			.styles
			.iter()
			.find(|(k, _)| *k == property)
			.map(|(_, v)| v.clone())
	}

	pub fn remove_style(&self, property: &str) {
		let property = property.trim().to_ascii_lowercase();
		self.inner.borrow_mut().styles.retain(|(k, _)| *k != property);
	}

	// ------------------------------------------------------------------
	// Text and values
	// ------------------------------------------------------------------

	/// Replaces all children with a single text node.
	///
	/// An empty string leaves the element without children.
	pub fn set_text_content(&self, text: &str) {
		let old = std::mem::take(&mut self.inner.borrow_mut().children);
		for node in old {
			if let Node::Element(child) = node {
				child.inner.borrow_mut().parent = Weak::new();
			}
		}
		if !text.is_empty() {
			self.inner
				.borrow_mut()
				.children
				.push(Node::Text(text.to_string()));
		}
	}

	/// Concatenated text of all descendant text nodes.
	pub fn text_content(&self) -> String {
		let mut out = String::new();
		self.collect_text(&mut out);
		out
	}

	fn collect_text(&self, out: &mut String) {
		for node in self.nodes() {
			match node {
				Node::Text(text) => out.push_str(&text),
				Node::Element(child) => child.collect_text(out),
			}
		}
	}

	/// Current value of a form control.
	///
	/// Textareas report their text content, selects report the selected
	/// option (or the first option when none is selected), everything else
	/// reports its `value` attribute.
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_dom::Element;
	///
	/// let area = Element::new("textarea");
	/// area.set_value("hello");
	/// assert_eq!(area.value(), "hello");
	///
	/// let input = Element::new("input");
	/// assert_eq!(input.value(), "");
	/// ```
	pub fn value(&self) -> String {
		if self.is("textarea") {
			return self.text_content();
		}
		if self.is("select") {
			let options = self.find_all(|e| e.is("option"));
			let selected = options
				.iter()
				.find(|o| o.has_attribute("selected"))
				.or_else(|| options.first());
			return selected.map(option_value).unwrap_or_default();
		}
		if self.is("option") {
			return option_value(self);
		}
		self.get_attribute("value").unwrap_or_default()
	}

	pub fn set_value(&self, value: &str) {
		if self.is("textarea") {
			self.set_text_content(value);
		} else if self.is("select") {
			for option in self.find_all(|e| e.is("option")) {
				let matches = option_value(&option) == value;
				option.set_bool_attribute("selected", matches);
			}
		} else {
			self.set_attribute("value", value);
		}
	}

	// ------------------------------------------------------------------
	// Tree navigation
	// ------------------------------------------------------------------

	pub(crate) fn nodes(&self) -> Vec<Node> {
		self.inner.borrow().children.clone()
	}

	pub fn parent(&self) -> Option<Element> {
		self.inner
			.borrow()
			.parent
			.upgrade()
			.map(|inner| Element { inner })
	}

	/// Element children in document order.
	pub fn children(&self) -> Vec<Element> {
		self.inner
			.borrow()
			.children
			.iter()
			.filter_map(|node| match node {
				Node::Element(e) => Some(e.clone()),
				Node::Text(_) => None,
			})
			.collect()
	}

	pub fn first_element_child(&self) -> Option<Element> {
		self.children().into_iter().next()
	}

	/// The element immediately following this one under the same parent.
	pub fn next_element_sibling(&self) -> Option<Element> {
		let siblings = self.parent()?.children();
		let pos = siblings.iter().position(|s| s.ptr_eq(self))?;
		siblings.get(pos + 1).cloned()
	}

	/// Returns true if `other` is this element or one of its descendants.
	pub fn contains(&self, other: &Element) -> bool {
		let mut cursor = Some(other.clone());
		while let Some(current) = cursor {
			if current.ptr_eq(self) {
				return true;
			}
			cursor = current.parent();
		}
		false
	}

	/// All descendants in depth-first document order, excluding `self`.
	pub fn descendants(&self) -> Vec<Element> {
		let mut out = Vec::new();
		self.collect_descendants(&mut out);
		out
	}

	fn collect_descendants(&self, out: &mut Vec<Element>) {
		for child in self.children() {
			out.push(child.clone());
			child.collect_descendants(out);
		}
	}

	/// First descendant matching the predicate, in document order.
	pub fn find_first(&self, predicate: impl Fn(&Element) -> bool) -> Option<Element> {
		self.find_first_dyn(&predicate)
	}

	fn find_first_dyn(&self, predicate: &dyn Fn(&Element) -> bool) -> Option<Element> {
		for child in self.children() {
			if predicate(&child) {
				return Some(child);
			}
			if let Some(found) = child.find_first_dyn(predicate) {
				return Some(found);
			}
		}
		None
	}

	pub fn find_all(&self, predicate: impl Fn(&Element) -> bool) -> Vec<Element> {
		self.descendants()
			.into_iter()
			.filter(|e| predicate(e))
			.collect()
	}

	/// First descendant whose `name` attribute equals `name`.
	pub fn find_by_name(&self, name: &str) -> Option<Element> {
		self.find_first(|e| e.name().as_deref() == Some(name))
	}

	pub fn find_by_tag(&self, tag: &str) -> Option<Element> {
		self.find_first(|e| e.is(tag))
	}

	pub fn find_by_id(&self, id: &str) -> Option<Element> {
		self.find_first(|e| e.id().as_deref() == Some(id))
	}

	// ------------------------------------------------------------------
	// Tree mutation
	// ------------------------------------------------------------------

	/// Appends `child` as the last child, moving it if already attached.
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_dom::Element;
	///
	/// let form = Element::new("form");
	/// let field = Element::new("div");
	/// form.append_child(&field).unwrap();
	///
	/// assert_eq!(form.children().len(), 1);
	/// assert!(field.parent().unwrap().ptr_eq(&form));
	/// assert!(field.append_child(&form).is_err());
	/// ```
	pub fn append_child(&self, child: &Element) -> DomResult<()> {
		self.insert_before(child, None)
	}

	/// Inserts `child` before `reference`, or at the end when `reference`
	/// is `None`.
	pub fn insert_before(&self, child: &Element, reference: Option<&Element>) -> DomResult<()> {
		if child.contains(self) {
			let err = DomError::HierarchyRequest {
				parent: self.tag_name(),
				child: child.tag_name(),
			};
			tracing::debug!(parent = %self.element_id(), child = %child.element_id(), "{}", err);
			return Err(err);
		}
		if let Some(reference) = reference {
			if reference.ptr_eq(child) {
				return Ok(());
			}
			if !reference.parent().is_some_and(|p| p.ptr_eq(self)) {
				return Err(DomError::NotFound(reference.tag_name()));
			}
		}

		child.detach();

		let mut data = self.inner.borrow_mut();
		let index = match reference {
			Some(reference) => data
				.children
				.iter()
				.position(|n| matches!(n, Node::Element(e) if e.ptr_eq(reference)))
				.unwrap_or(data.children.len()),
			None => data.children.len(),
		};
		data.children.insert(index, Node::Element(child.clone()));
		drop(data);

		child.inner.borrow_mut().parent = Rc::downgrade(&self.inner);
		Ok(())
	}

	/// Removes a direct child.
	pub fn remove_child(&self, child: &Element) -> DomResult<()> {
		if !child.parent().is_some_and(|p| p.ptr_eq(self)) {
			return Err(DomError::NotFound(child.tag_name()));
		}
		child.detach();
		Ok(())
	}

	/// Detaches this element from its parent, if any.
	pub fn remove(&self) {
		self.detach();
	}

	fn detach(&self) {
		if let Some(parent) = self.parent() {
			parent
				.inner
				.borrow_mut()
				.children
				.retain(|n| !matches!(n, Node::Element(e) if e.ptr_eq(self)));
		}
		self.inner.borrow_mut().parent = Weak::new();
	}

	// ------------------------------------------------------------------
	// Events
	// ------------------------------------------------------------------

	/// Registers a listener for the given event type.
	pub fn add_event_listener(
		&self,
		event_type: EventType,
		listener: impl Fn(&mut Event) + 'static,
	) -> ListenerId {
		let id = ListenerId(NEXT_LISTENER_ID.fetch_add(1, Ordering::Relaxed));
		self.inner
			.borrow_mut()
			.listeners
			.push((id, event_type, Rc::new(listener)));
		id
	}

	pub fn remove_event_listener(&self, id: ListenerId) -> bool {
		let mut data = self.inner.borrow_mut();
		let before = data.listeners.len();
		data.listeners.retain(|(lid, _, _)| *lid != id);
		data.listeners.len() != before
	}

	fn listeners_for(&self, event_type: EventType) -> Vec<Listener> {
		self.inner
			.borrow()
			.listeners
			.iter()
			.filter(|(_, ty, _)| *ty == event_type)
			.map(|(_, _, l)| l.clone())
			.collect()
	}

	/// Dispatches an event at this element and bubbles it to the ancestors.
	///
	/// Listeners run in registration order and may freely mutate the tree.
	///
	/// # Examples
	///
	/// ```
	/// use formsmith_dom::{Element, EventType};
	///
	/// let input = Element::new("input");
	/// input.add_event_listener(EventType::Input, |event| {
	///     let value = event.target().value().to_uppercase();
	///     event.target().set_value(&value);
	/// });
	///
	/// input.set_value("abc");
	/// input.dispatch_event(EventType::Input);
	/// assert_eq!(input.value(), "ABC");
	/// ```
	pub fn dispatch_event(&self, event_type: EventType) -> Event {
		let mut event = Event::new(event_type, self.clone());
		let mut cursor = Some(self.clone());
		while let Some(current) = cursor {
			for listener in current.listeners_for(event_type) {
				listener(&mut event);
			}
			if event.propagation_stopped() {
				break;
			}
			cursor = current.parent();
		}
		event
	}
}

fn option_value(option: &Element) -> String {
	option
		.get_attribute("value")
		.unwrap_or_else(|| option.text_content())
}

fn parse_style(value: &str) -> Vec<(String, String)> {
	value
		.split(';')
		.filter_map(|decl| {
			let (k, v) = decl.split_once(':')?;
			let k = k.trim().to_ascii_lowercase();
			if k.is_empty() {
				return None;
			}
			Some((k, v.trim().to_string()))
		})
		.collect()
}

fn render_style(styles: &[(String, String)]) -> String {
	styles
		.iter()
		.map(|(k, v)| format!("{}: {}", k, v))
		.collect::<Vec<_>>()
		.join("; ")
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_append_preserves_insertion_order() {
		// Arrange
		let form = Element::new("form");
		let a = Element::new("div");
		let b = Element::new("div");
		let c = Element::new("div");

		// Act
		form.append_child(&a).unwrap();
		form.append_child(&b).unwrap();
		form.append_child(&c).unwrap();

		// Assert
		let children = form.children();
		assert_eq!(children.len(), 3);
		assert!(children[0].ptr_eq(&a));
		assert!(children[1].ptr_eq(&b));
		assert!(children[2].ptr_eq(&c));
	}

	#[rstest]
	fn test_append_moves_attached_child() {
		// Arrange
		let first = Element::new("form");
		let second = Element::new("form");
		let field = Element::new("div");
		first.append_child(&field).unwrap();

		// Act
		second.append_child(&field).unwrap();

		// Assert
		assert!(first.children().is_empty());
		assert_eq!(second.children().len(), 1);
		assert!(field.parent().unwrap().ptr_eq(&second));
	}

	#[rstest]
	fn test_append_rejects_cycles() {
		// Arrange
		let outer = Element::new("div");
		let inner = Element::new("div");
		outer.append_child(&inner).unwrap();

		// Act
		let self_append = outer.append_child(&outer);
		let ancestor_append = inner.append_child(&outer);

		// Assert
		assert!(matches!(self_append, Err(DomError::HierarchyRequest { .. })));
		assert!(matches!(ancestor_append, Err(DomError::HierarchyRequest { .. })));
	}

	#[rstest]
	fn test_insert_before_places_child_after_reference_sibling() {
		// Arrange
		let wrapper = Element::new("div");
		let input = Element::new("input");
		let trailing = Element::new("span");
		wrapper.append_child(&input).unwrap();
		wrapper.append_child(&trailing).unwrap();
		let error = Element::new("span");

		// Act
		wrapper
			.insert_before(&error, input.next_element_sibling().as_ref())
			.unwrap();

		// Assert
		assert!(input.next_element_sibling().unwrap().ptr_eq(&error));
		assert!(error.next_element_sibling().unwrap().ptr_eq(&trailing));
	}

	#[rstest]
	fn test_remove_child_requires_direct_child() {
		// Arrange
		let form = Element::new("form");
		let wrapper = Element::new("div");
		let input = Element::new("input");
		form.append_child(&wrapper).unwrap();
		wrapper.append_child(&input).unwrap();

		// Act
		let result = form.remove_child(&input);

		// Assert
		assert!(matches!(result, Err(DomError::NotFound(_))));
		assert_eq!(wrapper.children().len(), 1);
	}

	#[rstest]
	fn test_set_text_content_replaces_children() {
		// Arrange
		let div = Element::new("div");
		let child = Element::new("span");
		div.append_child(&child).unwrap();

		// Act
		div.set_text_content("hello");

		// Assert
		assert!(div.children().is_empty());
		assert!(child.parent().is_none());
		assert_eq!(div.text_content(), "hello");
	}

	#[rstest]
	fn test_class_and_style_round_trip_through_attributes() {
		// Arrange
		let el = Element::new("small");

		// Act
		el.add_class("error-message");
		el.add_class("error-message");
		el.set_style("color", "red");
		el.set_attribute("style", "color: green; display: none");

		// Assert
		assert_eq!(el.classes(), vec!["error-message".to_string()]);
		assert_eq!(el.style("color").as_deref(), Some("green"));
		assert_eq!(el.style("display").as_deref(), Some("none"));
		assert_eq!(
			el.get_attribute("style").as_deref(),
			Some("color: green; display: none")
		);
	}

	#[rstest]
	fn test_select_value_defaults_to_first_option() {
		// Arrange
		let select = Element::new("select");
		for (value, text) in [("us", "United States"), ("ca", "Canada")] {
			let option = Element::new("option");
			option.set_attribute("value", value);
			option.set_text_content(text);
			select.append_child(&option).unwrap();
		}

		// Act & Assert
		assert_eq!(select.value(), "us");
		select.set_value("ca");
		assert_eq!(select.value(), "ca");
	}

	#[rstest]
	fn test_next_element_sibling_skips_text_nodes() {
		// Arrange
		let wrapper = Element::new("div");
		let label = Element::new("label");
		let input = Element::new("input");
		wrapper.append_child(&label).unwrap();
		wrapper.append_child(&input).unwrap();

		// Act & Assert
		assert!(label.next_element_sibling().unwrap().ptr_eq(&input));
		assert!(input.next_element_sibling().is_none());
	}

	#[rstest]
	fn test_events_bubble_until_stopped() {
		use std::cell::Cell;

		// Arrange
		let form = Element::new("form");
		let input = Element::new("input");
		form.append_child(&input).unwrap();
		let hits = Rc::new(Cell::new(0));
		let form_hits = hits.clone();
		form.add_event_listener(EventType::Input, move |_| form_hits.set(form_hits.get() + 1));

		// Act
		input.dispatch_event(EventType::Input);
		let id = input.add_event_listener(EventType::Input, |event| event.stop_propagation());
		input.dispatch_event(EventType::Input);
		assert!(input.remove_event_listener(id));
		input.dispatch_event(EventType::Input);

		// Assert
		assert_eq!(hits.get(), 2);
	}
}
