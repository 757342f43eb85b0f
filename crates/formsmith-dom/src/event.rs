//! Events dispatched through the element tree.

use crate::element::Element;
use std::fmt;

/// Event types the tree knows how to dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
	/// The value of a control changed while typing.
	Input,
	/// The value of a control was committed.
	Change,
	/// A form was submitted.
	Submit,
	/// An element was clicked.
	Click,
}

impl EventType {
	pub fn as_str(&self) -> &'static str {
		match self {
			EventType::Input => "input",
			EventType::Change => "change",
			EventType::Submit => "submit",
			EventType::Click => "click",
		}
	}
}

impl fmt::Display for EventType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Handle returned by `Element::add_event_listener`, used for removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

/// A dispatched event.
#[derive(Debug)]
pub struct Event {
	event_type: EventType,
	target: Element,
	default_prevented: bool,
	propagation_stopped: bool,
}

impl Event {
	pub fn new(event_type: EventType, target: Element) -> Self {
		Self {
			event_type,
			target,
			default_prevented: false,
			propagation_stopped: false,
		}
	}

	pub fn event_type(&self) -> EventType {
		self.event_type
	}

	/// The element the event was dispatched at.
	pub fn target(&self) -> &Element {
		&self.target
	}

	/// Marks the default action (e.g. native form submission) as cancelled.
	pub fn prevent_default(&mut self) {
		self.default_prevented = true;
	}

	pub fn default_prevented(&self) -> bool {
		self.default_prevented
	}

	/// Stops bubbling after the current element's listeners have run.
	pub fn stop_propagation(&mut self) {
		self.propagation_stopped = true;
	}

	pub fn propagation_stopped(&self) -> bool {
		self.propagation_stopped
	}
}
