//! Deserialization and serialization steps of an object
//!
//! The deserialization state machine and the serialization walker only talk to objects through
//! these methods.

use crate::{
	errors::{
		self,
		ApiErrorKind,
		FormatErrorKind,
		HookError,
	},
	hooks::SerializeHook,
	schema::{
		ChildField,
		Field,
		FieldKind,
	},
	Object,
	Result,
	Value,
};
use log::trace;
use std::borrow::Cow;

impl Object {
	/// Set an attribute from its document text
	pub fn deserialize_attribute(&mut self, key: &str, value: &str, line: u64) -> Result<()> {
		let schema = self.schema().clone();
		let field = schema
			.attribute(key)
			.ok_or_else(|| errors::unknown_attribute(line, self.origin_key(), key))?;
		let value = match field.deserialize_hook() {
			Some(hook) => hook.call(value).map_err(|source| {
				errors::format(
					line,
					self.origin_key(),
					FormatErrorKind::DeserializeAttribute {
						key: key.into(),
						member: field.member().into(),
						value: value.into(),
						source,
					},
				)
			})?,
			None => Value::Str(value.into()),
		};
		field.set(self, value)?;
		Ok(())
	}

	/// Check required attributes once all attributes of the element were read
	pub fn after_deserialize_attributes(&self) -> Result<()> {
		for field in self.schema().attributes() {
			if field.is_required() && !field.is_set(self)? {
				return Err(errors::format(
					self.origin_line(),
					self.origin_key(),
					FormatErrorKind::MissingAttribute {
						key: field.key().into(),
						member: field.member().into(),
					},
				));
			}
		}
		Ok(())
	}

	/// Create the object for a nested element; it still needs to be attached with
	/// [`add_child_object`](Self::add_child_object) once complete.
	pub fn create_child_object(&self, key: &str, line: u64) -> Result<Object> {
		let field = self
			.schema()
			.child(key)
			.ok_or_else(|| errors::unknown_child(line, self.origin_key(), key))?;
		let mut child = field.create(self.schema().name())?;
		child.stamp(key, line);
		Ok(child)
	}

	/// Attach a complete child object
	pub fn add_child_object(&mut self, key: &str, child: Object) -> Result<()> {
		let schema = self.schema().clone();
		let line = child.origin_line();
		let field = schema
			.child(key)
			.ok_or_else(|| errors::unknown_child(line, self.origin_key(), key))?;
		trace!("attaching {} to {:?} (line {})", key, self.origin_key(), line);
		if field.is_multiple() {
			self.append_child(field, child)
		} else {
			let present = match field.get(self) {
				// only the untouched default may be replaced; attached children carry an origin
				Ok(value) => {
					field.default_value() != Some(&*value)
						|| value.as_object().map_or(true, |object| object.origin().is_some())
				},
				Err(e) if e.is_unset() => false,
				Err(e) => return Err(e.into()),
			};
			if present {
				return Err(errors::format(
					line,
					self.origin_key(),
					FormatErrorKind::DuplicateChild {
						key: key.into(),
						member: field.member().into(),
					},
				));
			}
			field.set(self, Value::Object(child))?;
			Ok(())
		}
	}

	fn append_child(&mut self, field: &ChildField, child: Object) -> Result<()> {
		let schema = self.schema().clone();
		let not_collection = || {
			errors::api(
				schema.name(),
				ApiErrorKind::NotCollection {
					key: field.key().into(),
					member: field.member().into(),
				},
			)
		};
		// plain storage: append in place
		if !field.common().accessors_custom() && field.is_set(self)? {
			return match self.slot_mut(FieldKind::Child, field.key()) {
				Some(Value::Objects(list)) => {
					list.push(child);
					Ok(())
				},
				_ => Err(not_collection()),
			};
		}
		let mut list = match field.get(self) {
			Ok(value) => match value.into_owned() {
				Value::Objects(list) => list,
				_ => return Err(not_collection()),
			},
			Err(e) if e.is_unset() => Vec::new(),
			Err(e) => return Err(e.into()),
		};
		list.push(child);
		field.set(self, Value::Objects(list))?;
		Ok(())
	}

	/// Set the text content from the (trimmed, non-empty) document text
	pub fn deserialize_text(&mut self, text: &str, line: u64) -> Result<()> {
		let schema = self.schema().clone();
		let field = schema.text().ok_or_else(|| {
			errors::format(line, self.origin_key(), FormatErrorKind::UnexpectedText)
		})?;
		let value = match field.deserialize_hook() {
			Some(hook) => hook.call(text).map_err(|source| {
				errors::format(
					line,
					self.origin_key(),
					FormatErrorKind::DeserializeText {
						member: field.member().into(),
						value: text.into(),
						source,
					},
				)
			})?,
			None => Value::Str(text.into()),
		};
		field.set(self, value)?;
		Ok(())
	}

	/// Check required children and text once the element and all its descendants were read
	pub fn after_deserialize_all(&self) -> Result<()> {
		for field in self.schema().children() {
			if field.is_required() && !field.is_set(self)? {
				return Err(errors::format(
					self.origin_line(),
					self.origin_key(),
					FormatErrorKind::MissingChild {
						key: field.key().into(),
						member: field.member().into(),
					},
				));
			}
		}
		if let Some(field) = self.schema().text() {
			if field.is_required() && !field.is_set(self)? {
				return Err(errors::format(
					self.origin_line(),
					self.origin_key(),
					FormatErrorKind::MissingText {
						member: field.member().into(),
					},
				));
			}
		}
		Ok(())
	}

	/// Document text of an attribute; `None` means "omit"
	pub fn serialize_attribute(&self, key: &str) -> Result<Option<String>> {
		let schema = self.schema();
		let field = schema.attribute(key).ok_or_else(|| {
			errors::api(schema.name(), ApiErrorKind::NoAttribute { key: key.into() })
		})?;
		self.retrieve(
			field,
			field.serialize_hook(),
			|| ApiErrorKind::MissingAttribute {
				key: field.key().into(),
				member: field.member().into(),
			},
			|value, source| ApiErrorKind::SerializeAttribute {
				key: field.key().into(),
				member: field.member().into(),
				value,
				source,
			},
		)
	}

	/// Document text of the text content; `None` means "omit"
	pub fn serialize_text(&self) -> Result<Option<String>> {
		let schema = self.schema();
		let field = schema
			.text()
			.ok_or_else(|| errors::api(schema.name(), ApiErrorKind::NoText))?;
		self.retrieve(
			field,
			field.serialize_hook(),
			|| ApiErrorKind::MissingText {
				member: field.member().into(),
			},
			|value, source| ApiErrorKind::SerializeText {
				member: field.member().into(),
				value,
				source,
			},
		)
	}

	/// Whether a child is skipped during serialization
	pub fn ignore_child_object(&self, key: &str, child: &Object) -> bool {
		self.schema().ignores_child(self, key, child)
	}

	fn retrieve(
		&self,
		field: &dyn Field,
		serializer: Option<&SerializeHook>,
		missing: impl FnOnce() -> ApiErrorKind,
		failed: impl FnOnce(String, HookError) -> ApiErrorKind,
	) -> Result<Option<String>> {
		let value = match field.get(self) {
			Ok(value) => Some(value),
			Err(e) if e.is_unset() => field.default_value().map(Cow::Borrowed),
			Err(e) => return Err(e.into()),
		};
		let value = match value {
			Some(value) => value,
			None if field.is_required() => return Err(errors::api(self.schema().name(), missing())),
			None => return Ok(None),
		};
		if let Some(hook) = serializer {
			return hook
				.call(&value)
				.map(Some)
				.map_err(|source| errors::api(self.schema().name(), failed(value.to_string(), source)));
		}
		match value.to_text() {
			Some(text) => Ok(Some(text.into_owned())),
			None => Err(errors::api(
				self.schema().name(),
				ApiErrorKind::NotScalar {
					member: field.member().into(),
					found: value.type_name(),
				},
			)),
		}
	}
}
