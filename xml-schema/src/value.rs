use crate::Object;
use std::{
	borrow::Cow,
	fmt,
};

/// Value stored in a mapped member
///
/// Attributes and text content hold scalars (strings unless a deserializer hook produces something
/// else); child members hold a single `Object` or, for `multiple` children, `Objects` in document
/// order.
///
/// There is no "absent" value: absence is always expressed as `None` around a `Value`.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
	/// Text
	Str(String),
	/// Integer
	Int(i64),
	/// Floating point number
	Float(f64),
	/// Boolean
	Bool(bool),
	/// Single child object
	Object(Object),
	/// Ordered child objects
	Objects(Vec<Object>),
}

impl Value {
	/// Short name of the variant, used in error messages
	pub fn type_name(&self) -> &'static str {
		match self {
			Self::Str(_) => "a string",
			Self::Int(_) => "an integer",
			Self::Float(_) => "a float",
			Self::Bool(_) => "a boolean",
			Self::Object(_) => "an object",
			Self::Objects(_) => "an object list",
		}
	}

	/// Returns the string if this is `Str`
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::Str(s) => Some(s),
			_ => None,
		}
	}

	/// Returns the integer if this is `Int`
	pub fn as_int(&self) -> Option<i64> {
		match self {
			Self::Int(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the number if this is `Float` (or `Int`)
	pub fn as_float(&self) -> Option<f64> {
		match self {
			Self::Float(v) => Some(*v),
			Self::Int(v) => Some(*v as f64),
			_ => None,
		}
	}

	/// Returns the boolean if this is `Bool`
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Bool(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the object if this is `Object`
	pub fn as_object(&self) -> Option<&Object> {
		match self {
			Self::Object(o) => Some(o),
			_ => None,
		}
	}

	/// Returns the object mutably if this is `Object`
	pub fn as_object_mut(&mut self) -> Option<&mut Object> {
		match self {
			Self::Object(o) => Some(o),
			_ => None,
		}
	}

	/// Returns the objects if this is `Objects`
	pub fn as_objects(&self) -> Option<&[Object]> {
		match self {
			Self::Objects(list) => Some(list),
			_ => None,
		}
	}

	/// Returns the object list mutably if this is `Objects`
	pub fn as_objects_mut(&mut self) -> Option<&mut Vec<Object>> {
		match self {
			Self::Objects(list) => Some(list),
			_ => None,
		}
	}

	/// Text representation of scalars (what gets written if a field has no serializer hook)
	pub fn to_text(&self) -> Option<Cow<'_, str>> {
		match self {
			Self::Str(s) => Some(Cow::Borrowed(s)),
			Self::Int(v) => Some(Cow::Owned(v.to_string())),
			Self::Float(v) => Some(Cow::Owned(v.to_string())),
			Self::Bool(v) => Some(Cow::Owned(v.to_string())),
			Self::Object(_) | Self::Objects(_) => None,
		}
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.to_text() {
			Some(text) => f.write_str(&text),
			None => f.write_str(self.type_name()),
		}
	}
}

impl From<String> for Value {
	fn from(v: String) -> Self {
		Self::Str(v)
	}
}

impl From<&str> for Value {
	fn from(v: &str) -> Self {
		Self::Str(v.into())
	}
}

impl From<Cow<'_, str>> for Value {
	fn from(v: Cow<'_, str>) -> Self {
		Self::Str(v.into_owned())
	}
}

impl From<i64> for Value {
	fn from(v: i64) -> Self {
		Self::Int(v)
	}
}

impl From<i32> for Value {
	fn from(v: i32) -> Self {
		Self::Int(v.into())
	}
}

impl From<u32> for Value {
	fn from(v: u32) -> Self {
		Self::Int(v.into())
	}
}

impl From<f64> for Value {
	fn from(v: f64) -> Self {
		Self::Float(v)
	}
}

impl From<bool> for Value {
	fn from(v: bool) -> Self {
		Self::Bool(v)
	}
}

impl From<Object> for Value {
	fn from(v: Object) -> Self {
		Self::Object(v)
	}
}

impl From<Vec<Object>> for Value {
	fn from(v: Vec<Object>) -> Self {
		Self::Objects(v)
	}
}
