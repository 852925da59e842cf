use crate::{
	errors::{
		self,
		AccessError,
		AccessOp,
		AccessReason,
		ApiErrorKind,
	},
	hooks::{
		DeleteHook,
		DeserializeHook,
		Factory,
		GetHook,
		SerializeHook,
		SetHook,
	},
	schema::{
		Model,
		Schema,
	},
	HookError,
	Object,
	Result,
	Value,
};
use std::{
	borrow::Cow,
	fmt,
	str::FromStr,
	sync::Weak,
};

/// Which part of an element a field maps to
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKind {
	/// `key="value"` pair on the element
	Attribute,
	/// Nested element
	Child,
	/// Text directly inside the element
	Text,
}

/// Optional overrides for reading, writing and removing a member
///
/// If at least one hook is set the storage slot is never used; operations without a hook fail
/// with an access error.
#[derive(Clone, Default, Debug)]
pub(crate) struct Accessors {
	get: Option<GetHook>,
	set: Option<SetHook>,
	delete: Option<DeleteHook>,
}

impl Accessors {
	fn is_custom(&self) -> bool {
		self.get.is_some() || self.set.is_some() || self.delete.is_some()
	}
}

/// Settings shared by all field descriptors
#[derive(Clone, Debug)]
pub struct FieldCommon {
	pub(crate) required: bool,
	pub(crate) default: Option<Value>,
	pub(crate) key: String,
	pub(crate) member: String,
	pub(crate) accessors: Accessors,
}

impl FieldCommon {
	fn new() -> Self {
		Self {
			required: false,
			default: None,
			key: String::new(),
			member: String::new(),
			accessors: Accessors::default(),
		}
	}

	pub(crate) fn accessors_custom(&self) -> bool {
		self.accessors.is_custom()
	}
}

/// Accessor protocol shared by [`AttributeField`], [`ChildField`] and [`TextField`]
///
/// Without accessor hooks values live in a private storage slot of the object, addressed by the
/// field kind and key.
pub trait Field: fmt::Debug {
	/// Variant of this field
	fn kind(&self) -> FieldKind;

	/// Shared settings
	fn common(&self) -> &FieldCommon;

	/// Key in the document (empty for text content)
	fn key(&self) -> &str {
		&self.common().key
	}

	/// Member name in the object
	fn member(&self) -> &str {
		&self.common().member
	}

	/// Whether a value must be present in documents
	fn is_required(&self) -> bool {
		self.common().required
	}

	/// Value used when neither the constructor nor the document provides one
	fn default_value(&self) -> Option<&Value> {
		self.common().default.as_ref()
	}

	/// Read the member value
	fn get<'o>(&self, object: &'o Object) -> std::result::Result<Cow<'o, Value>, AccessError> {
		let common = self.common();
		if !common.accessors.is_custom() {
			return object
				.slot(self.kind(), &common.key)
				.map(Cow::Borrowed)
				.ok_or_else(|| errors::access(&common.member, AccessOp::Get, AccessReason::Missing));
		}
		let hook = common.accessors.get.as_ref().ok_or_else(|| {
			errors::access(&common.member, AccessOp::Get, AccessReason::Unsupported)
		})?;
		match hook.call(object) {
			Ok(Some(value)) => Ok(Cow::Owned(value)),
			Ok(None) => Err(errors::access(&common.member, AccessOp::Get, AccessReason::Missing)),
			Err(e) => Err(hook_failed(&common.member, AccessOp::Get, e)),
		}
	}

	/// Write the member value
	fn set(&self, object: &mut Object, value: Value) -> std::result::Result<(), AccessError> {
		let common = self.common();
		if !common.accessors.is_custom() {
			object.insert_slot(self.kind(), &common.key, value);
			return Ok(());
		}
		let hook = common.accessors.set.as_ref().ok_or_else(|| {
			errors::access(&common.member, AccessOp::Set, AccessReason::Unsupported)
		})?;
		hook.call(object, value).map_err(|e| hook_failed(&common.member, AccessOp::Set, e))
	}

	/// Remove the member value; fails if there is none
	fn delete(&self, object: &mut Object) -> std::result::Result<(), AccessError> {
		let common = self.common();
		if !common.accessors.is_custom() {
			return match object.remove_slot(self.kind(), &common.key) {
				Some(_) => Ok(()),
				None => Err(errors::access(&common.member, AccessOp::Delete, AccessReason::Missing)),
			};
		}
		let hook = common.accessors.delete.as_ref().ok_or_else(|| {
			errors::access(&common.member, AccessOp::Delete, AccessReason::Unsupported)
		})?;
		hook.call(object).map_err(|e| hook_failed(&common.member, AccessOp::Delete, e))
	}

	/// Whether reading the member yields a value
	fn is_set(&self, object: &Object) -> std::result::Result<bool, AccessError> {
		match self.get(object) {
			Ok(_) => Ok(true),
			Err(e) if e.is_unset() => Ok(false),
			Err(e) => Err(e),
		}
	}
}

fn hook_failed(member: &str, op: AccessOp, e: HookError) -> AccessError {
	errors::access(member, op, AccessReason::Hook(e))
}

// builder methods every field variant supports
macro_rules! common_builders {
	($name:ident, $kind:ident) => {
		impl $name {
			/// Require a value in documents (and when serializing)
			pub fn required(mut self) -> Self {
				self.common.required = true;
				self
			}

			/// Value to set on construction if none is given
			pub fn with_default(mut self, value: impl Into<Value>) -> Self {
				self.common.default = Some(value.into());
				self
			}

			/// Read the member through `hook` instead of the storage slot
			pub fn getter<F, E>(mut self, hook: F) -> Self
			where
				F: Fn(&Object) -> std::result::Result<Option<Value>, E> + Send + Sync + 'static,
				E: fmt::Display + 'static,
			{
				self.common.accessors.get = Some(GetHook::new(hook));
				self
			}

			/// Write the member through `hook` instead of the storage slot
			pub fn setter<F, E>(mut self, hook: F) -> Self
			where
				F: Fn(&mut Object, Value) -> std::result::Result<(), E> + Send + Sync + 'static,
				E: fmt::Display + 'static,
			{
				self.common.accessors.set = Some(SetHook::new(hook));
				self
			}

			/// Remove the member through `hook` instead of the storage slot
			pub fn deleter<F, E>(mut self, hook: F) -> Self
			where
				F: Fn(&mut Object) -> std::result::Result<(), E> + Send + Sync + 'static,
				E: fmt::Display + 'static,
			{
				self.common.accessors.delete = Some(DeleteHook::new(hook));
				self
			}
		}

		impl Field for $name {
			fn kind(&self) -> FieldKind {
				FieldKind::$kind
			}

			fn common(&self) -> &FieldCommon {
				&self.common
			}
		}
	};
}

// value transform builders for attributes and text content
macro_rules! transform_builders {
	($name:ident) => {
		impl $name {
			/// Transform values into document text with `hook`
			pub fn serializer<F, E>(mut self, hook: F) -> Self
			where
				F: Fn(&Value) -> std::result::Result<String, E> + Send + Sync + 'static,
				E: fmt::Display + 'static,
			{
				self.serializer = Some(SerializeHook::new(hook));
				self
			}

			/// Transform document text into values with `hook`
			pub fn deserializer<F, E>(mut self, hook: F) -> Self
			where
				F: Fn(&str) -> std::result::Result<Value, E> + Send + Sync + 'static,
				E: fmt::Display + 'static,
			{
				self.deserializer = Some(DeserializeHook::new(hook));
				self
			}

			/// Parse document text with `FromStr` (written back with `Display`)
			pub fn parsed<T>(mut self) -> Self
			where
				T: FromStr + Into<Value> + 'static,
				T::Err: fmt::Display + 'static,
			{
				self.deserializer = Some(DeserializeHook::parse::<T>());
				self
			}

			/// Serializer hook, if any
			pub fn serialize_hook(&self) -> Option<&SerializeHook> {
				self.serializer.as_ref()
			}

			/// Deserializer hook, if any
			pub fn deserialize_hook(&self) -> Option<&DeserializeHook> {
				self.deserializer.as_ref()
			}
		}
	};
}

/// Member mapped to an attribute
#[derive(Clone, Debug)]
pub struct AttributeField {
	pub(crate) common: FieldCommon,
	serializer: Option<SerializeHook>,
	deserializer: Option<DeserializeHook>,
}

impl AttributeField {
	/// Optional attribute keyed by its member name
	pub fn new() -> Self {
		Self {
			common: FieldCommon::new(),
			serializer: None,
			deserializer: None,
		}
	}

	/// Use `key` in documents instead of the member name
	pub fn key(mut self, key: impl Into<String>) -> Self {
		self.common.key = key.into();
		self
	}
}

impl Default for AttributeField {
	fn default() -> Self {
		Self::new()
	}
}

common_builders!(AttributeField, Attribute);
transform_builders!(AttributeField);

/// Member holding the trimmed text directly inside the element
#[derive(Clone, Debug)]
pub struct TextField {
	pub(crate) common: FieldCommon,
	serializer: Option<SerializeHook>,
	deserializer: Option<DeserializeHook>,
}

impl TextField {
	/// Optional text content
	pub fn new() -> Self {
		Self {
			common: FieldCommon::new(),
			serializer: None,
			deserializer: None,
		}
	}
}

impl Default for TextField {
	fn default() -> Self {
		Self::new()
	}
}

common_builders!(TextField, Text);
transform_builders!(TextField);

#[derive(Clone)]
pub(crate) enum ChildFactory {
	Function(Factory),
	/// Placeholder for "an instance of the enclosing type"
	Recursive,
	/// Resolved placeholder
	Enclosing(Weak<Schema>),
}

impl fmt::Debug for ChildFactory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Function(factory) => factory.fmt(f),
			Self::Recursive => f.write_str("Recursive"),
			Self::Enclosing(_) => f.write_str("Enclosing"),
		}
	}
}

/// Member mapped to nested elements
#[derive(Clone, Debug)]
pub struct ChildField {
	pub(crate) common: FieldCommon,
	pub(crate) factory: ChildFactory,
	multiple: bool,
}

impl ChildField {
	/// Child created by `factory`
	pub fn new<F>(factory: F) -> Self
	where
		F: Fn() -> Result<Object> + Send + Sync + 'static,
	{
		Self::with_factory(ChildFactory::Function(Factory::new(factory)))
	}

	/// Child of model type `M`
	pub fn of<M: Model>() -> Self {
		Self::new(M::create)
	}

	/// Child of the type that declares this field (resolved on registration)
	pub fn recursive() -> Self {
		Self::with_factory(ChildFactory::Recursive)
	}

	fn with_factory(factory: ChildFactory) -> Self {
		Self {
			common: FieldCommon::new(),
			factory,
			multiple: false,
		}
	}

	/// Use `key` in documents instead of the member name
	pub fn key(mut self, key: impl Into<String>) -> Self {
		self.common.key = key.into();
		self
	}

	/// Accept any number of children, kept in document order
	pub fn multiple(mut self) -> Self {
		self.multiple = true;
		self
	}

	/// Whether any number of children is accepted
	pub fn is_multiple(&self) -> bool {
		self.multiple
	}

	pub(crate) fn is_recursive(&self) -> bool {
		matches!(self.factory, ChildFactory::Recursive)
	}

	/// Create a fresh (not yet attached) child object
	pub(crate) fn create(&self, context: &str) -> Result<Object> {
		let created = match &self.factory {
			ChildFactory::Function(factory) => factory.call(),
			ChildFactory::Enclosing(schema) => match schema.upgrade() {
				Some(schema) => Object::empty(schema),
				None => return Err(self.unresolved(context)),
			},
			ChildFactory::Recursive => return Err(self.unresolved(context)),
		};
		created.map_err(|source| {
			errors::api(
				context,
				ApiErrorKind::ChildFactory {
					key: self.common.key.clone(),
					member: self.common.member.clone(),
					source: Box::new(source),
				},
			)
		})
	}

	fn unresolved(&self, context: &str) -> crate::Error {
		errors::api(
			context,
			ApiErrorKind::UnresolvedRecursion {
				key: self.common.key.clone(),
				member: self.common.member.clone(),
			},
		)
	}
}

common_builders!(ChildField, Child);
