//! Hook function slots for field descriptors
//!
//! Hooks are plain closures wrapped in reference counted handles so descriptors stay cheap to
//! clone.  Closures may fail with any displayable error; the error's type name and message are
//! kept in a [`HookError`] when it is wrapped into an API or format error.

use crate::{
	errors::HookError,
	Object,
	Result,
	Value,
};
use std::{
	fmt,
	str::FromStr,
	sync::Arc,
};

macro_rules! hook_debug {
	($($name:ident),* $(,)?) => {
		$(
			impl fmt::Debug for $name {
				fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
					f.write_str(concat!(stringify!($name), "(..)"))
				}
			}
		)*
	};
}

hook_debug!(SerializeHook, DeserializeHook, GetHook, SetHook, DeleteHook, IgnoreChildHook, Factory);

/// Converts a member value into its text form for the document
#[derive(Clone)]
pub struct SerializeHook(Arc<dyn Fn(&Value) -> std::result::Result<String, HookError> + Send + Sync>);

impl SerializeHook {
	/// Wrap a closure
	pub fn new<F, E>(hook: F) -> Self
	where
		F: Fn(&Value) -> std::result::Result<String, E> + Send + Sync + 'static,
		E: fmt::Display + 'static,
	{
		Self(Arc::new(move |value: &Value| hook(value).map_err(HookError::new)))
	}

	pub(crate) fn call(&self, value: &Value) -> std::result::Result<String, HookError> {
		(self.0)(value)
	}
}

/// Converts text from the document into a member value
#[derive(Clone)]
pub struct DeserializeHook(Arc<dyn Fn(&str) -> std::result::Result<Value, HookError> + Send + Sync>);

impl DeserializeHook {
	/// Wrap a closure
	pub fn new<F, E>(hook: F) -> Self
	where
		F: Fn(&str) -> std::result::Result<Value, E> + Send + Sync + 'static,
		E: fmt::Display + 'static,
	{
		Self(Arc::new(move |text: &str| hook(text).map_err(HookError::new)))
	}

	/// Parse text with `FromStr`; a good default for numbers and booleans.
	pub fn parse<T>() -> Self
	where
		T: FromStr + Into<Value> + 'static,
		T::Err: fmt::Display + 'static,
	{
		Self::new(|text: &str| text.parse::<T>().map(Into::into))
	}

	pub(crate) fn call(&self, text: &str) -> std::result::Result<Value, HookError> {
		(self.0)(text)
	}
}

/// Replaces reading the storage slot of a member
///
/// Returning `Ok(None)` means "no value": direct reads fail with an access error and
/// serialization falls back to the field default (or omits the field).
#[derive(Clone)]
pub struct GetHook(Arc<dyn Fn(&Object) -> std::result::Result<Option<Value>, HookError> + Send + Sync>);

impl GetHook {
	/// Wrap a closure
	pub fn new<F, E>(hook: F) -> Self
	where
		F: Fn(&Object) -> std::result::Result<Option<Value>, E> + Send + Sync + 'static,
		E: fmt::Display + 'static,
	{
		Self(Arc::new(move |object: &Object| hook(object).map_err(HookError::new)))
	}

	pub(crate) fn call(&self, object: &Object) -> std::result::Result<Option<Value>, HookError> {
		(self.0)(object)
	}
}

/// Replaces writing the storage slot of a member
#[derive(Clone)]
pub struct SetHook(Arc<dyn Fn(&mut Object, Value) -> std::result::Result<(), HookError> + Send + Sync>);

impl SetHook {
	/// Wrap a closure
	pub fn new<F, E>(hook: F) -> Self
	where
		F: Fn(&mut Object, Value) -> std::result::Result<(), E> + Send + Sync + 'static,
		E: fmt::Display + 'static,
	{
		Self(Arc::new(move |object: &mut Object, value: Value| hook(object, value).map_err(HookError::new)))
	}

	pub(crate) fn call(&self, object: &mut Object, value: Value) -> std::result::Result<(), HookError> {
		(self.0)(object, value)
	}
}

/// Replaces removing the storage slot of a member
#[derive(Clone)]
pub struct DeleteHook(Arc<dyn Fn(&mut Object) -> std::result::Result<(), HookError> + Send + Sync>);

impl DeleteHook {
	/// Wrap a closure
	pub fn new<F, E>(hook: F) -> Self
	where
		F: Fn(&mut Object) -> std::result::Result<(), E> + Send + Sync + 'static,
		E: fmt::Display + 'static,
	{
		Self(Arc::new(move |object: &mut Object| hook(object).map_err(HookError::new)))
	}

	pub(crate) fn call(&self, object: &mut Object) -> std::result::Result<(), HookError> {
		(self.0)(object)
	}
}

/// Decides whether a child object is skipped during serialization
///
/// Called with the parent, the child key and the child.
#[derive(Clone)]
pub struct IgnoreChildHook(Arc<dyn Fn(&Object, &str, &Object) -> bool + Send + Sync>);

impl IgnoreChildHook {
	/// Wrap a closure
	pub fn new<F>(hook: F) -> Self
	where
		F: Fn(&Object, &str, &Object) -> bool + Send + Sync + 'static,
	{
		Self(Arc::new(hook))
	}

	pub(crate) fn call(&self, parent: &Object, key: &str, child: &Object) -> bool {
		(self.0)(parent, key, child)
	}
}

/// Creates a fresh child object during deserialization
#[derive(Clone)]
pub struct Factory(Arc<dyn Fn() -> Result<Object> + Send + Sync>);

impl Factory {
	/// Wrap a closure
	pub fn new<F>(factory: F) -> Self
	where
		F: Fn() -> Result<Object> + Send + Sync + 'static,
	{
		Self(Arc::new(factory))
	}

	pub(crate) fn call(&self) -> Result<Object> {
		(self.0)()
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn parse_hook() {
		let hook = DeserializeHook::parse::<i64>();
		assert_eq!(hook.call("17").unwrap(), Value::Int(17));
		let e = hook.call("seventeen").unwrap_err();
		assert!(e.type_name.ends_with("ParseIntError"));
	}

	#[test]
	fn serialize_hook_wraps_error() {
		let hook = SerializeHook::new(|value: &Value| match value.as_int() {
			Some(v) if v >= 0 => Ok(format!("{:x}", v)),
			_ => Err("negative"),
		});
		assert_eq!(hook.call(&Value::Int(255)).unwrap(), "ff");
		assert_eq!(
			hook.call(&Value::Int(-1)).unwrap_err(),
			HookError {
				type_name: "&str",
				message: "negative".into(),
			},
		);
	}
}
