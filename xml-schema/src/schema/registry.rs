use crate::{
	schema::{
		Declaration,
		Schema,
	},
	Object,
	Result,
	Value,
};
use std::{
	any::TypeId,
	collections::HashMap,
	sync::{
		Arc,
		OnceLock,
		PoisonError,
		RwLock,
	},
};

/// A Rust type standing for a mapped document type
///
/// Implementors only declare their members; the schema is built on first use (see
/// [`schema_of`]) and shared afterwards.
///
/// ```
/// use xml_schema::{AttributeField, Declaration, Model, TextField};
///
/// struct Animal;
///
/// impl Model for Animal {
/// 	fn declare() -> Declaration {
/// 		Declaration::new("animal")
/// 			.attribute("kind", AttributeField::new().key("type").required())
/// 			.text("text", TextField::new())
/// 	}
/// }
///
/// let cat = Animal::construct([("kind", "cat")]).unwrap();
/// assert_eq!(cat.get("kind").unwrap().as_str(), Some("cat"));
/// ```
pub trait Model: 'static {
	/// Declare the mapped members
	fn declare() -> Declaration;

	/// The registered schema
	fn schema() -> Result<Arc<Schema>> {
		schema_of::<Self>()
	}

	/// New instance with all defaults set
	fn create() -> Result<Object> {
		Object::empty(Self::schema()?)
	}

	/// New instance from member values (see [`Object::with_values`])
	fn construct<I, K, V>(values: I) -> Result<Object>
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<Value>,
	{
		Object::with_values(Self::schema()?, values)
	}
}

type Registry = RwLock<HashMap<TypeId, Arc<Schema>>>;

fn registry() -> &'static Registry {
	static REGISTRY: OnceLock<Registry> = OnceLock::new();
	REGISTRY.get_or_init(Default::default)
}

/// Schema of model `M`, built once per process
///
/// A failing declaration is not cached; every call reports the same error again.
pub fn schema_of<M: Model + ?Sized>() -> Result<Arc<Schema>> {
	let id = TypeId::of::<M>();
	if let Some(schema) = registry().read().unwrap_or_else(PoisonError::into_inner).get(&id) {
		return Ok(schema.clone());
	}
	// build without holding the lock: declarations may look up other models
	let schema = Schema::build(M::declare())?;
	let mut registry = registry().write().unwrap_or_else(PoisonError::into_inner);
	Ok(registry.entry(id).or_insert(schema).clone())
}
