use crate::{
	errors::{
		self,
		AccessError,
		AccessOp,
		AccessReason,
		ApiErrorKind,
	},
	schema::{
		FieldKind,
		Schema,
	},
	Result,
	Value,
};
use std::{
	borrow::Cow,
	collections::BTreeMap,
	fmt,
	sync::Arc,
};

/// Where a deserialized object came from
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Origin {
	/// Tag the object was parsed from
	pub key: String,
	/// Line of the start tag
	pub line: u64,
}

/// Instance of a schema
///
/// Mapped members are read and written with [`get`](Self::get) / [`set`](Self::set) /
/// [`delete`](Self::delete), which follow the accessor protocol of the member's field.  Names not
/// mapped by the schema are ordinary properties.
#[derive(Clone)]
pub struct Object {
	schema: Arc<Schema>,
	attributes: BTreeMap<String, Value>,
	children: BTreeMap<String, Value>,
	text: Option<Box<Value>>,
	properties: BTreeMap<String, Value>,
	origin: Option<Origin>,
}

impl Object {
	/// Construct from member values
	///
	/// Every mapped member takes the given value, or else its default; members with neither stay
	/// unset.  Values for names the schema doesn't map are rejected.
	pub fn with_values<I, K, V>(schema: Arc<Schema>, values: I) -> Result<Self>
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<Value>,
	{
		let mut values: BTreeMap<String, Value> = values
			.into_iter()
			.map(|(name, value)| (name.into(), value.into()))
			.collect();
		let mut object = Self {
			schema: schema.clone(),
			attributes: BTreeMap::new(),
			children: BTreeMap::new(),
			text: None,
			properties: BTreeMap::new(),
			origin: None,
		};
		for field in schema.fields() {
			let value = values.remove(field.member()).or_else(|| field.default_value().cloned());
			if let Some(value) = value {
				field.set(&mut object, value)?;
			}
		}
		if !values.is_empty() {
			return Err(errors::api(
				schema.name(),
				ApiErrorKind::UnhandledValues {
					keys: values.into_keys().collect(),
				},
			));
		}
		Ok(object)
	}

	/// Construct with defaults only
	pub fn empty(schema: Arc<Schema>) -> Result<Self> {
		Self::with_values(schema, std::iter::empty::<(String, Value)>())
	}

	/// Schema of this object
	pub fn schema(&self) -> &Arc<Schema> {
		&self.schema
	}

	/// Read a member
	pub fn get(&self, member: &str) -> Result<Cow<'_, Value>> {
		match self.schema.member(member) {
			Some(mapped) => Ok(mapped.field().get(self)?),
			None => self
				.properties
				.get(member)
				.map(Cow::Borrowed)
				.ok_or_else(|| errors::access(member, AccessOp::Get, AccessReason::Missing).into()),
		}
	}

	/// Write a member
	pub fn set(&mut self, member: &str, value: impl Into<Value>) -> Result<()> {
		let schema = self.schema.clone();
		match schema.member(member) {
			Some(mapped) => Ok(mapped.field().set(self, value.into())?),
			None => {
				self.properties.insert(member.into(), value.into());
				Ok(())
			},
		}
	}

	/// Remove a member; fails if it has no value
	pub fn delete(&mut self, member: &str) -> Result<()> {
		let schema = self.schema.clone();
		match schema.member(member) {
			Some(mapped) => Ok(mapped.field().delete(self)?),
			None => match self.properties.remove(member) {
				Some(_) => Ok(()),
				None => Err(errors::access(member, AccessOp::Delete, AccessReason::Missing).into()),
			},
		}
	}

	/// Whether reading a member yields a value
	pub fn is_set(&self, member: &str) -> Result<bool> {
		match self.schema.member(member) {
			Some(mapped) => Ok(mapped.field().is_set(self)?),
			None => Ok(self.properties.contains_key(member)),
		}
	}

	/// Ordinary (unmapped) property
	///
	/// Always bypasses mapped members, which makes it the storage of choice for accessor hooks.
	pub fn property(&self, name: &str) -> Option<&Value> {
		self.properties.get(name)
	}

	/// Set an ordinary (unmapped) property
	pub fn set_property(&mut self, name: impl Into<String>, value: impl Into<Value>) {
		self.properties.insert(name.into(), value.into());
	}

	/// Remove an ordinary (unmapped) property
	pub fn remove_property(&mut self, name: &str) -> Option<Value> {
		self.properties.remove(name)
	}

	/// Origin metadata, present if created by deserialization (and not shrunk)
	pub fn origin(&self) -> Option<&Origin> {
		self.origin.as_ref()
	}

	/// Line the object was parsed from
	pub fn serialized_line(&self) -> std::result::Result<u64, AccessError> {
		self.origin.as_ref().map(|origin| origin.line).ok_or_else(|| {
			errors::access("serialized_line", AccessOp::Get, AccessReason::NoOrigin)
		})
	}

	/// Tag the object was parsed from
	pub fn serialized_key(&self) -> std::result::Result<&str, AccessError> {
		self.origin.as_ref().map(|origin| origin.key.as_str()).ok_or_else(|| {
			errors::access("serialized_key", AccessOp::Get, AccessReason::NoOrigin)
		})
	}

	/// Drop origin metadata; field values are untouched
	pub fn shrink(&mut self) {
		self.origin = None;
	}

	pub(crate) fn stamp(&mut self, key: &str, line: u64) {
		self.origin = Some(Origin {
			key: key.into(),
			line,
		});
	}

	pub(crate) fn origin_key(&self) -> Option<&str> {
		self.origin.as_ref().map(|origin| origin.key.as_str())
	}

	pub(crate) fn origin_line(&self) -> u64 {
		self.origin.as_ref().map_or(0, |origin| origin.line)
	}

	pub(crate) fn slot(&self, kind: FieldKind, key: &str) -> Option<&Value> {
		match kind {
			FieldKind::Attribute => self.attributes.get(key),
			FieldKind::Child => self.children.get(key),
			FieldKind::Text => self.text.as_deref(),
		}
	}

	pub(crate) fn slot_mut(&mut self, kind: FieldKind, key: &str) -> Option<&mut Value> {
		match kind {
			FieldKind::Attribute => self.attributes.get_mut(key),
			FieldKind::Child => self.children.get_mut(key),
			FieldKind::Text => self.text.as_deref_mut(),
		}
	}

	pub(crate) fn insert_slot(&mut self, kind: FieldKind, key: &str, value: Value) {
		match kind {
			FieldKind::Attribute => {
				self.attributes.insert(key.into(), value);
			},
			FieldKind::Child => {
				self.children.insert(key.into(), value);
			},
			FieldKind::Text => self.text = Some(Box::new(value)),
		}
	}

	pub(crate) fn remove_slot(&mut self, kind: FieldKind, key: &str) -> Option<Value> {
		match kind {
			FieldKind::Attribute => self.attributes.remove(key),
			FieldKind::Child => self.children.remove(key),
			FieldKind::Text => self.text.take().map(|text| *text),
		}
	}
}

/// Compares schema name and stored values; origin metadata is ignored.
impl PartialEq for Object {
	fn eq(&self, other: &Self) -> bool {
		self.schema.name() == other.schema.name()
			&& self.attributes == other.attributes
			&& self.children == other.children
			&& self.text == other.text
			&& self.properties == other.properties
	}
}

impl fmt::Debug for Object {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut s = f.debug_struct(self.schema.name());
		for (key, value) in &self.attributes {
			s.field(&format!("@{}", key), value);
		}
		for (key, value) in &self.children {
			s.field(key, value);
		}
		if let Some(text) = &self.text {
			s.field("#text", text);
		}
		if !self.properties.is_empty() {
			s.field("properties", &self.properties);
		}
		if let Some(origin) = &self.origin {
			s.field("origin", origin);
		}
		s.finish()
	}
}
