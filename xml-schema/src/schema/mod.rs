//! Field descriptors and per-type schemas
//!
//! A type is described by a [`Declaration`]: an ordered set of named members, each mapped to an
//! attribute ([`AttributeField`]), nested elements ([`ChildField`]) or the text content
//! ([`TextField`]).  [`Schema::build`] checks the declaration once and produces the immutable
//! [`Schema`] that deserialization and serialization work from.
//!
//! Types implementing [`Model`] get their schema built on first use and cached for the rest of the
//! process.

mod declaration;
mod field;
mod registry;

pub use self::{
	declaration::{
		Declaration,
		Member,
	},
	field::{
		AttributeField,
		ChildField,
		Field,
		FieldCommon,
		FieldKind,
		TextField,
	},
	registry::{
		schema_of,
		Model,
	},
};

use self::field::ChildFactory;
use crate::{
	errors::{
		self,
		ApiErrorKind,
	},
	Object,
	Result,
};
use log::debug;
use std::{
	collections::HashMap,
	fmt,
	sync::Arc,
};

/// Mapped member looked up by name
#[derive(Clone, Copy, Debug)]
pub enum MemberRef<'a> {
	/// Attribute member
	Attribute(&'a AttributeField),
	/// Child member
	Child(&'a ChildField),
	/// Text content member
	Text(&'a TextField),
}

impl<'a> MemberRef<'a> {
	/// Access the field through the common accessor protocol
	pub fn field(self) -> &'a dyn Field {
		match self {
			Self::Attribute(f) => f,
			Self::Child(f) => f,
			Self::Text(f) => f,
		}
	}
}

/// Immutable description of a type's mapped members
pub struct Schema {
	declaration: Declaration,
	attributes: Vec<AttributeField>,
	children: Vec<ChildField>,
	text: Option<TextField>,
	attribute_keys: HashMap<String, usize>,
	child_keys: HashMap<String, usize>,
}

impl Schema {
	/// Check a declaration and build its schema
	///
	/// Keys left empty default to the member name.  Fails if two attributes (or two children)
	/// share a key, if more than one text content member is declared, or if text content and
	/// children are mixed.  Recursive child fields get bound to the new schema.
	pub fn build(declaration: Declaration) -> Result<Arc<Self>> {
		let context = declaration.name();
		let mut attributes: Vec<AttributeField> = Vec::new();
		let mut children: Vec<ChildField> = Vec::new();
		let mut text: Option<TextField> = None;
		let mut attribute_keys = HashMap::new();
		let mut child_keys = HashMap::new();

		for (name, member) in declaration.members() {
			match member {
				Member::Attribute(field) => {
					let mut field = field.clone();
					bind(&mut field.common, name);
					if let Some(&index) = attribute_keys.get(&field.common.key) {
						let conflict: &AttributeField = &attributes[index];
						return Err(errors::api(
							context,
							ApiErrorKind::DuplicateAttributeKey {
								key: field.common.key,
								member: name.into(),
								conflict: conflict.member().into(),
							},
						));
					}
					attribute_keys.insert(field.common.key.clone(), attributes.len());
					attributes.push(field);
				},
				Member::Child(field) => {
					let mut field = field.clone();
					bind(&mut field.common, name);
					if let Some(&index) = child_keys.get(&field.common.key) {
						let conflict: &ChildField = &children[index];
						return Err(errors::api(
							context,
							ApiErrorKind::DuplicateChildKey {
								key: field.common.key,
								member: name.into(),
								conflict: conflict.member().into(),
							},
						));
					}
					child_keys.insert(field.common.key.clone(), children.len());
					children.push(field);
				},
				Member::Text(field) => {
					if let Some(conflict) = &text {
						return Err(errors::api(
							context,
							ApiErrorKind::DuplicateText {
								member: name.into(),
								conflict: conflict.member().into(),
							},
						));
					}
					let mut field = field.clone();
					field.common.member = name.into();
					text = Some(field);
				},
				Member::Plain => (),
			}
		}

		if text.is_some() && !children.is_empty() {
			return Err(errors::api(context, ApiErrorKind::MixedTextAndChildren));
		}

		debug!(
			"registered schema {}: {} attribute(s), {} child field(s), text content: {}",
			context,
			attributes.len(),
			children.len(),
			text.is_some(),
		);

		Ok(Arc::new_cyclic(move |this| {
			for child in children.iter_mut().filter(|child| child.is_recursive()) {
				child.factory = ChildFactory::Enclosing(this.clone());
			}
			Self {
				declaration,
				attributes,
				children,
				text,
				attribute_keys,
				child_keys,
			}
		}))
	}

	/// Type name
	pub fn name(&self) -> &str {
		self.declaration.name()
	}

	/// The declaration this schema was built from
	///
	/// Recursive child fields in the declaration are still unresolved, so it can be used to
	/// derive another type.
	pub fn declaration(&self) -> &Declaration {
		&self.declaration
	}

	/// Attribute fields in schema order
	pub fn attributes(&self) -> &[AttributeField] {
		&self.attributes
	}

	/// Child fields in schema order
	pub fn children(&self) -> &[ChildField] {
		&self.children
	}

	/// Text content field, if declared
	pub fn text(&self) -> Option<&TextField> {
		self.text.as_ref()
	}

	/// Attribute field by document key
	pub fn attribute(&self, key: &str) -> Option<&AttributeField> {
		self.attribute_keys.get(key).map(|&index| &self.attributes[index])
	}

	/// Child field by document key
	pub fn child(&self, key: &str) -> Option<&ChildField> {
		self.child_keys.get(key).map(|&index| &self.children[index])
	}

	/// Mapped member by member name
	pub fn member(&self, name: &str) -> Option<MemberRef<'_>> {
		if let Some(field) = self.attributes.iter().find(|f| f.member() == name) {
			return Some(MemberRef::Attribute(field));
		}
		if let Some(field) = self.children.iter().find(|f| f.member() == name) {
			return Some(MemberRef::Child(field));
		}
		match &self.text {
			Some(field) if field.member() == name => Some(MemberRef::Text(field)),
			_ => None,
		}
	}

	/// All mapped fields: attributes, then children, then text content
	pub fn fields(&self) -> impl Iterator<Item = &dyn Field> {
		let attributes = self.attributes.iter().map(|f| f as &dyn Field);
		let children = self.children.iter().map(|f| f as &dyn Field);
		let text = self.text.iter().map(|f| f as &dyn Field);
		attributes.chain(children).chain(text)
	}

	pub(crate) fn ignores_child(&self, parent: &Object, key: &str, child: &Object) -> bool {
		match self.declaration.ignore_child_hook() {
			Some(hook) => hook.call(parent, key, child),
			None => false,
		}
	}
}

impl fmt::Debug for Schema {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Schema")
			.field("name", &self.name())
			.field("attributes", &self.attributes.iter().map(|a| a.key()).collect::<Vec<_>>())
			.field("children", &self.children.iter().map(|c| c.key()).collect::<Vec<_>>())
			.field("text", &self.text.as_ref().map(|t| t.member()))
			.finish()
	}
}

fn bind(common: &mut FieldCommon, member: &str) {
	common.member = member.into();
	if common.key.is_empty() {
		common.key = member.into();
	}
}
