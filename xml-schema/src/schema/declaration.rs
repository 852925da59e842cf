use crate::{
	hooks::IgnoreChildHook,
	schema::{
		AttributeField,
		ChildField,
		Model,
		Schema,
		TextField,
	},
	Object,
	Result,
};
use std::sync::Arc;

/// A declared member of a type
#[derive(Clone, Debug)]
pub enum Member {
	/// Mapped to an attribute
	Attribute(AttributeField),
	/// Mapped to nested elements
	Child(ChildField),
	/// Mapped to the text content
	Text(TextField),
	/// Ordinary property, not mapped; shadows an inherited mapping of the same name
	Plain,
}

/// Ordered member set of a type, the input to [`Schema::build`]
///
/// Members are keyed by member name: declaring a name again (directly or after inheriting it
/// with [`extends`](Self::extends)) replaces the earlier declaration in place.
#[derive(Clone, Debug)]
pub struct Declaration {
	name: String,
	members: Vec<(String, Member)>,
	ignore_child: Option<IgnoreChildHook>,
}

impl Declaration {
	/// Empty declaration for a type called `name`
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			members: Vec::new(),
			ignore_child: None,
		}
	}

	/// Type name (used in error messages)
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Declared members in declaration order
	pub fn members(&self) -> impl Iterator<Item = (&str, &Member)> {
		self.members.iter().map(|(name, member)| (name.as_str(), member))
	}

	/// Inherit all members of model `M`
	pub fn extends<M: Model>(self) -> Self {
		self.extends_declaration(&M::declare())
	}

	/// Inherit all members of `parent`
	///
	/// Inherited members come first; members already declared here override them.
	pub fn extends_declaration(mut self, parent: &Declaration) -> Self {
		let own = std::mem::replace(&mut self.members, parent.members.clone());
		for (name, member) in own {
			self = self.member(name, member);
		}
		if self.ignore_child.is_none() {
			self.ignore_child = parent.ignore_child.clone();
		}
		self
	}

	/// Declare (or redeclare) a member
	pub fn member(mut self, name: impl Into<String>, member: Member) -> Self {
		let name = name.into();
		match self.members.iter_mut().find(|(n, _)| *n == name) {
			Some((_, slot)) => *slot = member,
			None => self.members.push((name, member)),
		}
		self
	}

	/// Declare an attribute member
	pub fn attribute(self, name: impl Into<String>, field: AttributeField) -> Self {
		self.member(name, Member::Attribute(field))
	}

	/// Declare a child member
	pub fn child(self, name: impl Into<String>, field: ChildField) -> Self {
		self.member(name, Member::Child(field))
	}

	/// Declare the text content member
	pub fn text(self, name: impl Into<String>, field: TextField) -> Self {
		self.member(name, Member::Text(field))
	}

	/// Turn a (usually inherited) member into an ordinary property
	pub fn plain(self, name: impl Into<String>) -> Self {
		self.member(name, Member::Plain)
	}

	/// Skip children during serialization when `hook` returns true
	pub fn ignore_child<F>(mut self, hook: F) -> Self
	where
		F: Fn(&Object, &str, &Object) -> bool + Send + Sync + 'static,
	{
		self.ignore_child = Some(IgnoreChildHook::new(hook));
		self
	}

	pub(crate) fn ignore_child_hook(&self) -> Option<&IgnoreChildHook> {
		self.ignore_child.as_ref()
	}

	/// Build the schema; see [`Schema::build`]
	pub fn register(self) -> Result<Arc<Schema>> {
		Schema::build(self)
	}
}
