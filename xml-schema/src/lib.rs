#![cfg_attr(doc_cfg, feature(doc_cfg))]
#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/xml-schema/0.1.0")]
//! This library maps between object graphs and XML documents, driven by a schema declared per
//! type.
//!
//! A type declares which of its members map to attributes, which to nested elements and which to
//! the text content of its element (see [`Declaration`] and the [`Model`] trait).  From this
//! declaration a [`Schema`] is built once; documents are then read into [`Object`]s and written
//! back without any per-type parsing code.
//!
//! The mapping is strict: unknown attributes and elements are errors, as are missing required
//! values, repeated single children, and text in elements that don't declare text content.
//! Failures are reported as one of four distinct kinds (see [`errors`]).
//!
//! For the following XML handling crates adaptors are included if enabled through the equally
//! named features:
//! - [`quick-xml`](https://crates.io/crates/quick-xml) (default); provides [`deserialize`] and
//!   [`serialize`]
//!
//! ```
//! use xml_schema::{AttributeField, ChildField, Declaration, Model, SerializeOptions, TextField};
//!
//! struct Zoo;
//! impl Model for Zoo {
//! 	fn declare() -> Declaration {
//! 		Declaration::new("Zoo").child("animal", ChildField::of::<Animal>().multiple().required())
//! 	}
//! }
//!
//! struct Animal;
//! impl Model for Animal {
//! 	fn declare() -> Declaration {
//! 		Declaration::new("Animal")
//! 			.attribute("kind", AttributeField::new().key("type").required())
//! 			.text("text", TextField::new())
//! 	}
//! }
//!
//! let document = r#"<zoo><animal type="cat">TXT1</animal><animal type="dog">TXT2</animal></zoo>"#;
//! let zoo = xml_schema::from_str(document, "zoo", Zoo::create).unwrap();
//! let animals = zoo.get("animal").unwrap();
//! let animals = animals.as_objects().unwrap();
//! assert_eq!(animals[1].get("kind").unwrap().as_str(), Some("dog"));
//! assert_eq!(
//! 	xml_schema::to_string("zoo", &zoo, &SerializeOptions::default()).unwrap(),
//! 	document,
//! );
//! ```

pub mod errors;
pub mod hooks;
mod lifecycle;
mod object;
pub mod options;
pub mod parser;
pub mod schema;
pub mod serializer;
mod value;

/// Result alias with our error type included
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(feature = "quick-xml")]
#[cfg_attr(doc_cfg, doc(cfg(feature = "quick-xml")))]
pub mod quick_xml;

#[cfg(test)]
mod test_struct;

pub use self::{
	errors::{
		AccessError,
		AccessOp,
		AccessReason,
		ApiError,
		ApiErrorKind,
		Error,
		FormatError,
		FormatErrorKind,
		HookError,
	},
	object::{
		Object,
		Origin,
	},
	options::{
		ParseOptions,
		SerializeOptions,
	},
	schema::{
		schema_of,
		AttributeField,
		ChildField,
		Declaration,
		Field,
		FieldKind,
		Member,
		MemberRef,
		Model,
		Schema,
		TextField,
	},
	value::Value,
};

#[cfg(feature = "quick-xml")]
#[cfg_attr(doc_cfg, doc(cfg(feature = "quick-xml")))]
pub use self::quick_xml::{
	deserialize,
	deserialize_model,
	from_str,
	serialize,
	to_string,
};
