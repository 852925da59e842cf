use indoc::indoc;
use xml_schema::{
	ApiErrorKind,
	AttributeField,
	ChildField,
	Declaration,
	Error,
	FormatError,
	FormatErrorKind,
	Model,
	Object,
	SerializeOptions,
	TextField,
};

struct Library;

impl Model for Library {
	fn declare() -> Declaration {
		Declaration::new("Library")
			.attribute("name", AttributeField::new())
			.child("shelf", ChildField::of::<Shelf>().multiple())
			.child("catalog", ChildField::of::<Catalog>())
	}
}

struct Shelf;

impl Model for Shelf {
	fn declare() -> Declaration {
		Declaration::new("Shelf")
			.attribute("number", AttributeField::new().parsed::<i64>().required())
			.child("book", ChildField::of::<Book>().multiple().required())
	}
}

struct Book;

impl Model for Book {
	fn declare() -> Declaration {
		Declaration::new("Book")
			.attribute("isbn", AttributeField::new().required())
			.text("title", TextField::new().required())
	}
}

struct Catalog;

impl Model for Catalog {
	fn declare() -> Declaration {
		Declaration::new("Catalog").attribute("updated", AttributeField::new())
	}
}

/// Catalog filled in by default
struct Archive;

impl Model for Archive {
	fn declare() -> Declaration {
		let catalog = Catalog::create().expect("catalog schema");
		Declaration::new("Archive").child("catalog", ChildField::of::<Catalog>().with_default(catalog))
	}
}

fn init() {
	let _ = env_logger::builder().is_test(true).try_init();
}

fn parse(document: &str) -> xml_schema::Result<Object> {
	init();
	xml_schema::from_str(document, "library", Library::create)
}

fn format_error(document: &str) -> FormatError {
	match parse(document) {
		Err(Error::Format(e)) => e,
		other => panic!("expected format error, got {:?}", other),
	}
}

#[test]
fn valid_document() {
	let library = parse(indoc! {r#"
		<library name="city">
			<shelf number="1">
				<book isbn="1">Dune</book>
				<book isbn="2">Emma</book>
			</shelf>
			<catalog updated="today"/>
		</library>
	"#})
	.unwrap();
	let shelves = library.get("shelf").unwrap();
	let books = shelves.as_objects().unwrap()[0].get("book").unwrap();
	let titles: Vec<_> = books
		.as_objects()
		.unwrap()
		.iter()
		.map(|book| book.get("title").unwrap().as_str().unwrap().to_owned())
		.collect();
	assert_eq!(titles, ["Dune", "Emma"]);
	assert_eq!(shelves.as_objects().unwrap()[0].get("number").unwrap().as_int(), Some(1));
}

#[test]
fn missing_required_values_at_depth() {
	let e = format_error(indoc! {r#"
		<library>
			<shelf number="1">
				<book>Dune</book>
			</shelf>
		</library>
	"#});
	assert_eq!(e.line, 3);
	assert_eq!(e.key.as_deref(), Some("book"));
	assert_eq!(
		e.kind,
		FormatErrorKind::MissingAttribute {
			key: "isbn".into(),
			member: "isbn".into(),
		}
	);

	let e = format_error(indoc! {r#"
		<library>
			<shelf number="1">
				<book isbn="1"/>
			</shelf>
		</library>
	"#});
	assert_eq!(e.line, 3);
	assert_eq!(e.kind, FormatErrorKind::MissingText { member: "title".into() });

	let e = format_error(indoc! {r#"
		<library>

			<shelf number="1"></shelf>
		</library>
	"#});
	assert_eq!(e.line, 3);
	assert_eq!(e.key.as_deref(), Some("shelf"));
	assert_eq!(
		e.kind,
		FormatErrorKind::MissingChild {
			key: "book".into(),
			member: "book".into(),
		}
	);
}

#[test]
fn unknown_keys() {
	let e = format_error("<library>\n<shelf number=\"1\" color=\"red\"/></library>");
	assert_eq!(e.line, 2);
	assert_eq!(e.kind, FormatErrorKind::UnknownAttribute { name: "color".into() });
	assert_eq!(e.to_string(), r#"line 2, object shelf: does not accept attribute "color""#);

	let e = format_error("<library>\n\n<magazine/></library>");
	assert_eq!(e.line, 3);
	assert_eq!(e.key.as_deref(), Some("library"));
	assert_eq!(e.kind, FormatErrorKind::UnknownChild { name: "magazine".into() });
}

#[test]
fn singleton_conflict() {
	let e = format_error(indoc! {r#"
		<library>
			<catalog/>
			<catalog/>
		</library>
	"#});
	assert_eq!(e.line, 3);
	assert!(matches!(e.kind, FormatErrorKind::DuplicateChild { .. }));

	// a parsed child equal to the default still counts as present
	init();
	let e = xml_schema::from_str(
		indoc! {r#"
			<archive>
				<catalog/>
				<catalog/>
			</archive>
		"#},
		"archive",
		Archive::create,
	)
	.unwrap_err();
	let e = e.as_format().expect("format error");
	assert_eq!(e.line, 3);
	assert!(matches!(e.kind, FormatErrorKind::DuplicateChild { .. }));

	// the constructor default itself is replaced
	let archive = xml_schema::from_str("<archive>\n<catalog/>\n</archive>", "archive", Archive::create).unwrap();
	assert_eq!(archive.get("catalog").unwrap().as_object().unwrap().serialized_line().unwrap(), 2);
}

#[test]
fn failing_deserializer() {
	let e = format_error(r#"<library><shelf number="one"/></library>"#);
	match e.kind {
		FormatErrorKind::DeserializeAttribute { key, value, source, .. } => {
			assert_eq!(key, "number");
			assert_eq!(value, "one");
			assert_eq!(source.message, "invalid digit found in string");
		},
		other => panic!("unexpected {:?}", other),
	}
}

#[test]
fn document_structure() {
	let e = format_error("<archive/>");
	assert_eq!(
		e.kind,
		FormatErrorKind::UnexpectedRoot {
			expected: "library".into(),
			found: "archive".into(),
		}
	);
	assert_eq!(format_error("").kind, FormatErrorKind::EmptyDocument);
	assert_eq!(format_error("<!-- nothing -->\n").kind, FormatErrorKind::EmptyDocument);
	assert_eq!(format_error("hello <library/>").kind, FormatErrorKind::TextOutsideRoot);
	assert_eq!(
		format_error("<library/><library/>").kind,
		FormatErrorKind::ContentAfterRoot { tag: "library".into() }
	);
	assert!(matches!(
		format_error("<library>\n<catalog>").kind,
		FormatErrorKind::UnclosedElement { .. }
	));
	assert!(matches!(parse("<library><catalog></library>"), Err(Error::Xml(_))));
}

#[test]
fn registration_errors() {
	init();
	let e = Declaration::new("Broken")
		.attribute("a", AttributeField::new().key("x"))
		.attribute("b", AttributeField::new().key("x"))
		.register()
		.unwrap_err();
	assert!(matches!(e.as_api().map(|e| &e.kind), Some(ApiErrorKind::DuplicateAttributeKey { .. })));
	assert_eq!(
		e.to_string(),
		r#"Broken: two attributes have the same key "x" (members b and a)"#
	);

	let e = Book::construct([("isbn", "1"), ("author", "Austen")]).unwrap_err();
	assert_eq!(e.to_string(), "Book: unhandled constructor values: author");
}

#[test]
fn serialization_misuse() {
	init();
	let book = Book::construct([("isbn", "1")]).unwrap();
	let e = xml_schema::to_string("book", &book, &SerializeOptions::default()).unwrap_err();
	assert!(matches!(e.as_api().map(|e| &e.kind), Some(ApiErrorKind::MissingText { .. })));

	let shelf = Shelf::construct([("number", 1)]).unwrap();
	let e = xml_schema::to_string("shelf", &shelf, &SerializeOptions::default()).unwrap_err();
	assert!(matches!(e.as_api().map(|e| &e.kind), Some(ApiErrorKind::MissingChild { .. })));

	let mut book = Book::create().unwrap();
	let e = book.delete("title").unwrap_err();
	assert!(e.as_access().unwrap().is_unset());
	book.set("title", "Persuasion").unwrap();
	book.delete("title").unwrap();
}
