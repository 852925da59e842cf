use indoc::indoc;
use std::{
	convert::Infallible,
	sync::atomic::{
		AtomicUsize,
		Ordering,
	},
};
use xml_schema::{
	AttributeField,
	ChildField,
	Declaration,
	Model,
	Object,
	ParseOptions,
	SerializeOptions,
	TextField,
	Value,
};

struct Animal;

impl Model for Animal {
	fn declare() -> Declaration {
		Declaration::new("Animal")
			.attribute("type", AttributeField::new().required())
			.text("description", TextField::new())
	}
}

struct Zoo;

impl Model for Zoo {
	fn declare() -> Declaration {
		Declaration::new("Zoo").child("animal", ChildField::of::<Animal>().multiple().required())
	}
}

/// An animal without description, grouping subtypes
struct AnimalCategory;

impl Model for AnimalCategory {
	fn declare() -> Declaration {
		Declaration::new("AnimalCategory")
			.extends::<Animal>()
			.plain("description")
			.child("subtype", ChildField::of::<Animal>().multiple().required())
	}
}

struct BetterZoo;

impl Model for BetterZoo {
	fn declare() -> Declaration {
		Declaration::new("BetterZoo")
			.extends::<Zoo>()
			.child("category", ChildField::of::<AnimalCategory>().multiple().required())
	}
}

/// Features are a space separated list in documents, comma separated in the object
struct DetailedAnimal;

impl Model for DetailedAnimal {
	fn declare() -> Declaration {
		Declaration::new("DetailedAnimal").extends::<Animal>().attribute(
			"features",
			AttributeField::new()
				.key("feature")
				.deserializer(|text: &str| {
					Ok::<_, Infallible>(Value::from(text.split_whitespace().collect::<Vec<_>>().join(",")))
				})
				.serializer(|value: &Value| match value.as_str() {
					Some(list) => Ok(list.replace(',', " ")),
					None => Err(format!("expected a feature list, got {}", value.type_name())),
				}),
		)
	}
}

static PARSED: AtomicUsize = AtomicUsize::new(0);
static FORMATTED: AtomicUsize = AtomicUsize::new(0);

fn count_parse(text: &str) -> Result<Value, Infallible> {
	PARSED.fetch_add(1, Ordering::SeqCst);
	Ok(Value::from(text))
}

fn count_format(value: &Value) -> Result<String, Infallible> {
	FORMATTED.fetch_add(1, Ordering::SeqCst);
	Ok(value.to_string())
}

/// Every member goes through counting hooks
struct Counted;

impl Model for Counted {
	fn declare() -> Declaration {
		Declaration::new("Counted")
			.attribute("a", AttributeField::new().deserializer(count_parse).serializer(count_format))
			.attribute("b", AttributeField::new().deserializer(count_parse).serializer(count_format))
			.text("text", TextField::new().deserializer(count_parse).serializer(count_format))
	}
}

fn init() {
	let _ = env_logger::builder().is_test(true).try_init();
}

fn kinds(object: &Object, member: &str) -> Vec<String> {
	object
		.get(member)
		.unwrap()
		.as_objects()
		.unwrap()
		.iter()
		.map(|child| child.get("type").unwrap().as_str().unwrap().to_owned())
		.collect()
}

const ZOO: &str = indoc! {r#"
	<zoo>
		<animal type="cat">The cat, often referred to as the domestic cat to
		distinguish from other felids and felines, is a small, typically
		furry, carnivorous mammal.</animal>
		<animal type="dog">The domestic dog is a member of the genus Canis.</animal>
	</zoo>
"#};

#[test]
fn basic_usage() {
	init();
	let mut zoo = xml_schema::deserialize_model::<Zoo, _>(ZOO.as_bytes(), "zoo", &ParseOptions::default()).unwrap();
	assert_eq!(kinds(&zoo, "animal"), ["cat", "dog"]);

	let animals = zoo.get("animal").unwrap().into_owned();
	let animals = animals.as_objects().unwrap();
	assert_eq!(animals[0].serialized_line().unwrap(), 2);
	assert_eq!(animals[1].serialized_line().unwrap(), 5);
	assert!(animals[0]
		.get("description")
		.unwrap()
		.as_str()
		.unwrap()
		.starts_with("The cat, often referred to"));

	let mut cow = Animal::construct([("type", "cow")]).unwrap();
	cow.set("description", "Cattle are the most common type of large domesticated ungulates.").unwrap();
	let mut animals = animals.to_vec();
	animals.push(cow);
	zoo.set("animal", animals).unwrap();

	let output = xml_schema::to_string("zoo", &zoo, &SerializeOptions::pretty()).unwrap();
	assert!(output.starts_with("<zoo>\n\t<animal type=\"cat\">The cat,"));
	assert!(output.ends_with(concat!(
		"</animal>\n",
		"\t<animal type=\"dog\">The domestic dog is a member of the genus Canis.</animal>\n",
		"\t<animal type=\"cow\">Cattle are the most common type of large domesticated ungulates.</animal>\n",
		"</zoo>",
	)));

	let reparsed = xml_schema::from_str(&output, "zoo", Zoo::create).unwrap();
	assert_eq!(kinds(&reparsed, "animal"), ["cat", "dog", "cow"]);
	assert_eq!(reparsed, zoo);
}

#[test]
fn subclassing() {
	init();
	let document = indoc! {r#"
		<zoo>
			<category type="mammal">
				<subtype type="human">Humans are the only extant members of the subtribe Hominina.</subtype>
				<subtype type="whale">Whales are fully aquatic placental marine mammals.</subtype>
			</category>
			<animal type="fish">Fish are gill-bearing aquatic craniate animals.</animal>
		</zoo>
	"#};
	let zoo = xml_schema::from_str(document, "zoo", BetterZoo::create).unwrap();
	let categories = zoo.get("category").unwrap();
	let mammals = &categories.as_objects().unwrap()[0];
	assert_eq!(kinds(mammals, "subtype"), ["human", "whale"]);
	assert_eq!(kinds(&zoo, "animal"), ["fish"]);

	// the category's description is an ordinary property, so text is rejected
	let e = xml_schema::from_str(r#"<zoo><category type="x">text</category></zoo>"#, "zoo", BetterZoo::create)
		.unwrap_err();
	let e = e.as_format().unwrap();
	assert_eq!(e.key.as_deref(), Some("category"));

	let schema = AnimalCategory::schema().unwrap();
	assert!(schema.text().is_none());
	let names: Vec<_> = schema.declaration().members().map(|(name, _)| name).collect();
	assert_eq!(names, ["type", "description", "subtype"]);
}

#[test]
fn hooks_round_trip() {
	init();
	let document = r#"<animal type="bird" feature="fly  sing">Birds are a group of endothermic vertebrates.</animal>"#;
	let bird = xml_schema::from_str(document, "animal", DetailedAnimal::create).unwrap();
	assert_eq!(bird.get("features").unwrap().as_str(), Some("fly,sing"));
	assert_eq!(
		xml_schema::to_string("animal", &bird, &SerializeOptions::default()).unwrap(),
		r#"<animal type="bird" feature="fly sing">Birds are a group of endothermic vertebrates.</animal>"#,
	);

	let mut broken = bird.clone();
	broken.set("features", 3).unwrap();
	let e = xml_schema::to_string("animal", &broken, &SerializeOptions::default()).unwrap_err();
	assert!(e.to_string().contains("expected a feature list, got an integer"), "{}", e);
}

#[test]
fn shrink_keeps_values() {
	init();
	let mut zoo = xml_schema::from_str(ZOO, "zoo", Zoo::create).unwrap();
	assert_eq!(zoo.serialized_key().unwrap(), "zoo");
	zoo.shrink();
	assert!(zoo.serialized_line().is_err());
	assert_eq!(kinds(&zoo, "animal"), ["cat", "dog"]);
}

#[test]
fn hooks_run_once_per_field() {
	init();
	let document = r#"<counted a="1" b="2">three</counted>"#;
	let counted = xml_schema::from_str(document, "counted", Counted::create).unwrap();
	assert_eq!(PARSED.load(Ordering::SeqCst), 3);
	assert_eq!(FORMATTED.load(Ordering::SeqCst), 0);
	assert_eq!(
		xml_schema::to_string("counted", &counted, &SerializeOptions::default()).unwrap(),
		document,
	);
	assert_eq!(PARSED.load(Ordering::SeqCst), 3);
	assert_eq!(FORMATTED.load(Ordering::SeqCst), 3);
}
