// use `cargo run -p xml-schema --example zoo` to run from git repository base directory

use xml_schema::{
	AttributeField,
	ChildField,
	Declaration,
	Model,
	SerializeOptions,
	TextField,
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

const DOCUMENT: &str = r#"
<zoo>
	<animal type="cat">The cat is a small, typically furry, carnivorous mammal.</animal>
	<animal type="dog">The domestic dog is a member of the genus Canis.</animal>
</zoo>
"#;

fn main() -> xml_schema::Result<()> {
	env_logger::init();

	let mut zoo = xml_schema::from_str(DOCUMENT, "zoo", Zoo::create)?;
	let mut animals = zoo.get("animal")?.into_owned();
	for animal in animals.as_objects().unwrap_or_default() {
		println!("{} (line {})", animal.get("type")?, animal.serialized_line()?);
	}

	let mut cow = Animal::construct([("type", "cow")])?;
	cow.set("description", "Cattle are the most common type of large domesticated ungulates.")?;
	if let Some(list) = animals.as_objects_mut() {
		list.push(cow);
	}
	zoo.set("animal", animals)?;

	eprintln!("Generating XML output...");
	println!("{}", xml_schema::to_string("zoo", &zoo, &SerializeOptions::pretty().declaration())?);
	Ok(())
}
