use ordo::document::Language;
use ordo::entity::{Entity, Location, Person, Sex};
use ordo::resolver::{ResolvedField, ResolvedFields};
use ordo::schema::FieldKind;
use ordo::substitute::{substitute, Parish, Substituter};
use serde_json::{json, Value};

fn resolved(name: &str, kind: FieldKind, entity: Entity) -> ResolvedField {
    ResolvedField {
        property_name: name.to_string(),
        kind,
        raw_value: json!(entity.id()),
        resolved_value: Some(entity),
    }
}

fn fields(entries: Vec<ResolvedField>) -> ResolvedFields {
    entries
        .into_iter()
        .map(|f| (f.property_name.clone(), f))
        .collect()
}

fn person(id: &str, first: &str, last: &str, sex: Sex) -> Entity {
    Entity::Person(Person::new(id, first, last).with_sex(sex))
}

fn wedding_fields() -> ResolvedFields {
    fields(vec![
        resolved("bride", FieldKind::Person, person("p1", "Maria", "Lopez", Sex::Female)),
        resolved("groom", FieldKind::Person, person("p2", "John", "Smith", Sex::Male)),
    ])
}

#[test]
fn test_literal_text_preserved_byte_for_byte() {
    let text = "Dear {{bride}},\n\t  welcome ✝ {{groom.first_name}}! {not a placeholder} }}";
    assert_eq!(
        substitute(text, &wedding_fields()),
        "Dear Maria Lopez,\n\t  welcome ✝ John! {not a placeholder} }}"
    );
}

#[test]
fn test_text_without_placeholders_is_unchanged() {
    let text = "{red}Priest:{/red} The Lord be with you.";
    assert_eq!(substitute(text, &ResolvedFields::new()), text);
}

#[test]
fn test_gendered_branches() {
    let fields = wedding_fields();
    assert_eq!(substitute("{{groom.sex|his|her}}", &fields), "his");
    assert_eq!(substitute("{{bride.sex|his|her}}", &fields), "her");
}

#[test]
fn test_undetermined_discriminator_takes_second_branch() {
    let fields = fields(vec![
        resolved("deceased", FieldKind::Person, Entity::Person(Person::new("p3", "Ana", "Cruz"))),
        ResolvedField::raw("celebrant", FieldKind::Person, json!("missing-id")),
        resolved(
            "church",
            FieldKind::Location,
            Entity::Location(Location::named("l1", "St. Anne")),
        ),
    ]);
    assert_eq!(substitute("{{deceased.sex|him|her}}", &fields), "her");
    assert_eq!(substitute("{{celebrant.sex|him|her}}", &fields), "her");
    assert_eq!(substitute("{{church|a|b}}", &fields), "b");
    assert_eq!(substitute("{{nobody|a|b}}", &fields), "b");
}

#[test]
fn test_yes_no_conditional() {
    let fields = fields(vec![
        ResolvedField::raw("sung", FieldKind::YesNo, json!(true)),
        ResolvedField::raw("spoken", FieldKind::YesNo, json!(false)),
    ]);
    assert_eq!(substitute("{{sung|Sung|Recited}}", &fields), "Sung");
    assert_eq!(substitute("{{spoken|Sung|Recited}}", &fields), "Recited");
}

#[test]
fn test_unresolved_falls_back_to_raw_value() {
    let fields = fields(vec![
        ResolvedField::raw("presider", FieldKind::Person, json!("9b2c0c1e")),
        ResolvedField::raw("notes", FieldKind::Text, Value::Null),
    ]);
    assert_eq!(substitute("[{{presider}}]", &fields), "[9b2c0c1e]");
    assert_eq!(substitute("[{{notes}}]", &fields), "[]");
    assert_eq!(substitute("[{{undeclared}}]", &fields), "[]");
}

#[test]
fn test_scalar_formatting() {
    let fields = fields(vec![
        ResolvedField::raw("day", FieldKind::Date, json!("2024-06-15")),
        ResolvedField::raw("hour", FieldKind::Time, json!("14:30:00")),
        ResolvedField::raw("reception", FieldKind::YesNo, json!(true)),
    ]);
    assert_eq!(
        substitute("{{day}} at {{hour}}; reception: {{reception}}", &fields),
        "Saturday, June 15, 2024 at 2:30 PM; reception: Yes"
    );

    let spanish = Substituter::new(&fields).with_language(Language::Es);
    assert_eq!(spanish.substitute("{{day}}"), "sábado, 15 de junio de 2024");
    assert_eq!(spanish.substitute("{{reception}}"), "Sí");
}

#[test]
fn test_parish_builtins() {
    let parish = Parish {
        name: "St. Anne".to_string(),
        city: Some("Austin".to_string()),
        state: Some("TX".to_string()),
    };
    let fields = ResolvedFields::new();
    let text = "{{parish.name}}, {{parish.city_state}}";

    let with_parish = Substituter::new(&fields).with_parish(Some(&parish));
    assert_eq!(with_parish.substitute(text), "St. Anne, Austin, TX");
    assert_eq!(substitute(text, &fields), ", ");
}
