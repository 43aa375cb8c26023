#![allow(non_snake_case)]

use super::*;

fn field(name: &str, ty: &str) -> ModelField {
    ModelField {
        name: name.to_string(),
        wire_name: name.to_string(),
        ty: ty.to_string(),
        wire_type: ty.to_string(),
        ..ModelField::default()
    }
}

#[test]
fn ApiContext___add_model___registers_lookup_entry() {
    let mut ctx = ApiContext::new("pkg", RoutePrefix::Twirp);

    ctx.add_model(Model::new("User"));

    assert_eq!(ctx.model("User").map(|m| m.name.as_str()), Some("User"));
    assert!(ctx.model("Missing").is_none());
}

#[test]
fn ApiContext___add_model___preserves_insertion_order() {
    let mut ctx = ApiContext::new("pkg", RoutePrefix::Twirp);

    ctx.add_model(Model::new("Zeta"));
    ctx.add_model(Model::new("Alpha"));
    ctx.add_model(Model::new("Mid"));

    let names: Vec<&str> = ctx.models.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
}

#[test]
fn ApiContext___duplicate_model___later_declaration_wins_lookup() {
    let mut ctx = ApiContext::new("pkg", RoutePrefix::Twirp);
    let mut second = Model::new("Dup");
    second.fields.push(field("x", "string"));

    ctx.add_model(Model::new("Dup"));
    ctx.add_model(second);

    assert_eq!(ctx.models.len(), 2);
    assert_eq!(ctx.model("Dup").unwrap().fields.len(), 1);
}

#[test]
fn ApiContext___require_model___missing_returns_malformed_schema() {
    let ctx = ApiContext::new("pkg", RoutePrefix::Twirp);

    let result = ctx.require_model("Ghost", "field ghost");

    assert!(matches!(
        result,
        Err(CompileError::MalformedSchema { ref type_name, .. }) if type_name == "Ghost"
    ));
}

#[test]
fn Model___timestamp_sentinel___is_primitive_without_fields() {
    let sentinel = Model::timestamp_sentinel();

    assert_eq!(sentinel.name, TIMESTAMP_SENTINEL);
    assert!(sentinel.primitive);
    assert!(sentinel.fields.is_empty());
    assert!(!sentinel.has_converters());
}

#[test]
fn Model___primitive_map___has_no_converters() {
    let mut map = Model::new("M_Counts");
    map.is_map = true;
    map.map_value_type = Some("number".into());
    map.map_value_type_primitive = true;

    assert!(!map.has_converters());
}

#[test]
fn Model___message_map___has_converters() {
    let mut map = Model::new("M_Users");
    map.is_map = true;
    map.map_value_type = Some("User".into());

    assert!(map.has_converters());
}

#[test]
fn Model___map_value_field___finds_value() {
    let mut map = Model::new("M_Counts");
    map.fields.push(field("key", "string"));
    map.fields.push(field("value", "number"));

    assert_eq!(map.map_value_field().map(|f| f.ty.as_str()), Some("number"));
}

#[test]
fn ModelField___base_type___strips_array_suffix() {
    let mut f = field("items", "Item[]");
    f.is_repeated = true;

    assert_eq!(f.base_type(), "Item");
    assert!(f.is_array());
}

#[test]
fn ModelField___map_field___is_not_array() {
    let mut f = field("counts", "M_Counts");
    f.is_repeated = true;
    f.is_map = true;

    assert_eq!(f.base_type(), "M_Counts");
    assert!(!f.is_array());
}

#[test]
fn ApiContext___flagged_models___lists_each_direction() {
    let mut ctx = ApiContext::new("pkg", RoutePrefix::Twirp);
    let mut a = Model::new("A");
    a.can_marshal = true;
    let mut b = Model::new("B");
    b.can_unmarshal = true;
    b.can_marshal = true;
    ctx.add_model(a);
    ctx.add_model(b);
    ctx.add_model(Model::new("C"));

    let (marshal, unmarshal) = ctx.flagged_models();

    assert_eq!(marshal, vec!["A", "B"]);
    assert_eq!(unmarshal, vec!["B"]);
}
