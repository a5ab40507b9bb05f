use ordo::parser::{extract, is_builtin, referenced_properties};

#[test]
fn test_single_placeholder() {
    let tokens = extract("Welcome, {{bride}}!");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].property_name, "bride");
    assert_eq!(tokens[0].path, None);
    assert_eq!(tokens[0].raw, "{{bride}}");
    assert!(!tokens[0].is_builtin);
}

#[test]
fn test_order_and_duplicates_preserved() {
    let tokens = extract("{{groom}} and {{bride}}, {{groom}} again");
    let names: Vec<&str> = tokens.iter().map(|t| t.property_name.as_str()).collect();
    assert_eq!(names, vec!["groom", "bride", "groom"]);
}

#[test]
fn test_empty_input() {
    assert!(extract(None).is_empty());
    assert!(extract("").is_empty());
    assert!(extract("No placeholders here.").is_empty());
}

#[test]
fn test_dotted_path() {
    let tokens = extract("{{bride.full_name}}");
    assert_eq!(tokens[0].property_name, "bride");
    assert_eq!(tokens[0].path.as_deref(), Some("full_name"));
    assert_eq!(tokens[0].reference(), "bride.full_name");
}

#[test]
fn test_conditional_branches_kept_literally() {
    let tokens = extract("{{a.b|yes|no}}");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].property_name, "a");
    let conditional = tokens[0].conditional.as_ref().unwrap();
    assert_eq!(conditional.if_true, "yes");
    assert_eq!(conditional.if_false, "no");
}

#[test]
fn test_gendered_placeholder_with_spaces() {
    let tokens = extract("Pray for {{deceased.sex | him | her}}.");
    assert_eq!(tokens[0].property_name, "deceased");
    let conditional = tokens[0].conditional.as_ref().unwrap();
    assert_eq!(conditional.if_true, "him");
    assert_eq!(conditional.if_false, "her");
}

#[test]
fn test_builtins() {
    let tokens = extract("{{parish.name}} in {{parish.city_state}}");
    assert_eq!(tokens.len(), 2);
    assert!(tokens.iter().all(|t| t.is_builtin));
    assert!(is_builtin("parish.city"));
    assert!(!is_builtin("parish.priest"));
    assert!(!is_builtin("parish"));
}

#[test]
fn test_unterminated_placeholder_is_dropped() {
    let tokens = extract("{{bride}} and {{groom");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].property_name, "bride");
}

#[test]
fn test_referenced_properties_skip_builtins() {
    let names = referenced_properties("{{parish.name}} {{bride.full_name}} {{groom}}");
    assert!(names.contains("bride"));
    assert!(names.contains("groom"));
    assert!(!names.contains("parish"));
    assert_eq!(names.len(), 2);
}
