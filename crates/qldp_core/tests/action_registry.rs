use qldp_core::action::types::{PEOPLE_GET, STORIES_CREATE, STORIES_GET};
use qldp_core::{parse_action_type, registry, ActionDomain, ActionType, ActionTypeError};
use std::collections::BTreeSet;

#[test]
fn registry_lists_every_domain_and_type_once() {
    let registry = registry();
    assert_eq!(registry.len(), ActionDomain::ALL.len());

    let constants: Vec<&str> = registry
        .values()
        .flat_map(|operations| operations.values().copied())
        .collect();
    let unique: BTreeSet<&str> = constants.iter().copied().collect();
    assert_eq!(constants.len(), ActionType::ALL.len());
    assert_eq!(unique.len(), constants.len());
}

#[test]
fn people_domain_exposes_crud_operations() {
    let registry = registry();
    let people = registry.get("people").expect("people domain registered");
    assert_eq!(people.get("GET"), Some(&PEOPLE_GET));
    assert_eq!(people.get("CREATE"), Some(&"qldp/people/create"));
    assert_eq!(people.get("GET_BY_ID"), Some(&"qldp/people/getById"));
    assert_eq!(people.get("UPDATE"), Some(&"qldp/people/update"));
}

#[test]
fn stories_get_keeps_its_leading_slash() {
    assert_eq!(STORIES_GET, "/qldp/stories/get");
    assert_eq!(STORIES_CREATE, "qldp/stories/create");
    assert_eq!(
        parse_action_type("/qldp/stories/get").expect("stories get parses"),
        ActionType::StoriesGet
    );
    assert!(parse_action_type("qldp/stories/get").is_err());
}

#[test]
fn every_type_round_trips_through_its_string() {
    for action_type in ActionType::ALL {
        assert_eq!(
            parse_action_type(action_type.as_str()).expect("registered type parses"),
            action_type
        );
        assert!(action_type.domain().action_types().any(|t| t == action_type));
    }
}

#[test]
fn parse_rejects_empty_and_unknown_types() {
    assert_eq!(parse_action_type("  "), Err(ActionTypeError::EmptyType));
    assert!(matches!(
        parse_action_type("qldp/people/delete"),
        Err(ActionTypeError::UnrecognizedType(_))
    ));
}
