use qldp_core::action::{AppAction, AuthAction, FamilyAction, PeopleAction, RecordAction};
use qldp_core::model::record::{
    DeathRecord, ErrorDescriptor, FamilyMemberRecord, FamilyRecord, IdCardRecord, PersonRecord,
    StayRecord, StoryRecord, TempAbsentRecord, UserRecord,
};
use qldp_core::state::slice::EntitySlice;
use qldp_core::{
    initial_state, reduce, written_slices, Action, AppState, LoginSuccess, Role, SliceKey,
};
use std::collections::BTreeMap;
use std::sync::Arc;

fn every_action() -> Vec<Action> {
    vec![
        Action::App(AppAction::Error(ErrorDescriptor::new("boom"))),
        Action::App(AppAction::Ok),
        Action::App(AppAction::Loading),
        Action::App(AppAction::Loaded),
        Action::login(LoginSuccess::new("canbo", [Role::Manager])),
        Action::Auth(AuthAction::SendMailSuccess),
        Action::Auth(AuthAction::ClearSent),
        Action::logout(),
        Action::Users(RecordAction::Create(UserRecord::default())),
        Action::people_get([(1, PersonRecord::new(1, "A"))]),
        Action::people_create(PersonRecord::new(2, "X")),
        Action::People(PeopleAction::GetById {
            person: PersonRecord::new(3, "Y"),
        }),
        Action::Family(FamilyAction::Get {
            family: FamilyRecord::default(),
        }),
        Action::People(PeopleAction::Update {
            person: PersonRecord::new(3, "Z"),
        }),
        Action::Family(FamilyAction::AddPerson {
            family: FamilyRecord::default(),
        }),
        Action::Users(RecordAction::Get(BTreeMap::new())),
        Action::TempAbsents(RecordAction::Create(TempAbsentRecord::default())),
        Action::TempAbsents(RecordAction::Get(BTreeMap::new())),
        Action::Stays(RecordAction::Create(StayRecord::default())),
        Action::Stays(RecordAction::Get(BTreeMap::new())),
        Action::IdCard(RecordAction::Create(IdCardRecord::default())),
        Action::IdCard(RecordAction::Get(BTreeMap::new())),
        Action::Stories(RecordAction::Create(StoryRecord::default())),
        Action::Stories(RecordAction::Get(BTreeMap::new())),
        Action::Deaths(RecordAction::Create(DeathRecord::default())),
        Action::Deaths(RecordAction::Get(BTreeMap::new())),
    ]
}

fn assert_holds_every_key(state: &AppState) {
    let json = serde_json::to_value(state).expect("state serializes");
    let object = json.as_object().expect("state is an object");
    assert_eq!(object.len(), SliceKey::ALL.len());
    for key in SliceKey::ALL {
        assert!(object.contains_key(key.as_str()), "missing key {key}");
    }
}

fn assert_same_slices(left: &AppState, right: &AppState) {
    assert!(
        left.changed_slices(right).is_empty(),
        "expected every slice to be shared"
    );
}

#[test]
fn initial_state_holds_every_key() {
    let state = initial_state();
    let json = serde_json::to_value(&state).expect("state serializes");
    let object = json.as_object().expect("state is an object");
    for key in SliceKey::ALL {
        assert!(object.contains_key(key.as_str()), "missing key {key}");
    }
    assert_eq!(object.len(), SliceKey::ALL.len());
    assert_eq!(json["people"], serde_json::json!({}));
    assert_eq!(json["loading"], serde_json::json!(false));
}

#[test]
fn each_action_changes_only_the_slices_it_targets() {
    let state = initial_state();
    let next = reduce(&state, &Action::people_create(PersonRecord::new(2, "X")));
    assert_eq!(next.changed_slices(&state), vec![SliceKey::People]);

    let next = reduce(&state, &Action::login(LoginSuccess::new("a", [Role::Admin])));
    assert_eq!(next.changed_slices(&state), vec![SliceKey::User]);

    let next = reduce(&state, &Action::Stays(RecordAction::Create(StayRecord::default())));
    assert_eq!(next.changed_slices(&state), vec![SliceKey::Stays]);
}

#[test]
fn every_action_changes_only_slices_it_owns() {
    let mut state = initial_state();
    for action in every_action() {
        let next = reduce(&state, &action);
        let owned = written_slices(&action);
        for key in next.changed_slices(&state) {
            assert!(
                owned.contains(&key),
                "{} changed {key}, outside {owned:?}",
                action.action_type()
            );
        }
        assert_holds_every_key(&next);
        state = next;
    }
}

#[test]
fn unrelated_slices_stay_pointer_equal() {
    let state = initial_state();
    let next = reduce(&state, &Action::people_create(PersonRecord::new(2, "X")));
    assert!(Arc::ptr_eq(&next.user, &state.user));
    assert!(Arc::ptr_eq(&next.person, &state.person));
    assert!(Arc::ptr_eq(&next.stays, &state.stays));
    assert!(!Arc::ptr_eq(&next.people, &state.people));
}

#[test]
fn reducing_never_mutates_the_previous_root() {
    let mut state = initial_state();
    for action in every_action() {
        let snapshot = state.clone();
        let next = reduce(&state, &action);
        assert_eq!(state, snapshot);
        assert_same_slices(&state, &snapshot);
        state = next;
    }
}

#[test]
fn people_get_replaces_collection_and_create_overwrites_it() {
    let state = reduce(
        &initial_state(),
        &Action::people_get([(1, PersonRecord::new(1, "A")), (5, PersonRecord::new(5, "B"))]),
    );
    let people = state.people.as_collection().expect("collection after get");
    assert_eq!(people.len(), 2);

    let state = reduce(&state, &Action::people_create(PersonRecord::new(2, "X")));
    assert_eq!(*state.people, EntitySlice::Single(PersonRecord::new(2, "X")));
    assert!(state.people.as_collection().is_none());
}

#[test]
fn get_is_idempotent() {
    let action = Action::people_get([(1, PersonRecord::new(1, "A"))]);
    let once = reduce(&initial_state(), &action);
    let twice = reduce(&once, &action);
    assert_eq!(once, twice);
}

#[test]
fn loading_and_error_flags_follow_app_actions() {
    let state = reduce(&initial_state(), &Action::App(AppAction::Loading));
    assert!(*state.loading);
    let state = reduce(&state, &Action::App(AppAction::Loaded));
    assert!(!*state.loading);

    let state = reduce(
        &state,
        &Action::App(AppAction::Error(ErrorDescriptor::new("timeout"))),
    );
    assert_eq!(
        state.error.as_ref().as_ref().map(|error| error.message.as_str()),
        Some("timeout")
    );
    let state = reduce(&state, &Action::App(AppAction::Ok));
    assert!(state.error.is_none());
}

#[test]
fn logout_resets_only_the_session() {
    let state = reduce(
        &initial_state(),
        &Action::login(LoginSuccess::new("canbo", [Role::Manager])),
    );
    let state = reduce(&state, &Action::people_create(PersonRecord::new(2, "X")));
    assert!(state.user.authenticated);

    let next = reduce(&state, &Action::logout());
    assert!(!next.user.authenticated);
    assert!(next.user.roles.is_empty());
    assert_eq!(next.changed_slices(&state), vec![SliceKey::User]);
    assert!(!next.people.is_empty());
}

#[test]
fn send_mail_flag_toggles() {
    let state = reduce(&initial_state(), &Action::Auth(AuthAction::SendMailSuccess));
    assert!(state.user.sent);
    let state = reduce(&state, &Action::Auth(AuthAction::ClearSent));
    assert!(!state.user.sent);
}

#[test]
fn family_and_person_select_payload() {
    let family = FamilyRecord {
        household_id: Some(9),
        members: vec![FamilyMemberRecord {
            person: Some(PersonRecord::new(1, "Chu ho")),
            host_relation: Some("host".to_string()),
            ..FamilyMemberRecord::default()
        }],
        ..FamilyRecord::default()
    };
    let state = reduce(
        &initial_state(),
        &Action::Family(FamilyAction::AddPerson {
            family: family.clone(),
        }),
    );
    assert_eq!(state.family.as_ref().as_ref(), Some(&family));

    let state = reduce(
        &state,
        &Action::People(PeopleAction::Update {
            person: PersonRecord::new(1, "Renamed"),
        }),
    );
    assert_eq!(
        state.person.as_ref().as_ref().and_then(|p| p.name.as_deref()),
        Some("Renamed")
    );
}
