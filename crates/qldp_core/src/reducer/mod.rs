//! Slice reducers and the root reducer.
//!
//! # Responsibility
//! - Compute the next value of each slice from (slice, action).
//! - Combine slice reducers into one root transition.
//!
//! # Invariants
//! - Reducers are pure and never panic.
//! - A reducer that does not handle an action returns its input `Arc`
//!   unchanged (pointer-equal).
//! - Each slice is written by exactly one reducer.

pub mod app;
pub mod auth;
pub mod family;
pub mod people;
pub mod records;

use crate::action::{Action, AppAction, PeopleAction};
use crate::state::{AppState, SliceKey};

/// Runs `action` through every slice reducer and returns the next root.
///
/// `state` is never mutated; unchanged slices are shared with the result.
pub fn reduce(state: &AppState, action: &Action) -> AppState {
    AppState {
        error: app::error(&state.error, action),
        loading: app::loading(&state.loading, action),
        user: auth::user(&state.user, action),
        users: records::users(&state.users, action),
        people: people::people(&state.people, action),
        person: people::person(&state.person, action),
        family: family::family(&state.family, action),
        temp_absents: records::temp_absents(&state.temp_absents, action),
        stays: records::stays(&state.stays, action),
        id_cards: records::id_cards(&state.id_cards, action),
        stories: records::stories(&state.stories, action),
        deaths: records::deaths(&state.deaths, action),
    }
}

/// Slices the reducer for `action` may write; every other slice is returned
/// unchanged.
pub fn written_slices(action: &Action) -> &'static [SliceKey] {
    match action {
        Action::App(AppAction::Error(_) | AppAction::Ok) => &[SliceKey::Error],
        Action::App(AppAction::Loading | AppAction::Loaded) => &[SliceKey::Loading],
        Action::Auth(_) => &[SliceKey::User],
        Action::Users(_) => &[SliceKey::Users],
        Action::People(PeopleAction::Get { .. } | PeopleAction::Create { .. }) => {
            &[SliceKey::People]
        }
        Action::People(PeopleAction::GetById { .. } | PeopleAction::Update { .. }) => {
            &[SliceKey::Person]
        }
        Action::Family(_) => &[SliceKey::Family],
        Action::TempAbsents(_) => &[SliceKey::TempAbsents],
        Action::Stays(_) => &[SliceKey::Stays],
        Action::IdCard(_) => &[SliceKey::IdCards],
        Action::Stories(_) => &[SliceKey::Stories],
        Action::Deaths(_) => &[SliceKey::Deaths],
    }
}
