//! Application state tree and its initial descriptor.
//!
//! # Responsibility
//! - Define the root `AppState` and the default value of every slice.
//! - Name slices so logs and request tickets can refer to them.
//!
//! # Invariants
//! - The root always holds every key in `SliceKey::ALL`; a struct field per
//!   key makes removal impossible.
//! - Slices sit behind `Arc` so an unchanged slice is shared, not copied,
//!   between successive roots.

pub mod slice;

use crate::model::record::{
    DeathRecord, ErrorDescriptor, FamilyRecord, IdCardRecord, PersonRecord, StayRecord,
    StoryRecord, TempAbsentRecord, UserRecord,
};
use crate::model::session::AuthSession;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use slice::EntitySlice;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Top-level key of the state tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SliceKey {
    Error,
    Loading,
    User,
    Users,
    People,
    Person,
    Family,
    TempAbsents,
    Stays,
    IdCards,
    Stories,
    Deaths,
}

impl SliceKey {
    pub const ALL: [SliceKey; 12] = [
        Self::Error,
        Self::Loading,
        Self::User,
        Self::Users,
        Self::People,
        Self::Person,
        Self::Family,
        Self::TempAbsents,
        Self::Stays,
        Self::IdCards,
        Self::Stories,
        Self::Deaths,
    ];

    /// Key as serialized in the state tree.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Loading => "loading",
            Self::User => "user",
            Self::Users => "users",
            Self::People => "people",
            Self::Person => "person",
            Self::Family => "family",
            Self::TempAbsents => "tempAbsents",
            Self::Stays => "stays",
            Self::IdCards => "idCards",
            Self::Stories => "stories",
            Self::Deaths => "deaths",
        }
    }
}

impl Display for SliceKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Root of the client state tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub error: Arc<Option<ErrorDescriptor>>,
    pub loading: Arc<bool>,
    pub user: Arc<AuthSession>,
    pub users: Arc<EntitySlice<UserRecord>>,
    pub people: Arc<EntitySlice<PersonRecord>>,
    /// Currently selected person; `None` until one is fetched.
    #[serde(serialize_with = "serialize_selection")]
    pub person: Arc<Option<PersonRecord>>,
    #[serde(serialize_with = "serialize_selection")]
    pub family: Arc<Option<FamilyRecord>>,
    pub temp_absents: Arc<EntitySlice<TempAbsentRecord>>,
    pub stays: Arc<EntitySlice<StayRecord>>,
    pub id_cards: Arc<EntitySlice<IdCardRecord>>,
    pub stories: Arc<EntitySlice<StoryRecord>>,
    pub deaths: Arc<EntitySlice<DeathRecord>>,
}

/// Writes an empty selection as `{}`, the wire shape clients read before
/// anything is selected.
fn serialize_selection<T, S>(
    selection: &Arc<Option<T>>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    match selection.as_ref() {
        Some(record) => record.serialize(serializer),
        None => serializer.serialize_map(Some(0))?.end(),
    }
}

impl Default for AppState {
    fn default() -> Self {
        initial_state()
    }
}

/// Builds the initial state descriptor.
pub fn initial_state() -> AppState {
    AppState {
        error: Arc::new(None),
        loading: Arc::new(false),
        user: Arc::new(AuthSession::default()),
        users: Arc::default(),
        people: Arc::default(),
        person: Arc::new(None),
        family: Arc::new(None),
        temp_absents: Arc::default(),
        stays: Arc::default(),
        id_cards: Arc::default(),
        stories: Arc::default(),
        deaths: Arc::default(),
    }
}

impl AppState {
    /// Returns slices whose value is no longer shared with `previous`.
    ///
    /// Comparison is by pointer: a reducer that returned its input keeps the
    /// same allocation.
    pub fn changed_slices(&self, previous: &AppState) -> Vec<SliceKey> {
        SliceKey::ALL
            .into_iter()
            .filter(|key| !self.shares_slice(previous, *key))
            .collect()
    }

    fn shares_slice(&self, other: &AppState, key: SliceKey) -> bool {
        match key {
            SliceKey::Error => Arc::ptr_eq(&self.error, &other.error),
            SliceKey::Loading => Arc::ptr_eq(&self.loading, &other.loading),
            SliceKey::User => Arc::ptr_eq(&self.user, &other.user),
            SliceKey::Users => Arc::ptr_eq(&self.users, &other.users),
            SliceKey::People => Arc::ptr_eq(&self.people, &other.people),
            SliceKey::Person => Arc::ptr_eq(&self.person, &other.person),
            SliceKey::Family => Arc::ptr_eq(&self.family, &other.family),
            SliceKey::TempAbsents => Arc::ptr_eq(&self.temp_absents, &other.temp_absents),
            SliceKey::Stays => Arc::ptr_eq(&self.stays, &other.stays),
            SliceKey::IdCards => Arc::ptr_eq(&self.id_cards, &other.id_cards),
            SliceKey::Stories => Arc::ptr_eq(&self.stories, &other.stories),
            SliceKey::Deaths => Arc::ptr_eq(&self.deaths, &other.deaths),
        }
    }
}
