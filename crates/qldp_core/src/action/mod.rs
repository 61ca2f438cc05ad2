//! Typed actions dispatched into the store.
//!
//! # Responsibility
//! - Carry one state transition request with a payload whose shape is fixed
//!   by its registry type.
//! - Decode untyped `{type, ...payload}` objects at the UI boundary.
//!
//! # Invariants
//! - `Action::action_type()` always returns a registered type.
//! - Payloads hold already-resolved results; actions never trigger I/O.

pub mod raw;
pub mod types;

use crate::model::record::{
    DeathRecord, ErrorDescriptor, FamilyRecord, IdCardRecord, PersonRecord, RecordId,
    StayRecord, StoryRecord, TempAbsentRecord, UserRecord,
};
use crate::model::session::LoginSuccess;
use std::collections::BTreeMap;
use types::ActionType;

/// Collection payload keyed by backend id.
pub type Records<T> = BTreeMap<RecordId, T>;

#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    Error(ErrorDescriptor),
    Ok,
    Loaded,
    Loading,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthAction {
    LoginSuccess(LoginSuccess),
    LogoutSuccess,
    SendMailSuccess,
    ClearSent,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PeopleAction {
    Create { person: PersonRecord },
    Get { people: Records<PersonRecord> },
    GetById { person: PersonRecord },
    Update { person: PersonRecord },
}

#[derive(Debug, Clone, PartialEq)]
pub enum FamilyAction {
    AddPerson { family: FamilyRecord },
    Get { family: FamilyRecord },
}

/// Create/list pair shared by the record domains.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordAction<T> {
    Create(T),
    Get(Records<T>),
}

impl<T> RecordAction<T> {
    fn is_create(&self) -> bool {
        matches!(self, Self::Create(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    App(AppAction),
    Auth(AuthAction),
    Users(RecordAction<UserRecord>),
    People(PeopleAction),
    Family(FamilyAction),
    TempAbsents(RecordAction<TempAbsentRecord>),
    Stays(RecordAction<StayRecord>),
    IdCard(RecordAction<IdCardRecord>),
    Stories(RecordAction<StoryRecord>),
    Deaths(RecordAction<DeathRecord>),
}

impl Action {
    pub fn action_type(&self) -> ActionType {
        match self {
            Self::App(AppAction::Error(_)) => ActionType::AppError,
            Self::App(AppAction::Ok) => ActionType::AppOk,
            Self::App(AppAction::Loaded) => ActionType::AppLoaded,
            Self::App(AppAction::Loading) => ActionType::AppLoading,
            Self::Auth(AuthAction::LoginSuccess(_)) => ActionType::AuthLoginSuccess,
            Self::Auth(AuthAction::LogoutSuccess) => ActionType::AuthLogoutSuccess,
            Self::Auth(AuthAction::SendMailSuccess) => ActionType::AuthSendMailSuccess,
            Self::Auth(AuthAction::ClearSent) => ActionType::AuthClearSent,
            Self::People(PeopleAction::Create { .. }) => ActionType::PeopleCreate,
            Self::People(PeopleAction::Get { .. }) => ActionType::PeopleGet,
            Self::People(PeopleAction::GetById { .. }) => ActionType::PeopleGetById,
            Self::People(PeopleAction::Update { .. }) => ActionType::PeopleUpdate,
            Self::Family(FamilyAction::AddPerson { .. }) => ActionType::FamilyAddPerson,
            Self::Family(FamilyAction::Get { .. }) => ActionType::FamilyGet,
            Self::Users(action) => pick(action, ActionType::UsersCreate, ActionType::UsersGet),
            Self::TempAbsents(action) => pick(
                action,
                ActionType::TempAbsentsCreate,
                ActionType::TempAbsentsGet,
            ),
            Self::Stays(action) => pick(action, ActionType::StaysCreate, ActionType::StaysGet),
            Self::IdCard(action) => pick(action, ActionType::IdCardCreate, ActionType::IdCardGet),
            Self::Stories(action) => {
                pick(action, ActionType::StoriesCreate, ActionType::StoriesGet)
            }
            Self::Deaths(action) => pick(action, ActionType::DeathsCreate, ActionType::DeathsGet),
        }
    }

    pub fn people_get(people: impl IntoIterator<Item = (RecordId, PersonRecord)>) -> Self {
        Self::People(PeopleAction::Get {
            people: people.into_iter().collect(),
        })
    }

    pub fn people_create(person: PersonRecord) -> Self {
        Self::People(PeopleAction::Create { person })
    }

    pub fn login(login: LoginSuccess) -> Self {
        Self::Auth(AuthAction::LoginSuccess(login))
    }

    pub fn logout() -> Self {
        Self::Auth(AuthAction::LogoutSuccess)
    }
}

fn pick<T>(action: &RecordAction<T>, create: ActionType, get: ActionType) -> ActionType {
    if action.is_create() {
        create
    } else {
        get
    }
}
