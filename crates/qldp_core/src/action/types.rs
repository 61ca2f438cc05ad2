//! Action type registry.
//!
//! # Responsibility
//! - Name every state transition the client can dispatch.
//! - Map registry strings to typed identifiers and back.
//!
//! # Invariants
//! - Every constant is unique across the whole registry.
//! - Constants are namespaced `qldp/<domain>/<operation>`; `stories.GET`
//!   keeps its historical leading slash for wire compatibility.

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const APP_ERROR: &str = "qldp/app/error";
pub const APP_OK: &str = "qldp/app/ok";
pub const APP_LOADED: &str = "qldp/app/loaded";
pub const APP_LOADING: &str = "qldp/app/loading";

pub const AUTH_LOGIN_SUCCESS: &str = "qldp/auth/login/success";
pub const AUTH_LOGOUT_SUCCESS: &str = "qldp/auth/logout/success";
pub const AUTH_SEND_MAIL_SUCCESS: &str = "qldp/auth/sendMail/success";
pub const AUTH_CLEAR_SENT: &str = "qldp/auth/sendMail/clear";

pub const USERS_CREATE: &str = "qldp/users/create";
pub const USERS_GET: &str = "qldp/users/get";

pub const PEOPLE_CREATE: &str = "qldp/people/create";
pub const PEOPLE_GET: &str = "qldp/people/get";
pub const PEOPLE_GET_BY_ID: &str = "qldp/people/getById";
pub const PEOPLE_UPDATE: &str = "qldp/people/update";

pub const FAMILY_ADD_PERSON: &str = "qldp/family/addPerson";
pub const FAMILY_GET: &str = "qldp/family/get";

pub const TEMP_ABSENTS_CREATE: &str = "qldp/tempAbsents/create";
pub const TEMP_ABSENTS_GET: &str = "qldp/tempAbsents/get";

pub const STAYS_CREATE: &str = "qldp/stays/create";
pub const STAYS_GET: &str = "qldp/stays/get";

pub const ID_CARD_CREATE: &str = "qldp/idCard/create";
pub const ID_CARD_GET: &str = "qldp/idCard/get";

pub const STORIES_CREATE: &str = "qldp/stories/create";
pub const STORIES_GET: &str = "/qldp/stories/get";

pub const DEATHS_CREATE: &str = "qldp/deaths/create";
pub const DEATHS_GET: &str = "qldp/deaths/get";

/// Domain grouping of the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActionDomain {
    App,
    Auth,
    Users,
    People,
    Family,
    TempAbsents,
    Stays,
    IdCard,
    Stories,
    Deaths,
}

impl ActionDomain {
    pub const ALL: [ActionDomain; 10] = [
        Self::App,
        Self::Auth,
        Self::Users,
        Self::People,
        Self::Family,
        Self::TempAbsents,
        Self::Stays,
        Self::IdCard,
        Self::Stories,
        Self::Deaths,
    ];

    /// Domain key as it appears in the registry mapping.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::App => "app",
            Self::Auth => "auth",
            Self::Users => "users",
            Self::People => "people",
            Self::Family => "family",
            Self::TempAbsents => "tempAbsents",
            Self::Stays => "stays",
            Self::IdCard => "idCard",
            Self::Stories => "stories",
            Self::Deaths => "deaths",
        }
    }

    /// Action types registered under this domain, in declaration order.
    pub fn action_types(self) -> impl Iterator<Item = ActionType> {
        ActionType::ALL
            .into_iter()
            .filter(move |action_type| action_type.domain() == self)
    }
}

impl Display for ActionDomain {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed identifier for one registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActionType {
    AppError,
    AppOk,
    AppLoaded,
    AppLoading,
    AuthLoginSuccess,
    AuthLogoutSuccess,
    AuthSendMailSuccess,
    AuthClearSent,
    UsersCreate,
    UsersGet,
    PeopleCreate,
    PeopleGet,
    PeopleGetById,
    PeopleUpdate,
    FamilyAddPerson,
    FamilyGet,
    TempAbsentsCreate,
    TempAbsentsGet,
    StaysCreate,
    StaysGet,
    IdCardCreate,
    IdCardGet,
    StoriesCreate,
    StoriesGet,
    DeathsCreate,
    DeathsGet,
}

impl ActionType {
    pub const ALL: [ActionType; 26] = [
        Self::AppError,
        Self::AppOk,
        Self::AppLoaded,
        Self::AppLoading,
        Self::AuthLoginSuccess,
        Self::AuthLogoutSuccess,
        Self::AuthSendMailSuccess,
        Self::AuthClearSent,
        Self::UsersCreate,
        Self::UsersGet,
        Self::PeopleCreate,
        Self::PeopleGet,
        Self::PeopleGetById,
        Self::PeopleUpdate,
        Self::FamilyAddPerson,
        Self::FamilyGet,
        Self::TempAbsentsCreate,
        Self::TempAbsentsGet,
        Self::StaysCreate,
        Self::StaysGet,
        Self::IdCardCreate,
        Self::IdCardGet,
        Self::StoriesCreate,
        Self::StoriesGet,
        Self::DeathsCreate,
        Self::DeathsGet,
    ];

    /// Registry string carried in the `type` field of a dispatched action.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AppError => APP_ERROR,
            Self::AppOk => APP_OK,
            Self::AppLoaded => APP_LOADED,
            Self::AppLoading => APP_LOADING,
            Self::AuthLoginSuccess => AUTH_LOGIN_SUCCESS,
            Self::AuthLogoutSuccess => AUTH_LOGOUT_SUCCESS,
            Self::AuthSendMailSuccess => AUTH_SEND_MAIL_SUCCESS,
            Self::AuthClearSent => AUTH_CLEAR_SENT,
            Self::UsersCreate => USERS_CREATE,
            Self::UsersGet => USERS_GET,
            Self::PeopleCreate => PEOPLE_CREATE,
            Self::PeopleGet => PEOPLE_GET,
            Self::PeopleGetById => PEOPLE_GET_BY_ID,
            Self::PeopleUpdate => PEOPLE_UPDATE,
            Self::FamilyAddPerson => FAMILY_ADD_PERSON,
            Self::FamilyGet => FAMILY_GET,
            Self::TempAbsentsCreate => TEMP_ABSENTS_CREATE,
            Self::TempAbsentsGet => TEMP_ABSENTS_GET,
            Self::StaysCreate => STAYS_CREATE,
            Self::StaysGet => STAYS_GET,
            Self::IdCardCreate => ID_CARD_CREATE,
            Self::IdCardGet => ID_CARD_GET,
            Self::StoriesCreate => STORIES_CREATE,
            Self::StoriesGet => STORIES_GET,
            Self::DeathsCreate => DEATHS_CREATE,
            Self::DeathsGet => DEATHS_GET,
        }
    }

    pub fn domain(self) -> ActionDomain {
        match self {
            Self::AppError | Self::AppOk | Self::AppLoaded | Self::AppLoading => ActionDomain::App,
            Self::AuthLoginSuccess
            | Self::AuthLogoutSuccess
            | Self::AuthSendMailSuccess
            | Self::AuthClearSent => ActionDomain::Auth,
            Self::UsersCreate | Self::UsersGet => ActionDomain::Users,
            Self::PeopleCreate | Self::PeopleGet | Self::PeopleGetById | Self::PeopleUpdate => {
                ActionDomain::People
            }
            Self::FamilyAddPerson | Self::FamilyGet => ActionDomain::Family,
            Self::TempAbsentsCreate | Self::TempAbsentsGet => ActionDomain::TempAbsents,
            Self::StaysCreate | Self::StaysGet => ActionDomain::Stays,
            Self::IdCardCreate | Self::IdCardGet => ActionDomain::IdCard,
            Self::StoriesCreate | Self::StoriesGet => ActionDomain::Stories,
            Self::DeathsCreate | Self::DeathsGet => ActionDomain::Deaths,
        }
    }

    /// Operation key inside the domain mapping (`CREATE`, `GET_BY_ID`, ...).
    pub fn operation(self) -> &'static str {
        match self {
            Self::AppError => "ERROR",
            Self::AppOk => "OK",
            Self::AppLoaded => "LOADED",
            Self::AppLoading => "LOADING",
            Self::AuthLoginSuccess => "LOGIN_SUCCESS",
            Self::AuthLogoutSuccess => "LOGOUT_SUCCESS",
            Self::AuthSendMailSuccess => "SEND_MAIL_SUCCESS",
            Self::AuthClearSent => "CLEAR_SENT",
            Self::FamilyAddPerson => "ADD_PERSON",
            Self::PeopleGetById => "GET_BY_ID",
            Self::PeopleUpdate => "UPDATE",
            Self::UsersCreate
            | Self::PeopleCreate
            | Self::TempAbsentsCreate
            | Self::StaysCreate
            | Self::IdCardCreate
            | Self::StoriesCreate
            | Self::DeathsCreate => "CREATE",
            Self::UsersGet
            | Self::PeopleGet
            | Self::FamilyGet
            | Self::TempAbsentsGet
            | Self::StaysGet
            | Self::IdCardGet
            | Self::StoriesGet
            | Self::DeathsGet => "GET",
        }
    }
}

impl Display for ActionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses one registry string into its typed identifier.
///
/// Matching is byte-exact: registry strings are case-sensitive and padded
/// values such as `" qldp/people/get"` are unrecognized.
pub fn parse_action_type(value: &str) -> Result<ActionType, ActionTypeError> {
    if value.trim().is_empty() {
        return Err(ActionTypeError::EmptyType);
    }

    ActionType::ALL
        .into_iter()
        .find(|action_type| action_type.as_str() == value)
        .ok_or_else(|| ActionTypeError::UnrecognizedType(value.to_string()))
}

/// Returns the registry as `domain -> operation -> constant`.
pub fn registry() -> BTreeMap<&'static str, BTreeMap<&'static str, &'static str>> {
    let mut table = BTreeMap::<&'static str, BTreeMap<&'static str, &'static str>>::new();
    for action_type in ActionType::ALL {
        table
            .entry(action_type.domain().as_str())
            .or_default()
            .insert(action_type.operation(), action_type.as_str());
    }
    table
}

/// Action type parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionTypeError {
    EmptyType,
    UnrecognizedType(String),
}

impl Display for ActionTypeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyType => write!(f, "action type must not be empty"),
            Self::UnrecognizedType(value) => write!(f, "action type is not registered: {value}"),
        }
    }
}

impl Error for ActionTypeError {}
