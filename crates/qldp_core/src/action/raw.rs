//! Decoding of untyped `{type, ...payload}` actions.
//!
//! # Responsibility
//! - Turn JSON objects produced by view code into typed `Action`s.
//! - Name the payload field each registry type reads.
//!
//! # Invariants
//! - Unregistered `type` strings decode to `Ok(None)` (no-op), never an error.
//! - A registered type with a missing or undecodable payload is an error;
//!   callers reject it instead of writing absent values into state.

use super::types::{parse_action_type, ActionType};
use super::{Action, AppAction, AuthAction, FamilyAction, PeopleAction, RecordAction};
use crate::model::record::ErrorDescriptor;
use crate::model::session::{parse_role, LoginSuccess};
use log::warn;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

const TYPE_FIELD: &str = "type";

/// Raw action decode errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionDecodeError {
    NotAnObject,
    MissingType,
    TypeNotString,
    MissingPayload {
        action_type: ActionType,
        field: &'static str,
    },
    InvalidPayload {
        action_type: ActionType,
        field: &'static str,
        message: String,
    },
}

impl Display for ActionDecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAnObject => write!(f, "action must be a JSON object"),
            Self::MissingType => write!(f, "action is missing `type`"),
            Self::TypeNotString => write!(f, "action `type` must be a string"),
            Self::MissingPayload { action_type, field } => {
                write!(f, "action {action_type} is missing payload field `{field}`")
            }
            Self::InvalidPayload {
                action_type,
                field,
                message,
            } => write!(
                f,
                "action {action_type} has invalid payload field `{field}`: {message}"
            ),
        }
    }
}

impl Error for ActionDecodeError {}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorPayload {
    Message(String),
    Descriptor(ErrorDescriptor),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginPayload {
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    roles: Vec<String>,
}

/// Payload field read by each registry type, if any.
pub fn payload_field(action_type: ActionType) -> Option<&'static str> {
    match action_type {
        ActionType::AppError => Some("error"),
        ActionType::AuthLoginSuccess => Some("user"),
        ActionType::AppOk
        | ActionType::AppLoaded
        | ActionType::AppLoading
        | ActionType::AuthLogoutSuccess
        | ActionType::AuthSendMailSuccess
        | ActionType::AuthClearSent => None,
        ActionType::UsersCreate => Some("user"),
        ActionType::UsersGet => Some("users"),
        ActionType::PeopleGet => Some("people"),
        ActionType::PeopleCreate | ActionType::PeopleGetById | ActionType::PeopleUpdate => {
            Some("person")
        }
        ActionType::FamilyAddPerson | ActionType::FamilyGet => Some("family"),
        ActionType::TempAbsentsCreate => Some("tempAbsent"),
        ActionType::TempAbsentsGet => Some("tempAbsents"),
        ActionType::StaysCreate => Some("stay"),
        ActionType::StaysGet => Some("stays"),
        ActionType::IdCardCreate => Some("idCard"),
        ActionType::IdCardGet => Some("idCards"),
        ActionType::StoriesCreate => Some("story"),
        ActionType::StoriesGet => Some("stories"),
        ActionType::DeathsCreate => Some("death"),
        ActionType::DeathsGet => Some("deaths"),
    }
}

/// Decodes one raw action object.
///
/// Returns `Ok(None)` when `type` is not a registered action type.
///
/// # Errors
/// - The value is not an object, or has no string `type`.
/// - A registered type is missing its payload field or it fails to decode.
pub fn decode_action(raw: &Value) -> Result<Option<Action>, ActionDecodeError> {
    let object = raw.as_object().ok_or(ActionDecodeError::NotAnObject)?;
    let type_name = object
        .get(TYPE_FIELD)
        .ok_or(ActionDecodeError::MissingType)?
        .as_str()
        .ok_or(ActionDecodeError::TypeNotString)?;

    let Ok(action_type) = parse_action_type(type_name) else {
        return Ok(None);
    };

    let action = match action_type {
        ActionType::AppError => {
            let descriptor = match payload::<ErrorPayload>(object, action_type)? {
                ErrorPayload::Message(message) => ErrorDescriptor::new(message),
                ErrorPayload::Descriptor(descriptor) => descriptor,
            };
            Action::App(AppAction::Error(descriptor))
        }
        ActionType::AppOk => Action::App(AppAction::Ok),
        ActionType::AppLoaded => Action::App(AppAction::Loaded),
        ActionType::AppLoading => Action::App(AppAction::Loading),
        ActionType::AuthLoginSuccess => {
            let login = payload::<LoginPayload>(object, action_type)?;
            Action::Auth(AuthAction::LoginSuccess(into_login(login)))
        }
        ActionType::AuthLogoutSuccess => Action::Auth(AuthAction::LogoutSuccess),
        ActionType::AuthSendMailSuccess => Action::Auth(AuthAction::SendMailSuccess),
        ActionType::AuthClearSent => Action::Auth(AuthAction::ClearSent),
        ActionType::UsersCreate => {
            Action::Users(RecordAction::Create(payload(object, action_type)?))
        }
        ActionType::UsersGet => Action::Users(RecordAction::Get(payload(object, action_type)?)),
        ActionType::PeopleCreate => Action::People(PeopleAction::Create {
            person: payload(object, action_type)?,
        }),
        ActionType::PeopleGet => Action::People(PeopleAction::Get {
            people: payload(object, action_type)?,
        }),
        ActionType::PeopleGetById => Action::People(PeopleAction::GetById {
            person: payload(object, action_type)?,
        }),
        ActionType::PeopleUpdate => Action::People(PeopleAction::Update {
            person: payload(object, action_type)?,
        }),
        ActionType::FamilyAddPerson => Action::Family(FamilyAction::AddPerson {
            family: payload(object, action_type)?,
        }),
        ActionType::FamilyGet => Action::Family(FamilyAction::Get {
            family: payload(object, action_type)?,
        }),
        ActionType::TempAbsentsCreate => {
            Action::TempAbsents(RecordAction::Create(payload(object, action_type)?))
        }
        ActionType::TempAbsentsGet => {
            Action::TempAbsents(RecordAction::Get(payload(object, action_type)?))
        }
        ActionType::StaysCreate => {
            Action::Stays(RecordAction::Create(payload(object, action_type)?))
        }
        ActionType::StaysGet => Action::Stays(RecordAction::Get(payload(object, action_type)?)),
        ActionType::IdCardCreate => {
            Action::IdCard(RecordAction::Create(payload(object, action_type)?))
        }
        ActionType::IdCardGet => Action::IdCard(RecordAction::Get(payload(object, action_type)?)),
        ActionType::StoriesCreate => {
            Action::Stories(RecordAction::Create(payload(object, action_type)?))
        }
        ActionType::StoriesGet => Action::Stories(RecordAction::Get(payload(object, action_type)?)),
        ActionType::DeathsCreate => {
            Action::Deaths(RecordAction::Create(payload(object, action_type)?))
        }
        ActionType::DeathsGet => Action::Deaths(RecordAction::Get(payload(object, action_type)?)),
    };

    Ok(Some(action))
}

fn payload<T: DeserializeOwned>(
    object: &Map<String, Value>,
    action_type: ActionType,
) -> Result<T, ActionDecodeError> {
    // Payload-less types never reach here.
    let field = payload_field(action_type).unwrap_or(TYPE_FIELD);
    let value = object
        .get(field)
        .ok_or(ActionDecodeError::MissingPayload { action_type, field })?;
    T::deserialize(value).map_err(|err| ActionDecodeError::InvalidPayload {
        action_type,
        field,
        message: err.to_string(),
    })
}

fn into_login(payload: LoginPayload) -> LoginSuccess {
    let mut roles = BTreeSet::new();
    for raw_role in &payload.roles {
        match parse_role(raw_role) {
            Ok(role) => {
                roles.insert(role);
            }
            Err(err) => {
                warn!(
                    "event=action_decode module=action status=warn type=login role_dropped=true error={err}"
                );
            }
        }
    }

    LoginSuccess {
        username: payload.username,
        email: payload.email,
        token: payload.token,
        expires_in: payload.expires_in,
        roles,
    }
}
