//! Client store: the single writer path into the state tree.
//!
//! # Responsibility
//! - Hold the current `AppState` for one client session.
//! - Apply dispatched actions through the root reducer.
//! - Notify subscribers whose projection changed.
//! - Drop async responses superseded by a newer request.
//!
//! # Invariants
//! - Dispatch runs to completion before returning; reducers never interleave.
//! - The previous root is replaced, never mutated.
//! - Nothing on the dispatch path panics; bad input is reported through
//!   `DispatchOutcome`.

pub mod sequence;

use crate::action::raw::{decode_action, ActionDecodeError};
use crate::action::types::ActionType;
use crate::action::Action;
use crate::reducer::{reduce, written_slices};
use crate::state::{initial_state, AppState, SliceKey};
use log::{debug, info, warn};
use sequence::{RequestSequencer, RequestTicket};
use serde_json::Value;
use std::time::Instant;
use uuid::Uuid;

/// Capability to dispatch actions, injected into view and effect code.
pub trait Dispatch {
    fn dispatch(&mut self, action: Action) -> DispatchOutcome;
}

/// Result of one dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Reducers ran; `changed` lists slices that got a new value.
    Applied {
        action_type: ActionType,
        changed: Vec<SliceKey>,
    },
    /// Raw action with an unregistered `type`; state untouched.
    Ignored,
    /// Raw action with a registered type but unusable payload; state untouched.
    Rejected(ActionDecodeError),
    /// Response for a request that a newer request superseded; state untouched.
    Stale(RequestTicket),
    /// Response action does not write the slice its ticket was issued for;
    /// state untouched.
    Misrouted {
        ticket: RequestTicket,
        action_type: ActionType,
    },
}

impl DispatchOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    /// Short status label used in logs and CLI output.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Applied { .. } => "applied",
            Self::Ignored => "ignored",
            Self::Rejected(_) => "rejected",
            Self::Stale(_) => "stale",
            Self::Misrouted { .. } => "misrouted",
        }
    }
}

/// Handle returned by `Store::subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Notify = Box<dyn FnMut(&AppState, &AppState)>;

struct Subscriber {
    id: SubscriptionId,
    notify: Notify,
}

/// State container for one client session.
pub struct Store {
    state: AppState,
    session_id: Uuid,
    subscribers: Vec<Subscriber>,
    next_subscription_id: u64,
    requests: RequestSequencer,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// Creates a store holding the initial state descriptor.
    pub fn new() -> Self {
        Self::with_state(initial_state())
    }

    /// Creates a store around an existing root, e.g. for tests.
    pub fn with_state(state: AppState) -> Self {
        let session_id = Uuid::new_v4();
        info!("event=store_init module=store status=ok session={session_id}");
        Self {
            state,
            session_id,
            subscribers: Vec::new(),
            next_subscription_id: 0,
            requests: RequestSequencer::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Decodes and dispatches one raw `{type, ...payload}` object.
    ///
    /// Unregistered types are ignored and malformed payloads are rejected;
    /// neither changes state.
    pub fn dispatch_raw(&mut self, raw: &Value) -> DispatchOutcome {
        match decode_action(raw) {
            Ok(Some(action)) => self.apply(&action),
            Ok(None) => {
                debug!(
                    "event=dispatch module=store status=ignored session={} reason=unregistered_type",
                    self.session_id
                );
                DispatchOutcome::Ignored
            }
            Err(err) => {
                warn!(
                    "event=dispatch module=store status=rejected session={} error={}",
                    self.session_id, err
                );
                DispatchOutcome::Rejected(err)
            }
        }
    }

    /// Starts tracking an async request whose result will land in `slice`.
    pub fn begin_request(&mut self, slice: SliceKey) -> RequestTicket {
        let ticket = self.requests.issue(slice);
        debug!(
            "event=request_begin module=store status=ok session={} slice={} seq={}",
            self.session_id, ticket.slice, ticket.sequence
        );
        ticket
    }

    /// Dispatches the resolved result of a tracked request.
    ///
    /// The action is dropped when it does not write `ticket.slice`, or when a
    /// newer request for the same slice was started after `ticket` was issued.
    pub fn dispatch_response(&mut self, ticket: RequestTicket, action: Action) -> DispatchOutcome {
        let action_type = action.action_type();
        if !written_slices(&action).contains(&ticket.slice) {
            warn!(
                "event=dispatch module=store status=misrouted session={} type={} slice={} seq={}",
                self.session_id, action_type, ticket.slice, ticket.sequence
            );
            return DispatchOutcome::Misrouted {
                ticket,
                action_type,
            };
        }
        if !self.requests.is_current(ticket) {
            info!(
                "event=dispatch module=store status=stale session={} type={} slice={} seq={}",
                self.session_id,
                action_type,
                ticket.slice,
                ticket.sequence
            );
            return DispatchOutcome::Stale(ticket);
        }
        self.apply(&action)
    }

    /// Registers a listener on a projection of the state.
    ///
    /// After each dispatch, `listener` runs only if `selector` yields a value
    /// different from the one it yielded before the dispatch.
    pub fn subscribe<P, S, F>(&mut self, selector: S, mut listener: F) -> SubscriptionId
    where
        P: PartialEq + 'static,
        S: Fn(&AppState) -> P + 'static,
        F: FnMut(&P) + 'static,
    {
        self.next_subscription_id += 1;
        let id = SubscriptionId(self.next_subscription_id);
        let notify: Notify = Box::new(move |previous, next| {
            let projected = selector(next);
            if selector(previous) != projected {
                listener(&projected);
            }
        });
        self.subscribers.push(Subscriber { id, notify });
        id
    }

    /// Removes a listener; returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|subscriber| subscriber.id != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Discards the session state (logout or reload).
    ///
    /// The root returns to the initial descriptor, in-flight requests become
    /// stale and a new session id is assigned. Subscribers stay registered and
    /// are notified of the reset.
    pub fn end_session(&mut self) {
        let previous_session = self.session_id;
        let previous = std::mem::replace(&mut self.state, initial_state());
        self.requests.reset();
        self.session_id = Uuid::new_v4();
        self.notify_subscribers(&previous);
        info!(
            "event=session_end module=store status=ok session={} next_session={}",
            previous_session, self.session_id
        );
    }

    fn apply(&mut self, action: &Action) -> DispatchOutcome {
        let started_at = Instant::now();
        let action_type = action.action_type();
        let next = reduce(&self.state, action);
        let changed = next.changed_slices(&self.state);
        let previous = std::mem::replace(&mut self.state, next);

        if !changed.is_empty() {
            self.notify_subscribers(&previous);
        }

        debug!(
            "event=dispatch module=store status=ok session={} type={} changed={} duration_us={}",
            self.session_id,
            action_type,
            join_keys(&changed),
            started_at.elapsed().as_micros()
        );
        DispatchOutcome::Applied {
            action_type,
            changed,
        }
    }

    fn notify_subscribers(&mut self, previous: &AppState) {
        for subscriber in &mut self.subscribers {
            (subscriber.notify)(previous, &self.state);
        }
    }
}

impl Dispatch for Store {
    fn dispatch(&mut self, action: Action) -> DispatchOutcome {
        self.apply(&action)
    }
}

fn join_keys(keys: &[SliceKey]) -> String {
    if keys.is_empty() {
        return "none".to_string();
    }
    keys.iter()
        .map(|key| key.as_str())
        .collect::<Vec<_>>()
        .join(",")
}
