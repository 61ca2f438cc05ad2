//! Reducers for the `error` and `loading` slices.

use crate::action::{Action, AppAction};
use crate::model::record::ErrorDescriptor;
use std::sync::Arc;

pub fn error(
    state: &Arc<Option<ErrorDescriptor>>,
    action: &Action,
) -> Arc<Option<ErrorDescriptor>> {
    match action {
        Action::App(AppAction::Error(descriptor)) => Arc::new(Some(descriptor.clone())),
        Action::App(AppAction::Ok) => Arc::new(None),
        _ => Arc::clone(state),
    }
}

pub fn loading(state: &Arc<bool>, action: &Action) -> Arc<bool> {
    match action {
        Action::App(AppAction::Loading) => Arc::new(true),
        Action::App(AppAction::Loaded) => Arc::new(false),
        _ => Arc::clone(state),
    }
}

#[cfg(test)]
mod tests {
    use super::{error, loading};
    use crate::action::{Action, AppAction};
    use crate::model::record::ErrorDescriptor;
    use std::sync::Arc;

    #[test]
    fn error_is_set_and_cleared() {
        let initial = Arc::new(None);
        let failed = error(
            &initial,
            &Action::App(AppAction::Error(ErrorDescriptor::new("network down"))),
        );
        assert_eq!(
            failed.as_ref().as_ref().map(|d| d.message.as_str()),
            Some("network down")
        );

        let cleared = error(&failed, &Action::App(AppAction::Ok));
        assert!(cleared.is_none());
    }

    #[test]
    fn loading_follows_app_actions() {
        let initial = Arc::new(false);
        let busy = loading(&initial, &Action::App(AppAction::Loading));
        assert!(*busy);
        assert!(!*loading(&busy, &Action::App(AppAction::Loaded)));
        assert!(Arc::ptr_eq(&busy, &loading(&busy, &Action::App(AppAction::Ok))));
    }
}
