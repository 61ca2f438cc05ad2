//! Reducers for the `people` and `person` slices.
//!
//! `people` keeps the historical overwrite-on-create behaviour: `CREATE`
//! replaces the listing with the created record. Callers refresh the listing
//! with a `GET` afterwards.

use crate::action::{Action, PeopleAction};
use crate::model::record::PersonRecord;
use crate::state::slice::EntitySlice;
use std::sync::Arc;

pub fn people(
    state: &Arc<EntitySlice<PersonRecord>>,
    action: &Action,
) -> Arc<EntitySlice<PersonRecord>> {
    match action {
        Action::People(PeopleAction::Get { people }) => {
            Arc::new(EntitySlice::Collection(people.clone()))
        }
        Action::People(PeopleAction::Create { person }) => {
            Arc::new(EntitySlice::Single(person.clone()))
        }
        _ => Arc::clone(state),
    }
}

pub fn person(state: &Arc<Option<PersonRecord>>, action: &Action) -> Arc<Option<PersonRecord>> {
    match action {
        Action::People(PeopleAction::GetById { person } | PeopleAction::Update { person }) => {
            Arc::new(Some(person.clone()))
        }
        _ => Arc::clone(state),
    }
}

#[cfg(test)]
mod tests {
    use super::{people, person};
    use crate::action::{Action, PeopleAction};
    use crate::model::record::PersonRecord;
    use crate::state::slice::EntitySlice;
    use std::sync::Arc;

    #[test]
    fn get_replaces_listing() {
        let initial = Arc::new(EntitySlice::default());
        let next = people(
            &initial,
            &Action::people_get([(1, PersonRecord::new(1, "A")), (2, PersonRecord::new(2, "B"))]),
        );
        assert_eq!(next.as_collection().map(|records| records.len()), Some(2));
    }

    #[test]
    fn create_overwrites_listing_with_single_record() {
        let listing = people(
            &Arc::new(EntitySlice::default()),
            &Action::people_get([(1, PersonRecord::new(1, "A"))]),
        );
        let created = people(&listing, &Action::people_create(PersonRecord::new(2, "X")));
        assert_eq!(*created, EntitySlice::Single(PersonRecord::new(2, "X")));
    }

    #[test]
    fn get_by_id_selects_person_without_touching_listing() {
        let listing = Arc::new(EntitySlice::default());
        let action = Action::People(PeopleAction::GetById {
            person: PersonRecord::new(5, "E"),
        });

        assert!(Arc::ptr_eq(&listing, &people(&listing, &action)));
        let selected = person(&Arc::new(None), &action);
        assert_eq!(selected.as_ref().as_ref().and_then(|p| p.id), Some(5));
    }
}
