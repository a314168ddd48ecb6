use roster_core::position_of;
use roster_infra::{PersistIntent, StorageKey};
use roster_people::{FiltersPatch, PeopleFilters, Person, PersonId};

/// People slice mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeopleAction {
    SetPeople(Vec<Person>),
    AddPerson(Person),
    /// Replace the person with the same id; ignored when there is none.
    UpdatePerson(Person),
    DeletePerson(PersonId),
    SetSelectedPerson(Option<Person>),
    SetFilters(FiltersPatch),
    ClearFilters,
    SetLoading(bool),
    SetError(String),
    ClearPeople,
}

impl PeopleAction {
    pub fn action_type(&self) -> &'static str {
        match self {
            PeopleAction::SetPeople(_) => "people.set_people",
            PeopleAction::AddPerson(_) => "people.add_person",
            PeopleAction::UpdatePerson(_) => "people.update_person",
            PeopleAction::DeletePerson(_) => "people.delete_person",
            PeopleAction::SetSelectedPerson(_) => "people.set_selected_person",
            PeopleAction::SetFilters(_) => "people.set_filters",
            PeopleAction::ClearFilters => "people.clear_filters",
            PeopleAction::SetLoading(_) => "people.set_loading",
            PeopleAction::SetError(_) => "people.set_error",
            PeopleAction::ClearPeople => "people.clear_people",
        }
    }
}

/// People collection, active filters and the derived filtered view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PeopleState {
    people: Vec<Person>,
    filtered_people: Vec<Person>,
    filters: PeopleFilters,
    loading: bool,
    error: Option<String>,
    selected_person: Option<Person>,
}

impl PeopleState {
    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn filtered_people(&self) -> &[Person] {
        &self.filtered_people
    }

    pub fn filters(&self) -> &PeopleFilters {
        &self.filters
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn selected_person(&self) -> Option<&Person> {
        self.selected_person.as_ref()
    }

    pub fn get(&self, id: &PersonId) -> Option<&Person> {
        position_of(&self.people, id).map(|idx| &self.people[idx])
    }

    /// Apply one mutation. Returns the write needed to mirror the collection.
    pub fn apply(&mut self, action: PeopleAction) -> Option<PersistIntent> {
        match action {
            PeopleAction::SetPeople(people) => {
                self.people = people;
                self.refilter();
                self.loading = false;
                self.error = None;
                Some(self.persist())
            }
            PeopleAction::AddPerson(person) => {
                self.people.push(person);
                self.refilter();
                Some(self.persist())
            }
            PeopleAction::UpdatePerson(person) => {
                let idx = position_of(&self.people, &person.id)?;
                self.people[idx] = person;
                self.refilter();
                Some(self.persist())
            }
            PeopleAction::DeletePerson(id) => {
                self.people.retain(|p| p.id != id);
                self.refilter();
                Some(self.persist())
            }
            PeopleAction::SetSelectedPerson(person) => {
                self.selected_person = person;
                None
            }
            PeopleAction::SetFilters(patch) => {
                self.filters.merge(patch);
                self.refilter();
                None
            }
            PeopleAction::ClearFilters => {
                // The view is reset to the raw collection, not re-run through the
                // (now default) predicate.
                self.filters = PeopleFilters::default();
                self.filtered_people = self.people.clone();
                None
            }
            PeopleAction::SetLoading(loading) => {
                self.loading = loading;
                None
            }
            PeopleAction::SetError(error) => {
                self.error = Some(error);
                self.loading = false;
                None
            }
            PeopleAction::ClearPeople => {
                self.people.clear();
                self.filtered_people.clear();
                self.loading = false;
                self.error = None;
                None
            }
        }
    }

    fn refilter(&mut self) {
        self.filtered_people = self.filters.apply(&self.people);
    }

    fn persist(&self) -> PersistIntent {
        PersistIntent::save(StorageKey::People, &self.people)
    }
}
