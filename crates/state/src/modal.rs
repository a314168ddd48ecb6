//! Modal visibility.
//!
//! Plain shared flags with getters and setters; the owner reads them when
//! rendering and flips them from handlers.

use roster_people::Person;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalAction {
    OpenFavorites,
    CloseFavorites,
    /// Open the person form, pre-filled when editing.
    OpenPersonForm(Option<Person>),
    ClosePersonForm,
}

impl ModalAction {
    pub fn action_type(&self) -> &'static str {
        match self {
            ModalAction::OpenFavorites => "modal.open_favorites",
            ModalAction::CloseFavorites => "modal.close_favorites",
            ModalAction::OpenPersonForm(_) => "modal.open_person_form",
            ModalAction::ClosePersonForm => "modal.close_person_form",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModalState {
    favorites_open: bool,
    person_form_open: bool,
    editing: Option<Person>,
}

impl ModalState {
    pub fn favorites_open(&self) -> bool {
        self.favorites_open
    }

    pub fn set_favorites_open(&mut self, open: bool) {
        self.favorites_open = open;
    }

    pub fn person_form_open(&self) -> bool {
        self.person_form_open
    }

    /// Person being edited in the form; `None` means the form creates a new one.
    pub fn editing(&self) -> Option<&Person> {
        self.editing.as_ref()
    }

    pub fn open_person_form(&mut self, editing: Option<Person>) {
        self.person_form_open = true;
        self.editing = editing;
    }

    pub fn close_person_form(&mut self) {
        self.person_form_open = false;
        self.editing = None;
    }

    pub fn apply(&mut self, action: ModalAction) {
        match action {
            ModalAction::OpenFavorites => self.set_favorites_open(true),
            ModalAction::CloseFavorites => self.set_favorites_open(false),
            ModalAction::OpenPersonForm(editing) => self.open_person_form(editing),
            ModalAction::ClosePersonForm => self.close_person_form(),
        }
    }
}
