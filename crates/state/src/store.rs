use roster_infra::PersistIntent;

use crate::favorites::{FavoritesAction, FavoritesState};
use crate::modal::{ModalAction, ModalState};
use crate::people::{PeopleAction, PeopleState};

/// Any mutation the store accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    People(PeopleAction),
    Favorites(FavoritesAction),
    Modal(ModalAction),
}

impl AppAction {
    pub fn action_type(&self) -> &'static str {
        match self {
            AppAction::People(a) => a.action_type(),
            AppAction::Favorites(a) => a.action_type(),
            AppAction::Modal(a) => a.action_type(),
        }
    }
}

impl From<PeopleAction> for AppAction {
    fn from(action: PeopleAction) -> Self {
        AppAction::People(action)
    }
}

impl From<FavoritesAction> for AppAction {
    fn from(action: FavoritesAction) -> Self {
        AppAction::Favorites(action)
    }
}

impl From<ModalAction> for AppAction {
    fn from(action: ModalAction) -> Self {
        AppAction::Modal(action)
    }
}

/// Application state: the people and favorites slices plus modal flags.
///
/// Mutations go through [`AppStore::dispatch`], which applies them in order and
/// hands back the storage write (if any) for the caller to schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppStore {
    people: PeopleState,
    favorites: FavoritesState,
    modals: ModalState,
}

impl AppStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn people(&self) -> &PeopleState {
        &self.people
    }

    pub fn favorites(&self) -> &FavoritesState {
        &self.favorites
    }

    pub fn modals(&self) -> &ModalState {
        &self.modals
    }

    pub fn modals_mut(&mut self) -> &mut ModalState {
        &mut self.modals
    }

    pub fn dispatch(&mut self, action: impl Into<AppAction>) -> Option<PersistIntent> {
        let action = action.into();
        let action_type = action.action_type();

        let intent = match action {
            AppAction::People(a) => self.people.apply(a),
            AppAction::Favorites(a) => self.favorites.apply(a),
            AppAction::Modal(a) => {
                self.modals.apply(a);
                None
            }
        };

        tracing::debug!(
            action_type,
            persist = intent.as_ref().map(|i| i.key().as_str()),
            "dispatched action"
        );
        intent
    }
}
