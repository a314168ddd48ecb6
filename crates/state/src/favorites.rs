use roster_core::position_of;
use roster_infra::{PersistIntent, StorageKey};
use roster_people::{Person, PersonId};

/// Favorites slice mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoritesAction {
    /// Add unless a favorite with the same id exists.
    AddFavorite(Person),
    RemoveFavorite(PersonId),
    SetFavorites(Vec<Person>),
    /// Remove if present (by id), otherwise add.
    ToggleFavorite(Person),
    SetLoading(bool),
    SetError(String),
    ClearFavorites,
}

impl FavoritesAction {
    pub fn action_type(&self) -> &'static str {
        match self {
            FavoritesAction::AddFavorite(_) => "favorites.add_favorite",
            FavoritesAction::RemoveFavorite(_) => "favorites.remove_favorite",
            FavoritesAction::SetFavorites(_) => "favorites.set_favorites",
            FavoritesAction::ToggleFavorite(_) => "favorites.toggle_favorite",
            FavoritesAction::SetLoading(_) => "favorites.set_loading",
            FavoritesAction::SetError(_) => "favorites.set_error",
            FavoritesAction::ClearFavorites => "favorites.clear_favorites",
        }
    }
}

/// Favorited people.
///
/// Entries are snapshots taken when the person was favorited. Later edits or
/// deletion of that person in the people slice are not reflected here.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FavoritesState {
    favorites: Vec<Person>,
    loading: bool,
    error: Option<String>,
}

impl FavoritesState {
    pub fn favorites(&self) -> &[Person] {
        &self.favorites
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_favorite(&self, id: &PersonId) -> bool {
        position_of(&self.favorites, id).is_some()
    }

    /// Apply one mutation. Returns the write needed to mirror the collection.
    pub fn apply(&mut self, action: FavoritesAction) -> Option<PersistIntent> {
        match action {
            FavoritesAction::AddFavorite(person) => {
                if self.is_favorite(&person.id) {
                    return None;
                }
                self.favorites.push(person);
                Some(self.persist())
            }
            FavoritesAction::RemoveFavorite(id) => {
                self.favorites.retain(|p| p.id != id);
                Some(self.persist())
            }
            FavoritesAction::SetFavorites(favorites) => {
                self.favorites = favorites;
                self.loading = false;
                self.error = None;
                Some(self.persist())
            }
            FavoritesAction::ToggleFavorite(person) => {
                match position_of(&self.favorites, &person.id) {
                    Some(idx) => {
                        self.favorites.remove(idx);
                    }
                    None => self.favorites.push(person),
                }
                Some(self.persist())
            }
            FavoritesAction::SetLoading(loading) => {
                self.loading = loading;
                None
            }
            FavoritesAction::SetError(error) => {
                self.error = Some(error);
                self.loading = false;
                None
            }
            FavoritesAction::ClearFavorites => {
                self.favorites.clear();
                self.loading = false;
                self.error = None;
                Some(PersistIntent::remove(StorageKey::Favorites))
            }
        }
    }

    fn persist(&self) -> PersistIntent {
        PersistIntent::save(StorageKey::Favorites, &self.favorites)
    }
}
