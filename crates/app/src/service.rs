//! People workflows: repository call first, then the matching store mutation.

use std::sync::Arc;

use roster_core::DomainError;
use roster_infra::storage::load_json;
use roster_infra::{KeyValueStore, PersonRepository, StorageKey, WriteBehind};
use roster_people::{FiltersPatch, Person, PersonDraft, PersonDto, PersonId, PersonMapper, PersonPatch};
use roster_state::{AppAction, AppStore, FavoritesAction, PeopleAction};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Owns the repository, the state store and the write-behind worker.
///
/// Methods take `&mut self`, so mutations never interleave. Store writes are
/// queued on the worker; call [`PeopleService::flush`] to wait for them.
pub struct PeopleService<R> {
    repository: R,
    store: AppStore,
    storage: Arc<dyn KeyValueStore>,
    writer: WriteBehind,
}

impl<R> PeopleService<R>
where
    R: PersonRepository,
{
    pub fn new(repository: R, storage: Arc<dyn KeyValueStore>) -> Self {
        let writer = WriteBehind::spawn(storage.clone());
        Self {
            repository,
            store: AppStore::new(),
            storage,
            writer,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn state(&self) -> &AppStore {
        &self.store
    }

    /// Apply `action` and queue whatever write it produces.
    pub fn dispatch(&mut self, action: impl Into<AppAction>) {
        if let Some(intent) = self.store.dispatch(action) {
            self.writer.enqueue(intent);
        }
    }

    pub fn load_people(&mut self) {
        self.dispatch(PeopleAction::SetLoading(true));
        let people = self.repository.get_all();
        self.dispatch(PeopleAction::SetPeople(people));
    }

    /// Restore favorites from storage. Anything but a stored array leaves the
    /// slice as it is.
    pub async fn load_favorites(&mut self) {
        self.dispatch(FavoritesAction::SetLoading(true));

        match load_json::<Vec<PersonDto>, _>(self.storage.as_ref(), StorageKey::Favorites).await {
            Ok(Some(stored)) => {
                tracing::info!(count = stored.len(), "loaded favorites");
                self.dispatch(FavoritesAction::SetFavorites(PersonMapper::to_domain_list(stored)));
            }
            Ok(None) => self.dispatch(FavoritesAction::SetLoading(false)),
            Err(err) => {
                tracing::warn!("failed to load favorites: {err}");
                self.dispatch(FavoritesAction::SetLoading(false));
            }
        }
    }

    pub async fn create_person(&mut self, draft: PersonDraft) -> ServiceResult<Person> {
        let draft = draft.validated().inspect_err(|err| {
            tracing::warn!("rejected person draft: {err}");
        })?;

        let person = self.repository.create(draft).await;
        tracing::info!(id = %person.id, "person created");
        self.dispatch(PeopleAction::AddPerson(person.clone()));
        Ok(person)
    }

    pub async fn update_person(&mut self, id: &PersonId, patch: PersonPatch) -> ServiceResult<Person> {
        let patch = patch.validated().inspect_err(|err| {
            tracing::warn!(%id, "rejected person update: {err}");
        })?;

        let person = self
            .repository
            .update(id, patch)
            .await
            .inspect_err(|err| tracing::warn!(%id, "update failed: {err}"))?;

        self.dispatch(PeopleAction::UpdatePerson(person.clone()));
        Ok(person)
    }

    /// Returns whether a person was removed.
    pub async fn delete_person(&mut self, id: &PersonId) -> bool {
        let removed = self.repository.delete(id).await;
        if removed {
            self.dispatch(PeopleAction::DeletePerson(id.clone()));
        } else {
            tracing::debug!(%id, "delete of unknown person ignored");
        }
        removed
    }

    /// Toggle the current snapshot of person `id`. Returns whether it is now a
    /// favorite.
    pub fn toggle_favorite(&mut self, id: &PersonId) -> ServiceResult<bool> {
        let person = self
            .store
            .people()
            .get(id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("Person", id))?;

        self.dispatch(FavoritesAction::ToggleFavorite(person));
        Ok(self.store.favorites().is_favorite(id))
    }

    /// Drop the favorite with `id`, whether or not the person still exists.
    pub fn remove_favorite(&mut self, id: &PersonId) {
        self.dispatch(FavoritesAction::RemoveFavorite(id.clone()));
    }

    pub fn set_filters(&mut self, patch: FiltersPatch) {
        self.dispatch(PeopleAction::SetFilters(patch));
    }

    pub fn clear_filters(&mut self) {
        self.dispatch(PeopleAction::ClearFilters);
    }

    /// Wait until every queued write has been attempted.
    pub async fn flush(&self) {
        self.writer.flush().await;
    }

    pub fn write_failures(&self) -> u64 {
        self.writer.failures()
    }

    /// Drain queued writes and stop the worker.
    pub async fn shutdown(self) {
        self.writer.shutdown().await;
    }
}
