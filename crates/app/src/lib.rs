//! People manager application: wiring of storage, repository and state.

use std::sync::Arc;

use anyhow::Context;
use roster_infra::{FileKeyValueStore, KeyValueStore, LocalPersonRepository};
use roster_people::seed_people;

pub mod config;
pub mod service;

pub use config::AppConfig;
pub use service::{PeopleService, ServiceError, ServiceResult};

pub type LocalRepository = LocalPersonRepository<Arc<dyn KeyValueStore>>;

/// A fully hydrated application.
pub struct App {
    service: PeopleService<LocalRepository>,
}

impl App {
    /// Open the configured storage file and hydrate.
    pub async fn bootstrap(config: &AppConfig) -> anyhow::Result<Self> {
        let path = config.storage_path();
        let store = FileKeyValueStore::open(&path)
            .await
            .with_context(|| format!("failed to open storage at {}", path.display()))?;

        if config.reset {
            tracing::info!(path = %path.display(), "resetting local storage");
            store.clear().await.context("failed to reset local storage")?;
        }

        Ok(Self::with_store(Arc::new(store)).await)
    }

    /// Hydrate the repository from `store` (seeding it if empty), then load
    /// people and favorites into the state store.
    pub async fn with_store(store: Arc<dyn KeyValueStore>) -> Self {
        let repository = LocalPersonRepository::open(store.clone(), seed_people()).await;
        let mut service = PeopleService::new(repository, store);

        service.load_people();
        service.load_favorites().await;

        Self { service }
    }

    pub fn service(&self) -> &PeopleService<LocalRepository> {
        &self.service
    }

    pub fn service_mut(&mut self) -> &mut PeopleService<LocalRepository> {
        &mut self.service
    }

    pub async fn shutdown(self) {
        self.service.shutdown().await;
    }
}
