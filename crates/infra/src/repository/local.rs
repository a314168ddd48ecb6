use roster_core::{DomainError, DomainResult, position_of};
use roster_people::filter::{category_matches, company_matches, happiness_within, name_matches};
use roster_people::{Person, PersonDraft, PersonDto, PersonId, PersonMapper, PersonPatch};

use crate::persistence::PersistIntent;
use crate::storage::{KeyValueStore, StorageKey, load_json};

use super::PersonRepository;

/// Repository keeping people in memory and mirroring them to local storage.
///
/// Construct with [`LocalPersonRepository::open`], which hydrates exactly once
/// before the instance is handed out.
#[derive(Debug)]
pub struct LocalPersonRepository<S> {
    store: S,
    people: Vec<Person>,
}

impl<S> LocalPersonRepository<S>
where
    S: KeyValueStore,
{
    /// Hydrate from `store`, falling back to `seed`.
    ///
    /// - stored, non-empty collection: adopted as is;
    /// - absent or empty: `seed` becomes the collection and is persisted;
    /// - read/decode failure: `seed` is used in memory only.
    ///
    /// Storage problems are logged, never returned.
    pub async fn open(store: S, seed: Vec<PersonDto>) -> Self {
        let people = match load_json::<Vec<PersonDto>, _>(&store, StorageKey::People).await {
            Ok(Some(stored)) if !stored.is_empty() => {
                tracing::info!(count = stored.len(), "hydrated people from local storage");
                PersonMapper::to_domain_list(stored)
            }
            Ok(_) => {
                let people = PersonMapper::to_domain_list(seed);
                tracing::info!(count = people.len(), "no stored people; seeding local storage");
                if let Err(err) = PersistIntent::save(StorageKey::People, &people)
                    .execute(&store)
                    .await
                {
                    tracing::warn!("failed to persist seed people: {err}");
                }
                people
            }
            Err(err) => {
                tracing::warn!("failed to read stored people, using seed data: {err}");
                PersonMapper::to_domain_list(seed)
            }
        };

        Self { store, people }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    async fn save_to_storage(&self) {
        if let Err(err) = PersistIntent::save(StorageKey::People, &self.people)
            .execute(&self.store)
            .await
        {
            tracing::warn!("failed to persist people: {err}");
        }
    }

    fn select(&self, pred: impl Fn(&Person) -> bool) -> Vec<Person> {
        self.people.iter().filter(|p| pred(p)).cloned().collect()
    }
}

#[async_trait::async_trait]
impl<S> PersonRepository for LocalPersonRepository<S>
where
    S: KeyValueStore,
{
    fn get_all(&self) -> Vec<Person> {
        self.people.clone()
    }

    fn get_by_id(&self, id: &PersonId) -> Option<Person> {
        position_of(&self.people, id).map(|idx| self.people[idx].clone())
    }

    async fn create(&mut self, draft: PersonDraft) -> Person {
        let id = PersonId::next_after(self.people.iter().map(|p| &p.id));
        let person = Person::from_draft(id, draft);
        tracing::debug!(id = %person.id, "creating person");

        self.people.push(person.clone());
        self.save_to_storage().await;
        person
    }

    async fn update(&mut self, id: &PersonId, patch: PersonPatch) -> DomainResult<Person> {
        let idx = position_of(&self.people, id)
            .ok_or_else(|| DomainError::not_found("Person", id))?;

        self.people[idx].apply_patch(patch);
        let updated = self.people[idx].clone();
        tracing::debug!(id = %updated.id, "updated person");

        self.save_to_storage().await;
        Ok(updated)
    }

    async fn delete(&mut self, id: &PersonId) -> bool {
        let Some(idx) = position_of(&self.people, id) else {
            return false;
        };

        self.people.remove(idx);
        tracing::debug!(%id, "deleted person");
        self.save_to_storage().await;
        true
    }

    fn search_by_name(&self, query: &str) -> Vec<Person> {
        let query = query.trim();
        if query.is_empty() {
            return self.get_all();
        }
        self.select(|p| name_matches(p, query))
    }

    fn filter_by_category(&self, category: &str) -> Vec<Person> {
        if category.is_empty() {
            return self.get_all();
        }
        self.select(|p| category_matches(p, category))
    }

    fn filter_by_company(&self, company: &str) -> Vec<Person> {
        if company.is_empty() {
            return self.get_all();
        }
        self.select(|p| company_matches(p, company))
    }

    fn filter_by_happiness_level(&self, min: i64, max: i64) -> Vec<Person> {
        self.select(|p| happiness_within(p, min, max))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::storage::InMemoryKeyValueStore;

    fn dto(id: &str, name: &str, category: &str, company: &str, level: &str) -> PersonDto {
        PersonMapper::to_dto(Person::from_draft(
            PersonId::from(id),
            PersonDraft::new(name, category, company, level),
        ))
    }

    fn seed() -> Vec<PersonDto> {
        vec![
            dto("1", "Ada Lovelace", "manager", "Analytical", "30"),
            dto("2", "Grace Hopper", "employee", "Navy", "50"),
            dto("3", "Alan Turing", "employee", "Bletchley", "70"),
            dto("4", "Edsger Dijkstra", "Manager", "Burroughs", "90"),
        ]
    }

    async fn stored(store: &InMemoryKeyValueStore) -> Option<Vec<PersonDto>> {
        load_json(store, StorageKey::People).await.unwrap()
    }

    async fn open_with(
        initial: Option<Vec<PersonDto>>,
    ) -> (Arc<InMemoryKeyValueStore>, LocalPersonRepository<Arc<InMemoryKeyValueStore>>) {
        let store = Arc::new(InMemoryKeyValueStore::new());
        if let Some(initial) = initial {
            crate::storage::save_json(&store, StorageKey::People, &initial)
                .await
                .unwrap();
        }
        let repo = LocalPersonRepository::open(store.clone(), seed()).await;
        (store, repo)
    }

    fn ids(people: &[Person]) -> Vec<&str> {
        people.iter().map(|p| p.id.as_str()).collect()
    }

    #[tokio::test]
    async fn open_adopts_stored_collection() {
        let (_, repo) = open_with(Some(vec![dto("9", "Stored", "x", "y", "10")])).await;
        assert_eq!(ids(&repo.get_all()), vec!["9"]);
    }

    #[tokio::test]
    async fn open_seeds_and_persists_when_storage_is_empty() {
        for initial in [None, Some(vec![])] {
            let (store, repo) = open_with(initial).await;
            assert_eq!(repo.len(), 4);
            assert_eq!(stored(&store).await, Some(seed()));
        }
    }

    #[tokio::test]
    async fn open_falls_back_to_seed_on_read_failure_without_writing() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        store.set_fail_reads(true);

        let repo = LocalPersonRepository::open(store.clone(), seed()).await;
        assert_eq!(repo.len(), 4);
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn create_assigns_max_plus_one() {
        let (store, mut repo) = open_with(Some(vec![
            dto("1", "A", "employee", "C", "80"),
            dto("3", "B", "employee", "C", "20"),
        ]))
        .await;

        let created = repo
            .create(PersonDraft::new("X", "employee", "Y", "50"))
            .await;
        assert_eq!(created.id.as_str(), "4");
        assert_eq!(ids(&repo.get_all()), vec!["1", "3", "4"]);

        let persisted = stored(&store).await.unwrap();
        assert_eq!(persisted.last().unwrap().id.as_str(), "4");
    }

    #[tokio::test]
    async fn deleting_the_highest_id_lets_it_be_reused() {
        let (_, mut repo) = open_with(None).await;
        assert!(repo.delete(&PersonId::from("4")).await);

        let created = repo.create(PersonDraft::new("Z", "manager", "Q", "1")).await;
        assert_eq!(created.id.as_str(), "4");
    }

    #[tokio::test]
    async fn update_merges_and_keeps_id() {
        let (store, mut repo) = open_with(None).await;
        let updated = repo
            .update(
                &PersonId::from("2"),
                PersonPatch {
                    id: Some(PersonId::from("77")),
                    level_of_happiness: Some("99".to_string()),
                    ..PersonPatch::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id.as_str(), "2");
        assert_eq!(updated.name, "Grace Hopper");
        assert_eq!(updated.level_of_happiness, "99");
        assert!(repo.get_by_id(&PersonId::from("77")).is_none());

        let persisted = stored(&store).await.unwrap();
        assert_eq!(persisted[1].level_of_happiness, "99");
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let (_, mut repo) = open_with(None).await;
        let err = repo
            .update(&PersonId::from("404"), PersonPatch::default())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn delete_reports_whether_it_removed() {
        let (store, mut repo) = open_with(None).await;
        let writes_before = store.write_count();

        assert!(!repo.delete(&PersonId::from("404")).await);
        assert_eq!(store.write_count(), writes_before);

        assert!(repo.delete(&PersonId::from("1")).await);
        assert!(repo.get_by_id(&PersonId::from("1")).is_none());
        let remaining: Vec<String> = stored(&store)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id.into_inner())
            .collect();
        assert_eq!(remaining, vec!["2", "3", "4"]);
    }

    #[tokio::test]
    async fn reads_return_copies() {
        let (_, repo) = open_with(None).await;
        let mut all = repo.get_all();
        all[0].name = "Mutated".to_string();
        all.clear();

        assert_eq!(repo.get_by_id(&PersonId::from("1")).unwrap().name, "Ada Lovelace");
        assert_eq!(repo.len(), 4);
    }

    #[tokio::test]
    async fn empty_criteria_return_full_collection_in_order() {
        let (_, repo) = open_with(None).await;
        let all = repo.get_all();
        assert_eq!(repo.search_by_name(""), all);
        assert_eq!(repo.search_by_name("   "), all);
        assert_eq!(repo.filter_by_category(""), all);
        assert_eq!(repo.filter_by_company(""), all);
    }

    #[tokio::test]
    async fn queries_fold_case() {
        let (_, repo) = open_with(None).await;
        assert_eq!(ids(&repo.search_by_name("  TURING ")), vec!["3"]);
        assert_eq!(ids(&repo.filter_by_category("MANAGER")), vec!["1", "4"]);
        assert_eq!(ids(&repo.filter_by_company("nav")), vec!["2"]);
    }

    #[tokio::test]
    async fn happiness_range_is_inclusive_and_skips_non_numbers() {
        let (_, repo) = open_with(Some(vec![
            dto("1", "a", "x", "y", "30"),
            dto("2", "b", "x", "y", "50"),
            dto("3", "c", "x", "y", "70"),
            dto("4", "d", "x", "y", "90"),
            dto("5", "e", "x", "y", "n/a"),
        ]))
        .await;

        let levels: Vec<_> = repo
            .filter_by_happiness_level(40, 70)
            .into_iter()
            .map(|p| p.level_of_happiness)
            .collect();
        assert_eq!(levels, vec!["50".to_string(), "70".to_string()]);
        assert_eq!(repo.filter_by_happiness_level(0, 100).len(), 4);
    }

    #[tokio::test]
    async fn write_failures_do_not_fail_mutations() {
        let (store, mut repo) = open_with(None).await;
        store.set_fail_writes(true);

        let created = repo.create(PersonDraft::new("N", "employee", "C", "5")).await;
        assert_eq!(created.id.as_str(), "5");
        assert!(repo.update(&created.id, PersonPatch::default()).await.is_ok());
        assert!(repo.delete(&PersonId::from("1")).await);

        store.set_fail_writes(false);
        assert_eq!(stored(&store).await, Some(seed()));
    }
}
