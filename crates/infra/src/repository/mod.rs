//! Person repository: the canonical collection and its durability.

use roster_core::DomainResult;
use roster_people::{Person, PersonDraft, PersonId, PersonPatch};

mod local;

pub use local::LocalPersonRepository;

/// CRUD and query interface over the people collection.
///
/// Reads serve copies from memory; mutations persist the whole collection before
/// returning. Query methods never fail: empty criteria match everything.
#[async_trait::async_trait]
pub trait PersonRepository: Send + Sync {
    fn get_all(&self) -> Vec<Person>;

    fn get_by_id(&self, id: &PersonId) -> Option<Person>;

    /// Assign the next id, append and persist.
    async fn create(&mut self, draft: PersonDraft) -> Person;

    /// Merge `patch` onto the person with `id`. Fails with `NotFound` if absent.
    async fn update(&mut self, id: &PersonId, patch: PersonPatch) -> DomainResult<Person>;

    /// Remove the person with `id`; `false` if there was none.
    async fn delete(&mut self, id: &PersonId) -> bool;

    fn search_by_name(&self, query: &str) -> Vec<Person>;

    fn filter_by_category(&self, category: &str) -> Vec<Person>;

    fn filter_by_company(&self, company: &str) -> Vec<Person>;

    fn filter_by_happiness_level(&self, min: i64, max: i64) -> Vec<Person>;
}
