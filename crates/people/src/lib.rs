//! People domain module.
//!
//! This crate contains the `Person` entity, its wire representation and the
//! filtering rules, implemented purely as deterministic domain logic (no IO, no
//! storage).

pub mod dto;
pub mod filter;
pub mod person;
pub mod seed;

pub use dto::{PersonDto, PersonMapper};
pub use filter::{FiltersPatch, PeopleFilters};
pub use person::{Person, PersonDraft, PersonId, PersonPatch};
pub use seed::seed_people;
