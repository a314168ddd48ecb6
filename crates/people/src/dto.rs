//! Wire representation of a person.
//!
//! Persisted and seed records name the image attributes `category-image` and
//! `company-image`; everything else matches the in-memory shape. Conversion in
//! both directions is field-for-field, so `PersonDto -> Person -> PersonDto`
//! reproduces the original record.

use serde::{Deserialize, Serialize};

use crate::person::{Person, PersonId};

/// Person as stored under a storage key or shipped in the seed dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonDto {
    pub id: PersonId,
    pub name: String,
    pub category: String,
    #[serde(
        rename = "category-image",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub category_image: Option<String>,
    pub company: String,
    #[serde(
        rename = "company-image",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub company_image: Option<String>,
    #[serde(rename = "levelOfHappiness")]
    pub level_of_happiness: String,
}

impl From<PersonDto> for Person {
    fn from(dto: PersonDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            category: dto.category,
            category_image: dto.category_image,
            company: dto.company,
            company_image: dto.company_image,
            level_of_happiness: dto.level_of_happiness,
        }
    }
}

impl From<Person> for PersonDto {
    fn from(person: Person) -> Self {
        Self {
            id: person.id,
            name: person.name,
            category: person.category,
            category_image: person.category_image,
            company: person.company,
            company_image: person.company_image,
            level_of_happiness: person.level_of_happiness,
        }
    }
}

/// Translation between wire records and domain entities.
pub struct PersonMapper;

impl PersonMapper {
    pub fn to_domain(dto: PersonDto) -> Person {
        dto.into()
    }

    pub fn to_domain_list(dtos: Vec<PersonDto>) -> Vec<Person> {
        dtos.into_iter().map(Person::from).collect()
    }

    pub fn to_dto(person: Person) -> PersonDto {
        person.into()
    }

    pub fn to_dto_list(people: &[Person]) -> Vec<PersonDto> {
        people.iter().cloned().map(PersonDto::from).collect()
    }
}
