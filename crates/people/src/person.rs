use serde::{Deserialize, Deserializer, Serialize};

use roster_core::{DomainError, DomainResult, Entity, parse_int_prefix};

roster_core::string_id!(
    /// Person identifier, unique within the live collection.
    PersonId,
    "PersonId"
);

impl PersonId {
    /// Allocate the id that follows the highest numeric id in `existing`.
    ///
    /// Ids without a numeric reading, and negative ones, count as 0. This is
    /// recomputed from the live collection every time, so deleting the highest
    /// person and creating a new one hands out the same id again.
    pub fn next_after<'a>(existing: impl IntoIterator<Item = &'a PersonId>) -> Self {
        let max = existing
            .into_iter()
            .filter_map(PersonId::numeric_value)
            .fold(0, i64::max);
        Self::new(max.saturating_add(1).to_string())
    }
}

/// Lowest accepted happiness level.
pub const MIN_HAPPINESS: i64 = 0;
/// Highest accepted happiness level.
pub const MAX_HAPPINESS: i64 = 100;

/// Domain entity: a person in the directory.
///
/// `level_of_happiness` is kept as text and parsed on every comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_image: Option<String>,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_image: Option<String>,
    pub level_of_happiness: String,
}

impl Person {
    pub fn from_draft(id: PersonId, draft: PersonDraft) -> Self {
        Self {
            id,
            name: draft.name,
            category: draft.category,
            category_image: draft.category_image,
            company: draft.company,
            company_image: draft.company_image,
            level_of_happiness: draft.level_of_happiness,
        }
    }

    /// Parsed happiness level, `None` when the stored text is not a number.
    pub fn happiness(&self) -> Option<i64> {
        parse_int_prefix(&self.level_of_happiness)
    }

    /// Merge the fields present in `patch`. The id is never touched.
    pub fn apply_patch(&mut self, patch: PersonPatch) {
        let PersonPatch {
            id: _,
            name,
            category,
            category_image,
            company,
            company_image,
            level_of_happiness,
        } = patch;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(category) = category {
            self.category = category;
        }
        if let Some(image) = category_image {
            self.category_image = image;
        }
        if let Some(company) = company {
            self.company = company;
        }
        if let Some(image) = company_image {
            self.company_image = image;
        }
        if let Some(level) = level_of_happiness {
            self.level_of_happiness = level;
        }
    }
}

impl Entity for Person {
    type Id = PersonId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// A person that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonDraft {
    pub name: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_image: Option<String>,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_image: Option<String>,
    pub level_of_happiness: String,
}

impl PersonDraft {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        company: impl Into<String>,
        level_of_happiness: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            category_image: None,
            company: company.into(),
            company_image: None,
            level_of_happiness: level_of_happiness.into(),
        }
    }

    /// Check the form rules and return the draft with name and company trimmed.
    ///
    /// All failing fields are reported together.
    pub fn validated(self) -> DomainResult<Self> {
        let mut problems = Vec::new();
        check_name(&self.name, &mut problems);
        check_company(&self.company, &mut problems);
        check_happiness(&self.level_of_happiness, &mut problems);
        reject(problems)?;

        Ok(Self {
            name: self.name.trim().to_string(),
            company: self.company.trim().to_string(),
            ..self
        })
    }
}

fn check_name(name: &str, problems: &mut Vec<&'static str>) {
    if name.trim().is_empty() {
        problems.push("name is required");
    }
}

fn check_company(company: &str, problems: &mut Vec<&'static str>) {
    if company.trim().is_empty() {
        problems.push("company is required");
    }
}

fn check_happiness(level: &str, problems: &mut Vec<&'static str>) {
    match parse_int_prefix(level) {
        Some(level) if (MIN_HAPPINESS..=MAX_HAPPINESS).contains(&level) => {}
        _ => problems.push("happiness must be between 0 and 100"),
    }
}

fn reject(problems: Vec<&'static str>) -> DomainResult<()> {
    if problems.is_empty() {
        Ok(())
    } else {
        Err(DomainError::validation(problems.join("; ")))
    }
}

/// Partial update for a person. Absent fields keep their current value.
///
/// `id` is accepted so callers can pass a whole record back, but it is ignored.
/// The image fields are doubly optional: `None` keeps the image, `Some(None)`
/// (a JSON `null`) clears it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonPatch {
    pub id: Option<PersonId>,
    pub name: Option<String>,
    pub category: Option<String>,
    #[serde(deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub category_image: Option<Option<String>>,
    pub company: Option<String>,
    #[serde(deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub company_image: Option<Option<String>>,
    pub level_of_happiness: Option<String>,
}

impl PersonPatch {
    /// Apply the form rules to the fields that are present, trimming name and
    /// company. Absent fields are not checked.
    pub fn validated(self) -> DomainResult<Self> {
        let mut problems = Vec::new();
        if let Some(name) = &self.name {
            check_name(name, &mut problems);
        }
        if let Some(company) = &self.company {
            check_company(company, &mut problems);
        }
        if let Some(level) = &self.level_of_happiness {
            check_happiness(level, &mut problems);
        }
        reject(problems)?;

        Ok(Self {
            name: self.name.map(|n| n.trim().to_string()),
            company: self.company.map(|c| c.trim().to_string()),
            ..self
        })
    }
}

/// A field that is present in the input, even as `null`, becomes `Some`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl From<Person> for PersonPatch {
    fn from(person: Person) -> Self {
        Self {
            id: Some(person.id),
            name: Some(person.name),
            category: Some(person.category),
            category_image: Some(person.category_image),
            company: Some(person.company),
            company_image: Some(person.company_image),
            level_of_happiness: Some(person.level_of_happiness),
        }
    }
}
