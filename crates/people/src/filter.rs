//! Search and filter rules.
//!
//! The individual matchers are shared by the repository queries and the store's
//! derived view so both agree on case folding and happiness parsing.

use serde::{Deserialize, Serialize};

use crate::person::{MAX_HAPPINESS, MIN_HAPPINESS, Person};

/// `name` contains `query`, ignoring case. Empty query matches everything.
pub fn name_matches(person: &Person, query: &str) -> bool {
    query.is_empty() || person.name.to_lowercase().contains(&query.to_lowercase())
}

/// `category` equals `category`, ignoring case. Empty category matches everything.
pub fn category_matches(person: &Person, category: &str) -> bool {
    category.is_empty() || person.category.to_lowercase() == category.to_lowercase()
}

/// The person's company contains `company`, ignoring case. Empty matches everything.
pub fn company_matches(person: &Person, company: &str) -> bool {
    company.is_empty() || person.company.to_lowercase().contains(&company.to_lowercase())
}

/// Parsed happiness lies in `[min, max]`. Unparsable levels never match.
pub fn happiness_within(person: &Person, min: i64, max: i64) -> bool {
    person
        .happiness()
        .is_some_and(|level| level >= min && level <= max)
}

/// Active filter criteria for the people list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeopleFilters {
    pub search_query: String,
    pub category: String,
    pub company: String,
    pub min_happiness: i64,
    pub max_happiness: i64,
}

impl Default for PeopleFilters {
    fn default() -> Self {
        Self {
            search_query: String::new(),
            category: String::new(),
            company: String::new(),
            min_happiness: MIN_HAPPINESS,
            max_happiness: MAX_HAPPINESS,
        }
    }
}

impl PeopleFilters {
    /// Whether `person` satisfies every criterion.
    pub fn matches(&self, person: &Person) -> bool {
        name_matches(person, &self.search_query)
            && category_matches(person, &self.category)
            && company_matches(person, &self.company)
            && happiness_within(person, self.min_happiness, self.max_happiness)
    }

    /// The subset of `people` passing the filters, in collection order.
    pub fn apply(&self, people: &[Person]) -> Vec<Person> {
        people.iter().filter(|p| self.matches(p)).cloned().collect()
    }

    /// Shallow merge: fields present in `patch` replace the current ones.
    pub fn merge(&mut self, patch: FiltersPatch) {
        if let Some(query) = patch.search_query {
            self.search_query = query;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(company) = patch.company {
            self.company = company;
        }
        if let Some(min) = patch.min_happiness {
            self.min_happiness = min;
        }
        if let Some(max) = patch.max_happiness {
            self.max_happiness = max;
        }
    }
}

/// Partial filter update.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FiltersPatch {
    pub search_query: Option<String>,
    pub category: Option<String>,
    pub company: Option<String>,
    pub min_happiness: Option<i64>,
    pub max_happiness: Option<i64>,
}

impl FiltersPatch {
    pub fn search(query: impl Into<String>) -> Self {
        Self {
            search_query: Some(query.into()),
            ..Self::default()
        }
    }

    pub fn happiness(min: i64, max: i64) -> Self {
        Self {
            min_happiness: Some(min),
            max_happiness: Some(max),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::person::{PersonDraft, PersonId};
    use proptest::prelude::*;

    fn person(id: &str, name: &str, category: &str, company: &str, level: &str) -> Person {
        Person::from_draft(
            PersonId::from(id),
            PersonDraft::new(name, category, company, level),
        )
    }

    fn sample() -> Vec<Person> {
        vec![
            person("1", "Ada Lovelace", "manager", "Analytical Engines", "30"),
            person("2", "Grace Hopper", "employee", "US Navy", "50"),
            person("3", "Alan Turing", "Employee", "Bletchley Park", "70"),
            person("4", "Edsger Dijkstra", "manager", "Burroughs", "90"),
        ]
    }

    #[test]
    fn default_filters_match_every_parsable_level() {
        let people = sample();
        assert_eq!(PeopleFilters::default().apply(&people), people);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let filters = PeopleFilters {
            search_query: "HOP".to_string(),
            ..PeopleFilters::default()
        };
        let ids: Vec<_> = filters.apply(&sample()).into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![PersonId::from("2")]);
    }

    #[test]
    fn category_is_exact_ignoring_case() {
        let filters = PeopleFilters {
            category: "employee".to_string(),
            ..PeopleFilters::default()
        };
        assert_eq!(filters.apply(&sample()).len(), 2);

        let partial = PeopleFilters {
            category: "employ".to_string(),
            ..PeopleFilters::default()
        };
        assert!(partial.apply(&sample()).is_empty());
    }

    #[test]
    fn company_matches_substring_of_person_company() {
        let filters = PeopleFilters {
            company: "park".to_string(),
            ..PeopleFilters::default()
        };
        let names: Vec<_> = filters.apply(&sample()).into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Alan Turing".to_string()]);
    }

    #[test]
    fn happiness_range_is_inclusive() {
        let mut filters = PeopleFilters::default();
        filters.merge(FiltersPatch::happiness(40, 70));
        let levels: Vec<_> = filters
            .apply(&sample())
            .into_iter()
            .map(|p| p.level_of_happiness)
            .collect();
        assert_eq!(levels, vec!["50".to_string(), "70".to_string()]);
    }

    #[test]
    fn happiness_boundaries() {
        let people = vec![
            person("1", "a", "x", "y", "0"),
            person("2", "b", "x", "y", "100"),
            person("3", "c", "x", "y", "101"),
            person("4", "d", "x", "y", "-1"),
            person("5", "e", "x", "y", "unknown"),
        ];
        let ids: Vec<_> = PeopleFilters::default()
            .apply(&people)
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![PersonId::from("1"), PersonId::from("2")]);
    }

    #[test]
    fn merge_only_touches_present_fields() {
        let mut filters = PeopleFilters {
            category: "manager".to_string(),
            ..PeopleFilters::default()
        };
        filters.merge(FiltersPatch::search("ada"));
        assert_eq!(filters.search_query, "ada");
        assert_eq!(filters.category, "manager");
        assert_eq!(filters.max_happiness, 100);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// The derived view is exactly the subset satisfying every matcher.
        #[test]
        fn apply_equals_conjunction_of_matchers(
            levels in proptest::collection::vec(-5i64..110, 0..12),
            min in -2i64..102,
            span in 0i64..60,
            query in "(a|A|e|E|)",
            category in "(manager|MANAGER|employee|)",
            company in "(co|CO|x|)",
        ) {
            const NAMES: [&str; 4] = ["Ada", "EVE", "bob", "Carl"];
            const COMPANIES: [&str; 3] = ["Acme Co", "coreWorks", "Xylo"];

            let people: Vec<Person> = levels
                .iter()
                .enumerate()
                .map(|(i, level)| {
                    let category = if i % 2 == 0 { "manager" } else { "Employee" };
                    person(
                        &i.to_string(),
                        NAMES[i % NAMES.len()],
                        category,
                        COMPANIES[i % COMPANIES.len()],
                        &level.to_string(),
                    )
                })
                .collect();
            let filters = PeopleFilters {
                search_query: query.clone(),
                category: category.clone(),
                company: company.clone(),
                min_happiness: min,
                max_happiness: min + span,
            };

            let view = filters.apply(&people);
            let expected: Vec<Person> = people
                .iter()
                .filter(|p| {
                    let level = p.happiness().unwrap();
                    (query.is_empty() || p.name.to_lowercase().contains(&query.to_lowercase()))
                        && (category.is_empty() || p.category.to_lowercase() == category.to_lowercase())
                        && (company.is_empty()
                            || p.company.to_lowercase().contains(&company.to_lowercase()))
                        && level >= min
                        && level <= min + span
                })
                .cloned()
                .collect();
            prop_assert_eq!(view, expected);
        }
    }
}
