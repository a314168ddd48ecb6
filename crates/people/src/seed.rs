//! Built-in starter dataset, used when local storage holds no people yet.

use crate::dto::PersonDto;

const SEED_JSON: &str = include_str!("seed.json");

/// The starter records in wire shape.
///
/// The dataset is compiled in; a malformed file is logged and yields an empty
/// list rather than aborting startup.
pub fn seed_people() -> Vec<PersonDto> {
    match serde_json::from_str(SEED_JSON) {
        Ok(people) => people,
        Err(err) => {
            tracing::error!("embedded seed dataset is malformed: {err}");
            Vec::new()
        }
    }
}
