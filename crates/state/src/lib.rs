//! Application state store.
//!
//! Two independent slices (people, favorites) plus modal visibility. Every
//! mutation is a synchronous reducer step; the ones that change a stored
//! collection return the [`roster_infra::PersistIntent`] describing the write,
//! which the caller performs or queues.

pub mod favorites;
pub mod modal;
pub mod people;
pub mod store;

pub use favorites::{FavoritesAction, FavoritesState};
pub use modal::{ModalAction, ModalState};
pub use people::{PeopleAction, PeopleState};
pub use store::{AppAction, AppStore};
