//! Client-side routing: where the user is, what they are allowed to see,
//! and how the rest of the crate asks to go somewhere else.

mod guard;
mod location;
mod navigator;
mod table;

pub use guard::{guard, GuardDecision};
pub use location::Location;
pub use navigator::{HistoryNavigator, Navigation, Navigator};
pub use table::Route;
