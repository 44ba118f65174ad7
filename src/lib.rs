//! Election management core: elections, candidates, voters, vote casting
//! with one-vote-per-voter enforcement, on-demand tallies, and a JSON
//! snapshot store.
//!
//! The library performs no terminal I/O; all prompting and rendering lives
//! in the menu binary, which drives [`model::registry::ElectionRegistry`]
//! through its API and persists it with [`store::Store`].

pub mod error;
pub mod model;
pub mod store;
