//! SQLite persistence for cached tiles.
//!
//! - `schema` creates the tables osmdroid expects inside one transaction.
//! - `sqlite` owns the connection and writes tiles.

mod error;
mod schema;
mod sqlite;

pub use error::TileStoreError;
pub use schema::{METADATA_LOCALE, initialise_schema};
pub use sqlite::{TileStore, insert_tile};
