//! Storage database layer: SQLite connection management and schema migrations.
//!
//! ```no_run
//! use autoplay_sync::database::Database;
//!
//! let db = Database::open("storage.db").expect("failed to open database");
//! let conn = db.connection();
//! ```

pub mod connection;
pub mod migrations;

pub use connection::Database;
