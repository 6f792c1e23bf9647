//! SeaORM entity models for the kanban tables.
//!
//! The same models double as the serde records written to the snapshot file
//! and returned by the HTTP API.

pub mod board;
pub mod card;
pub mod list;

pub use board::Entity as Board;
pub use card::Entity as Card;
pub use list::Entity as List;
