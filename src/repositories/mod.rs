//! Repository layer for database operations.
//!
//! This module provides repository structs that encapsulate database queries
//! and operations, following the Data Mapper pattern recommended by SeaORM.
//! Repositories keep entities as pure data models while providing reusable
//! database access methods. They do not check parent references; that is
//! the job of the backend calling them.

pub mod board;
pub mod card;
pub mod list;

pub use board::BoardRepository;
pub use card::CardRepository;
pub use list::ListRepository;
