//! # docvault-database
//!
//! SQLite connection management, embedded migrations, and concrete
//! repository implementations for all DocVault entities.
//!
//! The version ledger and the transactional upload commit live here because
//! their ordering guarantees are enforced by the database.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;

#[cfg(test)]
pub(crate) mod test_support;
