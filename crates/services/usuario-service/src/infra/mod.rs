//! Infrastructure layer - database, migrations and unit of work.

mod db;
mod memory;
pub mod migrations;
mod unit_of_work;

pub use db::Database;
pub use memory::MemoryStore;
pub use migrations::Migrator;
pub use unit_of_work::{Persistence, UnitOfWork};
