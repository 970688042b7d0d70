//! SeaORM entities.

pub mod usuario;
