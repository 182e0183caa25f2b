//! Infrastructure: SeaORM persistence for the master record store.

pub mod storage;
