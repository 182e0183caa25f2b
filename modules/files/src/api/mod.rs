//! API layer for the files module.

pub mod rest;
