//! API layer for the projects module.

pub mod rest;
