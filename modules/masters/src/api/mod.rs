//! API layer for the masters module.

pub mod rest;
