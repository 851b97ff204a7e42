//! Core types and services for mcp-monumenten.
//!
//! This crate owns the address model and its validation, a small
//! parameterized SPARQL layer for the Kadaster knowledge graph, the address
//! resolver built on top of it, and the adapter that forwards identifiers to
//! a monument status source.

pub mod address;
pub mod models;
pub mod sparql;
pub mod status;
pub mod vocab;
