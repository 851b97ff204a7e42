//! MCP tool modules.
//!
//! `address` resolves BAG addresses to verblijfsobject ids, `status` reports
//! the monument status of a resolved id.

pub mod address;
pub mod status;
