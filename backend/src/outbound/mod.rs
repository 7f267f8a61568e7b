//! Outbound adapters implementing the domain's driven ports.

pub mod auth;
pub mod notify;
pub mod persistence;
pub mod storage;
