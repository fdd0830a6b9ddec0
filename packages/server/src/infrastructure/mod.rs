//! Infrastructure layer: wire DTOs, the connection registry and message log backends.

pub mod dto;
pub mod registry;
pub mod repository;
