//! Data Transfer Objects for the HTTP layer.

pub mod health;
pub mod track;
