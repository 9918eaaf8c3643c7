//! JSON representation of a [`RunReport`](crate::core::domain::RunReport).
pub mod mappers;
pub mod models;
