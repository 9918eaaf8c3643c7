//! Setting file loading: raw serde models and their conversion into
//! [`RunConfig`](crate::core::domain::RunConfig).
pub mod mappers;
pub mod models;
