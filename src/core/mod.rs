pub mod domain;
pub mod pipeline;
pub mod scoring;
pub mod traits;
