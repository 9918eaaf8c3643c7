pub mod aggregating;
pub mod executing;
pub mod scheduling;
