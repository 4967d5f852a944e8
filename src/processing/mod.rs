pub mod aggregate;
pub mod merge;
pub mod statistics;
