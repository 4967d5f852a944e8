pub mod datetime;
pub mod table;
