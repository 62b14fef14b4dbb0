pub mod catalog;
pub mod connection;
pub mod errors;
pub mod execution;
pub mod params;
pub mod sql;
