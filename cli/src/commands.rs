pub mod export;
pub mod people;
pub mod queries;
pub mod relations;
pub mod statistics;
