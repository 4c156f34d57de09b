pub mod people;
pub mod user;
