pub mod repositories;
pub mod swapi;
