pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use domain::people;
pub use domain::user;
pub use outbound::repositories;
