pub mod client;

pub use client::SwapiHttpClient;
