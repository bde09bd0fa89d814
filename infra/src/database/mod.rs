//! Database module - MySQL implementations using SQLx

pub mod connection;
pub mod mysql;

#[cfg(test)]
mod tests;

pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{MySqlTokenRepository, MySqlUserRepository};
