//! Persistent storage for extracted document text

pub mod database;

pub use database::DocumentDb;
