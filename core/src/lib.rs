//! Shared data model and wire contracts for the balance monitor.
//!
//! Everything in here is plain data plus codecs. Detection logic lives in
//! `engine`, transport in `adapters`, delivery in `monitor`.

pub mod error;
pub mod models;
pub mod payload;

pub use error::DecodeError;
pub use models::*;
