#![doc = include_str!("../README.md")]

mod error;
mod prelude;

pub mod ais;
pub mod checksum;
pub mod sentence;

pub use error::{Error, Result};
