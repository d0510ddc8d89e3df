//! # vpx-core
//!
//! Core types shared by the vpx decoder crates.
//!
//! This crate provides:
//! - Error handling types
//! - Byte-budgeted readers over arbitrary `std::io::Read` sources

pub mod error;
pub mod io;

pub use error::{BitstreamError, Error, Result};
pub use io::BoundedReader;
