#![feature(portable_simd)]

pub mod benchmark;
pub mod error;
pub mod fs;
pub mod numerics;
pub mod statistics;

pub use error::{LanewiseError, Result};
