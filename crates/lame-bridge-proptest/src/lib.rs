//! Property-based test support for `lame-bridge`.
//!
//! Provides PCM generators and MP3-legal stream parameters.
//!
//! # Usage
//!
//! ```ignore
//! use lame_bridge_proptest::generators::*;
//! use test_strategy::proptest;
//!
//! #[proptest]
//! fn my_test(#[strategy(pcm_block_i16(1..=1152usize))] pcm: Vec<i16>) {
//!     assert!(!pcm.is_empty());
//! }
//! ```

pub mod generators;

pub use proptest;
pub use test_strategy;
