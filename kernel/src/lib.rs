//! Probe Kernel: bounded binary search over ordered sequences.
//!
//! # API Surface
//!
//! - [`narrow::search`] -- index of some occurrence of a target in a sorted slice
//! - [`narrow::search_unchecked`] / [`narrow::search_low_probe`] -- the
//!   historical variants, kept so their exact behavior can be pinned by tests
//! - [`narrow::try_search_by`] -- the same loop over a fallible comparator
//! - [`trace`] -- step-by-step record of a search
//! - [`value::search_values`] -- runtime-checked search over untyped values
//!
//! # Module Layout
//!
//! `narrow` owns the loop and `trace` records it. `value` layers runtime type
//! checks on top of both and reports failures through `error`.
//!
//! Everything here is pure: no I/O, no shared state, no logging.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod narrow;
pub mod trace;
pub mod value;
