#![cfg_attr(all(feature = "no-std", not(test)), no_std)]

#[cfg(feature = "no-std")]
extern crate alloc;

pub mod algorithms;
pub mod collections;
