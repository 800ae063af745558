//! Lock-free primitives shared by the `uart-buf` crates.

#![no_std]
#![deny(missing_docs)]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod ring;
