//! Raw mesh key material.
//!
//! Keys are carried as their 16 bytes. Nothing here derives network or
//! application identifiers from them.

pub mod application;
pub mod device;
pub mod network;
