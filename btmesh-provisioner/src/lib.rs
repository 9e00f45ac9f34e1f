#![cfg_attr(not(test), no_std)]

pub(crate) mod fmt;

mod config;
mod error;
pub mod fast_prov;
pub mod flags;
pub mod provisioner;
pub mod secrets;

pub use config::FastProvConfig;
pub use error::ProvisionerError;
pub use fast_prov::{FastProv, FastProvAction, FastProvMode, FastProvStatus, KeyResolver};
pub use flags::{Flags, MeshFlags};
