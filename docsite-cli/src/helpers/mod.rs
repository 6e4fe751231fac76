//! Helper modules for docsite command implementations

pub mod global_args;
pub mod output;

pub use global_args::{
    ConfigOverrides,
    GlobalArgs,
};
pub use output::{
    DocListing,
    OutputManager,
};
