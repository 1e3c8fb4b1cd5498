pub mod broadcast;
pub mod core;
pub mod cover;
pub mod packing;
pub mod pipeline;
pub mod tree;
#[cfg(feature = "logging")]
mod settings;
