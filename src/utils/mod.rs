// file: src/utils/mod.rs
// description: shared utilities module exports
// reference: internal module structure

pub mod logging;
