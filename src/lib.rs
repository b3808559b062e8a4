pub mod config;
pub mod error;
pub mod graph;
pub mod optimizer;
pub mod scorer;
pub mod store;
// cmd and reports belong to the binary crate (main.rs).
