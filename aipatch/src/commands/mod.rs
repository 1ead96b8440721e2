// aipatch/src/commands/mod.rs
pub mod apply;
