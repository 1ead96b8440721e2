// aipatch/src/ui/mod.rs
pub mod diff_viewer;
pub mod output_format;
