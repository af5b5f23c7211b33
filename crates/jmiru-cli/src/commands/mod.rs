pub mod align_ops;
pub mod annotate_ops;
pub mod classify_ops;
pub mod config_ops;
pub mod input;
