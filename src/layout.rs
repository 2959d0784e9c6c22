pub mod panel;
pub mod wrap;
