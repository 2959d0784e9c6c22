pub mod batch;
pub mod compositor;
