pub mod backgrounds;
pub mod decode;
