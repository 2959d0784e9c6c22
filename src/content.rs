pub mod assemble;
pub mod captions;
