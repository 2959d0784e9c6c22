pub mod builtin;
pub mod engine;
pub mod font;
pub mod script;
