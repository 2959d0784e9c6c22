pub mod caption;
pub mod composite;
pub mod overlay;
