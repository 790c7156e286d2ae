pub mod boot;
pub mod extract;
pub mod get;
