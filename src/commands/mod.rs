pub mod build;
pub mod links;
