pub mod admin;
pub mod client;
pub mod index;
pub mod template;
