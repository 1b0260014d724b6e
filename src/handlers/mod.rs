pub mod admin;
pub mod names;
pub mod pages;
pub mod session;
pub mod spin;
pub mod upload;
