pub mod bootstrap;
pub mod import;
pub mod password;
pub mod spin;
