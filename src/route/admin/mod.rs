pub mod app;
pub mod greet_admin;
