pub mod repository;
pub mod role;
