pub mod cart;
pub mod entity;
pub mod gateway;
pub mod repository;
