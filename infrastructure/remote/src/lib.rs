pub mod cart_repository;
pub mod client;
pub mod dto;
