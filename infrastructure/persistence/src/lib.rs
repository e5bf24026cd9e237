pub mod db;
pub mod cart {
    pub mod entity;
    pub mod repository;
}
pub mod guest_cart {
    pub mod file_store;
}
