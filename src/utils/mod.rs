pub mod auth;
pub mod filename;
pub mod image;
pub mod jwt;
pub mod storage;
