pub mod admin;
pub mod attachment;
pub mod auth;
pub mod presentation;
