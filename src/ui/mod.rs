pub mod auth;
pub mod common;
pub mod navigation;
pub mod pages;

pub use navigation::{Header, NavMenu};
