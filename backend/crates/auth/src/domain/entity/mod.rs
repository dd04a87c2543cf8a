//! Entity Module

pub mod directory_user;
pub mod principal;
