//! Entity Module

pub mod article;
pub mod user;
