//! HTTP handlers

pub mod api;
pub mod edit;
pub mod health;
pub mod literature;
pub mod upload;
