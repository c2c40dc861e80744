pub mod error;
pub mod interfaces;
pub mod notification;
pub mod service;
