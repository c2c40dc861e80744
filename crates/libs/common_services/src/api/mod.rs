pub mod auth;
pub mod dashboard;
pub mod enquiry;
pub mod gallery;
pub mod preview;
pub mod product;
pub mod video;
