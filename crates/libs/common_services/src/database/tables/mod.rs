pub mod app_user;
pub mod enquiry;
pub mod photo;
pub mod product;
pub mod product_media;
pub mod video;
