pub mod enquiry_store;
pub mod gallery_store;
pub mod product_store;
pub mod user_store;
pub mod video_store;
