#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::struct_excessive_bools
)]
mod media_kind;
pub mod video_link;

pub use media_kind::*;
