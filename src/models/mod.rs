pub mod article;
pub mod image;
pub mod post;
pub mod text;

pub use article::*;
pub use image::*;
pub use post::*;
pub use text::*;
