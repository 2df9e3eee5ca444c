pub mod ffmpeg;
pub mod source;

pub use ffmpeg::*;
pub use source::*;
