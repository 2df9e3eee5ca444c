pub mod app;
pub mod trackbar;


pub use app::*;
