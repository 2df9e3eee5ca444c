pub mod config;
pub mod dialog;
pub mod series;


pub use config::*;
pub use dialog::*;
pub use series::*;
