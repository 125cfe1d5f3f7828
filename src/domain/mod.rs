pub mod batch;
pub mod catalog;
pub mod duration;
pub mod keywords;
pub mod process;
