pub mod temp_file;

pub use temp_file::TempPng;
