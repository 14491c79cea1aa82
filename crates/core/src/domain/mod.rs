pub mod featured;
pub mod profile;
pub mod recipe;
pub mod saved;
