pub mod admin;
pub mod player;
