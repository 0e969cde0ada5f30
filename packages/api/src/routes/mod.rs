pub mod auth;
pub mod health;
pub mod image;
pub mod prime;
pub mod time;
