pub mod claims;
pub mod requests;
