pub mod jwt;
pub mod listing;
pub mod password;
pub mod responses;
pub mod views;
