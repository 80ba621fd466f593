pub mod availability;
pub mod booking;
pub mod finance;
pub mod images;
pub mod mail;
