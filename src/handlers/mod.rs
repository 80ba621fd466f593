pub mod bookings;
pub mod catalog;
pub mod finance;
pub mod health;
pub mod site;
pub mod uploads;
