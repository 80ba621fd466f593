pub mod barber;
pub mod reservation;
pub mod service;
pub mod site;

pub use barber::Barber;
pub use reservation::{Reservation, ReservationStatus};
pub use service::Service;
pub use site::SiteConfig;
