pub mod purchase;
pub mod reservation;
pub mod schedule;
pub mod segment;
pub mod station;
pub mod ticket;
pub mod train;
pub mod trip;
pub mod user;
