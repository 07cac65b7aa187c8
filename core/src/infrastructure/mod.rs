pub mod attendance;
pub mod following;
pub mod genre;
pub mod gig;
pub mod health;
pub mod notification;
pub mod unit_of_work;
