pub mod attendance;
pub mod common;
pub mod following;
pub mod genre;
pub mod gig;
pub mod health;
pub mod notification;
pub mod user;

#[cfg(test)]
mod test;
