pub mod attendances;
pub mod dto;
pub mod followings;
pub mod genres;
pub mod gigs;
pub mod health;
pub mod notifications;
pub mod server;
