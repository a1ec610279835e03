pub mod auth;
pub mod avatar;
pub mod health;
pub mod offers;
pub mod ping;
pub mod profile;
pub mod swagger;
