pub mod auth_service;
pub mod image_service;
pub mod offer_service;
pub mod profile_service;
