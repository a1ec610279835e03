pub mod offer;
pub mod recruiter;
pub mod user;

pub use offer::*;
pub use recruiter::*;
pub use user::*;
