pub mod error;
pub mod health;
pub mod http;
pub mod posts;

pub use posts::handle;
