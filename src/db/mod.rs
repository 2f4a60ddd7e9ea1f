pub mod messages;
pub mod pool;
pub mod sessions;
pub mod social;
pub mod users;

pub use pool::create_pool;
