pub mod follow;
pub mod message;
pub mod session;
pub mod user;

pub use follow::FollowRequest;
pub use message::Message;
pub use session::Session;
pub use user::User;
