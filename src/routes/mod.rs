pub mod auth;
pub mod follows;
pub mod health;
pub mod home;
pub mod messages;
pub mod users;

pub use auth::{login, logout, signup};
pub use follows::{approve_follow, follow_user, reject_follow, stop_following};
pub use health::health_check;
pub use home::homepage;
pub use messages::{delete_message, new_message, show_message, toggle_like};
pub use users::{
    change_password, change_password_form, delete_user, get_profile, list_users, show_followers,
    show_following, show_likes, show_requests, show_user, update_profile,
};
