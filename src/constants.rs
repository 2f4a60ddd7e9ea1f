/// Maximum message length in characters (matches the VARCHAR(140) column)
pub const MAX_MESSAGE_LEN: usize = 140;

/// Maximum number of messages returned by the home feed
pub const HOME_FEED_LIMIT: i64 = 100;

/// Minimum password length accepted at signup and password change
pub const MIN_PASSWORD_LEN: usize = 6;

/// Number of random bytes in a session token (hex-encoded to 64 chars)
pub const SESSION_TOKEN_BYTES: usize = 32;

/// Default profile picture when signup omits one
pub const DEFAULT_IMAGE_URL: &str = "/static/images/default-pic.png";

/// Default profile header image
pub const DEFAULT_HEADER_IMAGE_URL: &str = "/static/images/header-default.jpg";

// =============================================================================
// Error Messages
// =============================================================================

/// Error message for anonymous access to a protected endpoint
pub const ERR_ACCESS_UNAUTHORIZED: &str = "Access unauthorized";

/// Error message for a failed login (deliberately does not distinguish
/// unknown username from wrong password)
pub const ERR_INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Error message for a duplicate username or email at signup
pub const ERR_USERNAME_TAKEN: &str = "Username or email already taken";

/// Error message for a self-follow attempt
pub const ERR_CANNOT_FOLLOW_SELF: &str = "You cannot follow yourself";

/// Error message for a duplicate follow edge
pub const ERR_ALREADY_FOLLOWING: &str = "Already following this user";

/// Error message for a duplicate pending follow request
pub const ERR_REQUEST_ALREADY_SENT: &str = "Follow request already sent";
