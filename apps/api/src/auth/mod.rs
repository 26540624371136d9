// Authentication: Argon2id password hashes, HS256 session tokens, and the
// `Session` extractor that threads the signed-in user into handlers.

pub mod handlers;
pub mod jwt;
pub mod password;
pub mod session;

pub use session::{RequireAdmin, RequireCounselor, RequireStudent, Session};
