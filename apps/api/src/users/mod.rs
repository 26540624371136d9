// Users: persistence, own-account settings, the student profile, and admin
// account management.

pub mod account;
pub mod handlers;
pub mod profile;
pub mod store;
