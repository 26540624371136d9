// Dashboard statistics. Counting is pure; handlers only fetch rows.

pub mod handlers;
pub mod stats;
