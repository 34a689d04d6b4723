pub mod profile;
pub mod seed;
pub mod session;
pub mod stats;
pub mod task;
pub mod user;
