//! Entity model: users, profiles, tasks, pomodoro sessions, daily stats.
//!
//! All wire values (serde and database TEXT columns) use upper-case
//! enumeration spellings: `TODO`, `IN_PROGRESS`, `COMPLETED`, `CANCELLED`;
//! `HIGH`/`MEDIUM`/`LOW`; `WORK`, `SHORT_BREAK`, `LONG_BREAK`.

mod daily_stat;
mod profile;
mod session;
mod task;
mod user;

pub use daily_stat::DailyStat;
pub use profile::UserProfile;
pub use session::{PomodoroSession, SessionType};
pub use task::{Task, TaskPriority, TaskStatus};
pub use user::User;
