//! SQLite-based storage for users, profiles, tasks, sessions, and daily
//! stats.
//!
//! All timestamps are stored as RFC3339 TEXT in UTC, so lexicographic
//! comparison in SQL matches chronological order. Field constraints from
//! the schema registry are checked at write time; callers do not
//! pre-validate.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use super::{data_dir, SessionRollup, Store};
use crate::entity::{
    DailyStat, PomodoroSession, SessionType, Task, TaskPriority, TaskStatus, User, UserProfile,
};
use crate::error::{DatabaseError, Result, ValidationError};
use crate::schema::{schema, EntityKind};

// === Helper Functions ===

/// Parse task status from database string
fn parse_task_status(status_str: &str) -> TaskStatus {
    match status_str {
        "IN_PROGRESS" => TaskStatus::InProgress,
        "COMPLETED" => TaskStatus::Completed,
        "CANCELLED" => TaskStatus::Cancelled,
        _ => TaskStatus::Todo,
    }
}

/// Format task status for database storage
fn format_task_status(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Todo => "TODO",
        TaskStatus::InProgress => "IN_PROGRESS",
        TaskStatus::Completed => "COMPLETED",
        TaskStatus::Cancelled => "CANCELLED",
    }
}

/// Parse task priority from database string
fn parse_task_priority(priority_str: &str) -> TaskPriority {
    match priority_str {
        "HIGH" => TaskPriority::High,
        "LOW" => TaskPriority::Low,
        _ => TaskPriority::Medium,
    }
}

/// Format task priority for database storage
fn format_task_priority(priority: TaskPriority) -> &'static str {
    match priority {
        TaskPriority::High => "HIGH",
        TaskPriority::Medium => "MEDIUM",
        TaskPriority::Low => "LOW",
    }
}

/// Parse session type from database string
fn parse_session_type(type_str: &str) -> SessionType {
    match type_str {
        "SHORT_BREAK" => SessionType::ShortBreak,
        "LONG_BREAK" => SessionType::LongBreak,
        _ => SessionType::Work,
    }
}

/// Format session type for database storage
fn format_session_type(session_type: SessionType) -> &'static str {
    match session_type {
        SessionType::Work => "WORK",
        SessionType::ShortBreak => "SHORT_BREAK",
        SessionType::LongBreak => "LONG_BREAK",
    }
}

/// Parse an RFC3339 TEXT column. Unparsable values surface as query
/// errors rather than being silently replaced.
fn parse_datetime(idx: usize, dt_str: &str) -> Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(dt_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}

/// Parse an optional RFC3339 TEXT column
fn parse_opt_datetime(
    idx: usize,
    dt_str: Option<String>,
) -> Result<Option<DateTime<Utc>>, rusqlite::Error> {
    dt_str.as_deref().map(|s| parse_datetime(idx, s)).transpose()
}

/// Parse a `YYYY-MM-DD` TEXT column
fn parse_date(idx: usize, date_str: &str) -> Result<NaiveDate, rusqlite::Error> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// UTC day bounds for `date` as RFC3339 strings, half-open `[start, end)`.
fn day_bounds(date: NaiveDate) -> (String, String) {
    let start = date.and_time(NaiveTime::MIN).and_utc();
    let end = start + Duration::days(1);
    (start.to_rfc3339(), end.to_rfc3339())
}

/// Build a Task from a database row
fn row_to_task(row: &rusqlite::Row) -> Result<Task, rusqlite::Error> {
    let status_str: String = row.get(5)?;
    let priority_str: String = row.get(6)?;
    Ok(Task {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        category: row.get(4)?,
        status: parse_task_status(&status_str),
        priority: parse_task_priority(&priority_str),
        due_date: parse_opt_datetime(7, row.get(7)?)?,
        estimated_minutes: row.get(8)?,
        actual_minutes: row.get(9)?,
        completed_at: parse_opt_datetime(10, row.get(10)?)?,
        created_at: parse_datetime(11, &row.get::<_, String>(11)?)?,
    })
}

const TASK_COLUMNS: &str = "id, user_id, title, description, category, status, priority, \
     due_date, estimated_minutes, actual_minutes, completed_at, created_at";

/// Build a PomodoroSession from a database row
fn row_to_session(row: &rusqlite::Row) -> Result<PomodoroSession, rusqlite::Error> {
    let type_str: String = row.get(3)?;
    Ok(PomodoroSession {
        id: row.get(0)?,
        user_id: row.get(1)?,
        task_id: row.get(2)?,
        session_type: parse_session_type(&type_str),
        start_time: parse_datetime(4, &row.get::<_, String>(4)?)?,
        end_time: parse_datetime(5, &row.get::<_, String>(5)?)?,
        duration_minutes: row.get(6)?,
        interruptions: row.get(7)?,
        completed: row.get(8)?,
        notes: row.get(9)?,
    })
}

const SESSION_COLUMNS: &str = "id, user_id, task_id, session_type, start_time, end_time, \
     duration_minutes, interruptions, completed, notes";

/// Build a DailyStat from a database row
fn row_to_stat(row: &rusqlite::Row) -> Result<DailyStat, rusqlite::Error> {
    let date_str: String = row.get(2)?;
    let date = parse_date(2, &date_str)?;
    Ok(DailyStat {
        id: row.get(0)?,
        user_id: row.get(1)?,
        date,
        tasks_completed: row.get(3)?,
        tasks_created: row.get(4)?,
        total_pomodoro_sessions: row.get(5)?,
        total_work_minutes: row.get(6)?,
        total_break_minutes: row.get(7)?,
        productivity_score: row.get(8)?,
    })
}

const STAT_COLUMNS: &str = "id, user_id, date, tasks_completed, tasks_created, \
     total_pomodoro_sessions, total_work_minutes, total_break_minutes, productivity_score";

// === Write-time validation ===

fn validate_user(user: &User) -> Result<(), ValidationError> {
    let s = schema(EntityKind::User);
    s.check_text("username", &user.username)?;
    s.check_text("email", &user.email)?;
    if !user.email.contains('@') {
        return Err(ValidationError::InvalidValue {
            field: "email",
            message: format!("'{}' is not an email address", user.email),
        });
    }
    Ok(())
}

fn validate_profile(profile: &UserProfile) -> Result<(), ValidationError> {
    let s = schema(EntityKind::UserProfile);
    if let Some(full_name) = &profile.full_name {
        s.check_text("full_name", full_name)?;
    }
    s.check_int("daily_goal_minutes", profile.daily_goal_minutes as i64)?;
    s.check_int("work_duration_minutes", profile.work_duration_minutes as i64)?;
    s.check_int("short_break_minutes", profile.short_break_minutes as i64)?;
    s.check_int("long_break_minutes", profile.long_break_minutes as i64)?;
    Ok(())
}

fn validate_task(task: &Task) -> Result<(), ValidationError> {
    let s = schema(EntityKind::Task);
    s.check_text("title", &task.title)?;
    if let Some(category) = &task.category {
        s.check_text("category", category)?;
    }
    let completed = task.status == TaskStatus::Completed;
    if completed != task.completed_at.is_some() {
        return Err(ValidationError::InvalidValue {
            field: "completed_at",
            message: format!(
                "must be set if and only if status is COMPLETED (status: {})",
                task.status
            ),
        });
    }
    if task.actual_minutes > 0 && !completed {
        return Err(ValidationError::InvalidValue {
            field: "actual_minutes",
            message: format!("must be 0 unless status is COMPLETED (status: {})", task.status),
        });
    }
    Ok(())
}

fn validate_session(session: &PomodoroSession) -> Result<(), ValidationError> {
    let s = schema(EntityKind::PomodoroSession);
    s.check_int("duration_minutes", session.duration_minutes as i64)?;
    let expected_end = session.start_time + Duration::minutes(session.duration_minutes as i64);
    if session.end_time != expected_end {
        return Err(ValidationError::InvalidValue {
            field: "end_time",
            message: format!(
                "must equal start_time + duration_minutes (expected {}, got {})",
                expected_end.to_rfc3339(),
                session.end_time.to_rfc3339()
            ),
        });
    }
    Ok(())
}

fn validate_stat(stat: &DailyStat) -> Result<(), ValidationError> {
    schema(EntityKind::DailyStat).check_decimal("productivity_score", stat.productivity_score)
}

/// SQLite database for nocrastination data.
///
/// Deletes cascade: removing a user removes its profile, tasks, sessions,
/// and daily stats; removing a task removes its sessions.
pub struct Database {
    conn: Connection,
}

/// Row counts removed by [`Database::reset_all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct ResetSummary {
    pub deleted_users: usize,
    pub deleted_profiles: usize,
    pub deleted_tasks: usize,
    pub deleted_sessions: usize,
    pub deleted_daily_stats: usize,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `~/.config/nocrastination/nocrastination.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        let path = data_dir()?.join("nocrastination.db");
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, Box<dyn std::error::Error>> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, Box<dyn std::error::Error>> {
        // Foreign keys are per-connection in SQLite; cascades depend on it.
        conn.pragma_update(None, "foreign_keys", "ON")?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS users (
                id         TEXT PRIMARY KEY,
                username   TEXT NOT NULL UNIQUE,
                email      TEXT NOT NULL UNIQUE,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS user_profiles (
                id                    TEXT PRIMARY KEY,
                user_id               TEXT NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
                full_name             TEXT,
                bio                   TEXT,
                timezone              TEXT NOT NULL DEFAULT 'Europe/Lisbon',
                daily_goal_minutes    INTEGER NOT NULL DEFAULT 240,
                work_duration_minutes INTEGER NOT NULL DEFAULT 25,
                short_break_minutes   INTEGER NOT NULL DEFAULT 5,
                long_break_minutes    INTEGER NOT NULL DEFAULT 15
            );

            CREATE TABLE IF NOT EXISTS tasks (
                id                TEXT PRIMARY KEY,
                user_id           TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                title             TEXT NOT NULL,
                description       TEXT,
                category          TEXT,
                status            TEXT NOT NULL DEFAULT 'TODO',
                priority          TEXT NOT NULL DEFAULT 'MEDIUM',
                due_date          TEXT,
                estimated_minutes INTEGER NOT NULL DEFAULT 0,
                actual_minutes    INTEGER NOT NULL DEFAULT 0,
                completed_at      TEXT,
                created_at        TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS pomodoro_sessions (
                id               TEXT PRIMARY KEY,
                user_id          TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                task_id          TEXT NOT NULL REFERENCES tasks(id) ON DELETE CASCADE,
                session_type     TEXT NOT NULL DEFAULT 'WORK',
                start_time       TEXT NOT NULL,
                end_time         TEXT NOT NULL,
                duration_minutes INTEGER NOT NULL DEFAULT 25,
                interruptions    INTEGER NOT NULL DEFAULT 0,
                completed        INTEGER NOT NULL DEFAULT 1,
                notes            TEXT
            );

            CREATE TABLE IF NOT EXISTS daily_stats (
                id                      TEXT PRIMARY KEY,
                user_id                 TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                date                    TEXT NOT NULL,
                tasks_completed         INTEGER NOT NULL DEFAULT 0,
                tasks_created           INTEGER NOT NULL DEFAULT 0,
                total_pomodoro_sessions INTEGER NOT NULL DEFAULT 0,
                total_work_minutes      INTEGER NOT NULL DEFAULT 0,
                total_break_minutes     INTEGER NOT NULL DEFAULT 0,
                productivity_score      REAL NOT NULL DEFAULT 0.0,
                UNIQUE (user_id, date)
            );

            -- Indexes for the aggregator's per-day lookups
            CREATE INDEX IF NOT EXISTS idx_tasks_user ON tasks(user_id);
            CREATE INDEX IF NOT EXISTS idx_tasks_user_completed_at ON tasks(user_id, completed_at);
            CREATE INDEX IF NOT EXISTS idx_sessions_task ON pomodoro_sessions(task_id);
            CREATE INDEX IF NOT EXISTS idx_sessions_user_start ON pomodoro_sessions(user_id, start_time);
            CREATE INDEX IF NOT EXISTS idx_daily_stats_user_date ON daily_stats(user_id, date);",
        )?;
        Ok(())
    }

    // === User CRUD ===

    pub fn user(&self, id: &str) -> Result<User> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, username, email, created_at FROM users WHERE id = ?1")?;
        let user = stmt
            .query_row(params![id], |row| {
                Ok(User {
                    id: row.get(0)?,
                    username: row.get(1)?,
                    email: row.get(2)?,
                    created_at: parse_datetime(3, &row.get::<_, String>(3)?)?,
                })
            })
            .optional()?;
        user.ok_or_else(|| {
            DatabaseError::NotFound {
                entity: "user",
                id: id.to_string(),
            }
            .into()
        })
    }

    pub fn users(&self) -> Result<Vec<User>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, username, email, created_at FROM users ORDER BY username")?;
        let rows = stmt.query_map([], |row| {
            Ok(User {
                id: row.get(0)?,
                username: row.get(1)?,
                email: row.get(2)?,
                created_at: parse_datetime(3, &row.get::<_, String>(3)?)?,
            })
        })?;
        let mut users = Vec::new();
        for row in rows {
            users.push(row?);
        }
        Ok(users)
    }

    pub fn delete_user(&self, id: &str) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM users WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(DatabaseError::NotFound {
                entity: "user",
                id: id.to_string(),
            }
            .into());
        }
        Ok(())
    }

    // === Profile CRUD ===

    pub fn profile_for_user(&self, user_id: &str) -> Result<UserProfile> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, full_name, bio, timezone, daily_goal_minutes,
                    work_duration_minutes, short_break_minutes, long_break_minutes
             FROM user_profiles WHERE user_id = ?1",
        )?;
        let profile = stmt
            .query_row(params![user_id], |row| {
                Ok(UserProfile {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    full_name: row.get(2)?,
                    bio: row.get(3)?,
                    timezone: row.get(4)?,
                    daily_goal_minutes: row.get(5)?,
                    work_duration_minutes: row.get(6)?,
                    short_break_minutes: row.get(7)?,
                    long_break_minutes: row.get(8)?,
                })
            })
            .optional()?;
        profile.ok_or_else(|| {
            DatabaseError::NotFound {
                entity: "user-profile",
                id: user_id.to_string(),
            }
            .into()
        })
    }

    pub fn update_profile(&self, profile: &UserProfile) -> Result<()> {
        validate_profile(profile)?;
        let changed = self.conn.execute(
            "UPDATE user_profiles
             SET full_name = ?2, bio = ?3, timezone = ?4, daily_goal_minutes = ?5,
                 work_duration_minutes = ?6, short_break_minutes = ?7, long_break_minutes = ?8
             WHERE id = ?1",
            params![
                profile.id,
                profile.full_name,
                profile.bio,
                profile.timezone,
                profile.daily_goal_minutes,
                profile.work_duration_minutes,
                profile.short_break_minutes,
                profile.long_break_minutes,
            ],
        )?;
        if changed == 0 {
            return Err(DatabaseError::NotFound {
                entity: "user-profile",
                id: profile.id.clone(),
            }
            .into());
        }
        Ok(())
    }

    // === Task CRUD ===

    pub fn task(&self, id: &str) -> Result<Task> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"))?;
        let task = stmt.query_row(params![id], row_to_task).optional()?;
        task.ok_or_else(|| {
            DatabaseError::NotFound {
                entity: "task",
                id: id.to_string(),
            }
            .into()
        })
    }

    pub fn tasks_for_user(&self, user_id: &str) -> Result<Vec<Task>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE user_id = ?1 ORDER BY created_at"
        ))?;
        let rows = stmt.query_map(params![user_id], row_to_task)?;
        let mut tasks = Vec::new();
        for row in rows {
            tasks.push(row?);
        }
        Ok(tasks)
    }

    pub fn update_task(&self, task: &Task) -> Result<()> {
        validate_task(task)?;
        let changed = self.conn.execute(
            "UPDATE tasks
             SET title = ?2, description = ?3, category = ?4, status = ?5, priority = ?6,
                 due_date = ?7, estimated_minutes = ?8, actual_minutes = ?9, completed_at = ?10
             WHERE id = ?1",
            params![
                task.id,
                task.title,
                task.description,
                task.category,
                format_task_status(task.status),
                format_task_priority(task.priority),
                task.due_date.map(|dt| dt.to_rfc3339()),
                task.estimated_minutes,
                task.actual_minutes,
                task.completed_at.map(|dt| dt.to_rfc3339()),
            ],
        )?;
        if changed == 0 {
            return Err(DatabaseError::NotFound {
                entity: "task",
                id: task.id.clone(),
            }
            .into());
        }
        Ok(())
    }

    /// Mark a task completed now, recording actual effort.
    pub fn complete_task(&self, id: &str, actual_minutes: u32) -> Result<Task> {
        let mut task = self.task(id)?;
        task.complete(Utc::now(), actual_minutes);
        self.update_task(&task)?;
        Ok(task)
    }

    /// Delete a task. Its pomodoro sessions are deleted with it.
    pub fn delete_task(&self, id: &str) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(DatabaseError::NotFound {
                entity: "task",
                id: id.to_string(),
            }
            .into());
        }
        Ok(())
    }

    // === Session CRUD ===

    pub fn session(&self, id: &str) -> Result<PomodoroSession> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {SESSION_COLUMNS} FROM pomodoro_sessions WHERE id = ?1"
        ))?;
        let session = stmt.query_row(params![id], row_to_session).optional()?;
        session.ok_or_else(|| {
            DatabaseError::NotFound {
                entity: "pomodoro-session",
                id: id.to_string(),
            }
            .into()
        })
    }

    pub fn sessions_for_task(&self, task_id: &str) -> Result<Vec<PomodoroSession>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {SESSION_COLUMNS} FROM pomodoro_sessions WHERE task_id = ?1 ORDER BY start_time"
        ))?;
        let rows = stmt.query_map(params![task_id], row_to_session)?;
        let mut sessions = Vec::new();
        for row in rows {
            sessions.push(row?);
        }
        Ok(sessions)
    }

    pub fn sessions_for_user(&self, user_id: &str) -> Result<Vec<PomodoroSession>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {SESSION_COLUMNS} FROM pomodoro_sessions WHERE user_id = ?1 ORDER BY start_time"
        ))?;
        let rows = stmt.query_map(params![user_id], row_to_session)?;
        let mut sessions = Vec::new();
        for row in rows {
            sessions.push(row?);
        }
        Ok(sessions)
    }

    // === Daily stats ===

    pub fn daily_stat_on(&self, user_id: &str, date: NaiveDate) -> Result<Option<DailyStat>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {STAT_COLUMNS} FROM daily_stats WHERE user_id = ?1 AND date = ?2"
        ))?;
        let stat = stmt
            .query_row(
                params![user_id, date.format("%Y-%m-%d").to_string()],
                row_to_stat,
            )
            .optional()?;
        Ok(stat)
    }

    pub fn daily_stats_for_user(&self, user_id: &str) -> Result<Vec<DailyStat>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {STAT_COLUMNS} FROM daily_stats WHERE user_id = ?1 ORDER BY date"
        ))?;
        let rows = stmt.query_map(params![user_id], row_to_stat)?;
        let mut stats = Vec::new();
        for row in rows {
            stats.push(row?);
        }
        Ok(stats)
    }

    // === Reset ===

    /// Delete all rows from every table. Counts are taken per table before
    /// the cascading user delete so the summary reflects what was removed.
    pub fn reset_all(&self) -> Result<ResetSummary> {
        let count = |table: &str| -> Result<usize, rusqlite::Error> {
            self.conn
                .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                    row.get::<_, i64>(0)
                })
                .map(|n| n as usize)
        };
        let summary = ResetSummary {
            deleted_users: count("users")?,
            deleted_profiles: count("user_profiles")?,
            deleted_tasks: count("tasks")?,
            deleted_sessions: count("pomodoro_sessions")?,
            deleted_daily_stats: count("daily_stats")?,
        };
        self.conn.execute("DELETE FROM users", [])?;
        Ok(summary)
    }
}

impl Store for Database {
    fn create_user(&self, user: &User) -> Result<()> {
        validate_user(user)?;
        self.conn.execute(
            "INSERT INTO users (id, username, email, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                user.id,
                user.username,
                user.email,
                user.created_at.to_rfc3339()
            ],
        )?;
        Ok(())
    }

    fn create_profile(&self, profile: &UserProfile) -> Result<()> {
        validate_profile(profile)?;
        self.conn.execute(
            "INSERT INTO user_profiles (id, user_id, full_name, bio, timezone,
                 daily_goal_minutes, work_duration_minutes, short_break_minutes, long_break_minutes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                profile.id,
                profile.user_id,
                profile.full_name,
                profile.bio,
                profile.timezone,
                profile.daily_goal_minutes,
                profile.work_duration_minutes,
                profile.short_break_minutes,
                profile.long_break_minutes,
            ],
        )?;
        Ok(())
    }

    fn create_task(&self, task: &Task) -> Result<()> {
        validate_task(task)?;
        self.conn.execute(
            "INSERT INTO tasks (id, user_id, title, description, category, status, priority,
                 due_date, estimated_minutes, actual_minutes, completed_at, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                task.id,
                task.user_id,
                task.title,
                task.description,
                task.category,
                format_task_status(task.status),
                format_task_priority(task.priority),
                task.due_date.map(|dt| dt.to_rfc3339()),
                task.estimated_minutes,
                task.actual_minutes,
                task.completed_at.map(|dt| dt.to_rfc3339()),
                task.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    fn create_session(&self, session: &PomodoroSession) -> Result<()> {
        validate_session(session)?;
        self.conn.execute(
            "INSERT INTO pomodoro_sessions (id, user_id, task_id, session_type, start_time,
                 end_time, duration_minutes, interruptions, completed, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                session.id,
                session.user_id,
                session.task_id,
                format_session_type(session.session_type),
                session.start_time.to_rfc3339(),
                session.end_time.to_rfc3339(),
                session.duration_minutes,
                session.interruptions,
                session.completed,
                session.notes,
            ],
        )?;
        Ok(())
    }

    fn upsert_daily_stat(&self, stat: &DailyStat) -> Result<()> {
        validate_stat(stat)?;
        self.conn.execute(
            "INSERT INTO daily_stats (id, user_id, date, tasks_completed, tasks_created,
                 total_pomodoro_sessions, total_work_minutes, total_break_minutes, productivity_score)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
             ON CONFLICT (user_id, date) DO UPDATE SET
                 tasks_completed = excluded.tasks_completed,
                 tasks_created = excluded.tasks_created,
                 total_pomodoro_sessions = excluded.total_pomodoro_sessions,
                 total_work_minutes = excluded.total_work_minutes,
                 total_break_minutes = excluded.total_break_minutes,
                 productivity_score = excluded.productivity_score",
            params![
                stat.id,
                stat.user_id,
                stat.date.format("%Y-%m-%d").to_string(),
                stat.tasks_completed,
                stat.tasks_created,
                stat.total_pomodoro_sessions,
                stat.total_work_minutes,
                stat.total_break_minutes,
                stat.productivity_score,
            ],
        )?;
        Ok(())
    }

    fn completed_tasks_on(&self, user_id: &str, date: NaiveDate) -> Result<u32> {
        let (start, end) = day_bounds(date);
        let count: u32 = self.conn.query_row(
            "SELECT COUNT(*) FROM tasks
             WHERE user_id = ?1 AND status = 'COMPLETED'
               AND completed_at >= ?2 AND completed_at < ?3",
            params![user_id, start, end],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    fn created_tasks_on(&self, user_id: &str, date: NaiveDate) -> Result<u32> {
        let (start, end) = day_bounds(date);
        let count: u32 = self.conn.query_row(
            "SELECT COUNT(*) FROM tasks
             WHERE user_id = ?1 AND created_at >= ?2 AND created_at < ?3",
            params![user_id, start, end],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    fn session_rollup_on(&self, user_id: &str, date: NaiveDate) -> Result<SessionRollup> {
        let (start, end) = day_bounds(date);
        let mut stmt = self.conn.prepare(
            "SELECT session_type, COUNT(*), COALESCE(SUM(duration_minutes), 0)
             FROM pomodoro_sessions
             WHERE user_id = ?1 AND start_time >= ?2 AND start_time < ?3
             GROUP BY session_type",
        )?;
        let rows = stmt.query_map(params![user_id, start, end], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, u32>(1)?,
                row.get::<_, u32>(2)?,
            ))
        })?;

        let mut rollup = SessionRollup::default();
        for row in rows {
            let (session_type, count, minutes) = row?;
            rollup.sessions += count;
            match session_type.as_str() {
                "WORK" => rollup.work_minutes += minutes,
                "SHORT_BREAK" | "LONG_BREAK" => rollup.break_minutes += minutes,
                _ => {}
            }
        }
        Ok(rollup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    fn user_with_tasks(db: &Database) -> (User, Task) {
        let user = User::new("alice", "alice@example.com");
        db.create_user(&user).unwrap();
        let mut task = Task::new(&user.id, "Write quarterly report");
        task.complete(Utc::now(), 50);
        db.create_task(&task).unwrap();
        (user, task)
    }

    #[test]
    fn not_found_is_distinct() {
        let db = Database::open_memory().unwrap();
        let err = db.task("missing").unwrap_err();
        assert!(matches!(
            err,
            CoreError::Database(DatabaseError::NotFound { entity: "task", .. })
        ));
    }

    #[test]
    fn corrupt_timestamp_surfaces_as_query_error() {
        let db = Database::open_memory().unwrap();
        let (user, task) = user_with_tasks(&db);

        db.conn()
            .execute(
                "UPDATE tasks SET created_at = 'not-a-timestamp' WHERE id = ?1",
                params![task.id],
            )
            .unwrap();
        let err = db.task(&task.id).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Database(DatabaseError::QueryFailed(_))
        ));

        db.conn()
            .execute(
                "UPDATE users SET created_at = '2026-99-99' WHERE id = ?1",
                params![user.id],
            )
            .unwrap();
        assert!(matches!(
            db.user(&user.id).unwrap_err(),
            CoreError::Database(DatabaseError::QueryFailed(_))
        ));
    }

    #[test]
    fn duplicate_email_is_a_constraint_error() {
        let db = Database::open_memory().unwrap();
        db.create_user(&User::new("alice", "alice@example.com"))
            .unwrap();
        let err = db
            .create_user(&User::new("alice2", "alice@example.com"))
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Database(DatabaseError::Constraint(_))
        ));
    }

    #[test]
    fn completed_at_must_match_status() {
        let db = Database::open_memory().unwrap();
        let user = User::new("bob", "bob@example.com");
        db.create_user(&user).unwrap();

        let mut task = Task::new(&user.id, "Inconsistent task");
        task.completed_at = Some(Utc::now()); // status still TODO
        let err = db.create_task(&task).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));

        let mut task = Task::new(&user.id, "Effort without completion");
        task.actual_minutes = 30;
        let err = db.create_task(&task).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn session_end_must_match_duration() {
        let db = Database::open_memory().unwrap();
        let (user, task) = user_with_tasks(&db);

        let mut session = PomodoroSession::work(&user.id, &task.id, Utc::now(), 25);
        session.end_time = session.start_time + Duration::minutes(30);
        let err = db.create_session(&session).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));

        let err = db
            .create_session(&PomodoroSession::work(&user.id, &task.id, Utc::now(), 90))
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn deleting_a_task_cascades_to_sessions() {
        let db = Database::open_memory().unwrap();
        let (user, task) = user_with_tasks(&db);
        db.create_session(&PomodoroSession::work(&user.id, &task.id, Utc::now(), 25))
            .unwrap();
        assert_eq!(db.sessions_for_task(&task.id).unwrap().len(), 1);

        db.delete_task(&task.id).unwrap();
        assert!(db.sessions_for_task(&task.id).unwrap().is_empty());
        assert!(db.sessions_for_user(&user.id).unwrap().is_empty());
    }

    #[test]
    fn deleting_a_user_cascades_everywhere() {
        let db = Database::open_memory().unwrap();
        let (user, task) = user_with_tasks(&db);
        db.create_profile(&UserProfile::new(&user.id)).unwrap();
        db.create_session(&PomodoroSession::work(&user.id, &task.id, Utc::now(), 25))
            .unwrap();

        db.delete_user(&user.id).unwrap();
        assert!(matches!(
            db.profile_for_user(&user.id).unwrap_err(),
            CoreError::Database(DatabaseError::NotFound { .. })
        ));
        assert!(db.tasks_for_user(&user.id).unwrap().is_empty());
    }

    #[test]
    fn daily_stat_upsert_replaces_row() {
        let db = Database::open_memory().unwrap();
        let (user, _) = user_with_tasks(&db);
        let date = Utc::now().date_naive();

        let mut stat = DailyStat::empty(&user.id, date);
        stat.tasks_completed = 1;
        db.upsert_daily_stat(&stat).unwrap();

        stat.tasks_completed = 2;
        db.upsert_daily_stat(&stat).unwrap();

        let stored = db.daily_stat_on(&user.id, date).unwrap().unwrap();
        assert_eq!(stored.tasks_completed, 2);
        assert_eq!(db.daily_stats_for_user(&user.id).unwrap().len(), 1);
    }

    #[test]
    fn rollup_splits_work_and_break_minutes() {
        let db = Database::open_memory().unwrap();
        let (user, task) = user_with_tasks(&db);
        // Anchor to a fixed instant safely inside a day so the two sessions
        // never straddle UTC midnight (see REVIEW_FINDINGS.md F6).
        let start = (Utc::now().date_naive() - Duration::days(1))
            .and_hms_opt(12, 0, 0)
            .unwrap()
            .and_utc();

        db.create_session(&PomodoroSession::work(&user.id, &task.id, start, 25))
            .unwrap();
        let mut brk = PomodoroSession::work(&user.id, &task.id, start + Duration::minutes(25), 5);
        brk.session_type = SessionType::ShortBreak;
        db.create_session(&brk).unwrap();

        let rollup = db
            .session_rollup_on(&user.id, start.date_naive())
            .unwrap();
        assert_eq!(rollup.sessions, 2);
        assert_eq!(rollup.work_minutes, 25);
        assert_eq!(rollup.break_minutes, 5);
    }

    #[test]
    fn reset_counts_removed_rows() {
        let db = Database::open_memory().unwrap();
        let (user, task) = user_with_tasks(&db);
        db.create_session(&PomodoroSession::work(&user.id, &task.id, Utc::now(), 25))
            .unwrap();

        let summary = db.reset_all().unwrap();
        assert_eq!(summary.deleted_users, 1);
        assert_eq!(summary.deleted_tasks, 1);
        assert_eq!(summary.deleted_sessions, 1);
        assert!(db.users().unwrap().is_empty());
    }
}
