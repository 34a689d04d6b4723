//! Typed entity schema registry.
//!
//! Declarative field constraints for every entity kind, consumed by the
//! storage layer at write time. Dispatch is a typed mapping from
//! [`EntityKind`] to its declared rules rather than string-keyed entity
//! names.

use std::fmt;

use crate::error::ValidationError;

/// Named record kind handled by the storage layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    User,
    UserProfile,
    Task,
    PomodoroSession,
    DailyStat,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::User,
        EntityKind::UserProfile,
        EntityKind::Task,
        EntityKind::PomodoroSession,
        EntityKind::DailyStat,
    ];

    /// Backing table name.
    pub fn table(&self) -> &'static str {
        match self {
            EntityKind::User => "users",
            EntityKind::UserProfile => "user_profiles",
            EntityKind::Task => "tasks",
            EntityKind::PomodoroSession => "pomodoro_sessions",
            EntityKind::DailyStat => "daily_stats",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EntityKind::User => "user",
            EntityKind::UserProfile => "user-profile",
            EntityKind::Task => "task",
            EntityKind::PomodoroSession => "pomodoro-session",
            EntityKind::DailyStat => "daily-stat",
        };
        write!(f, "{s}")
    }
}

/// Constraint on a single field.
#[derive(Debug, Clone, Copy)]
pub enum FieldRule {
    /// String length bounds (characters)
    Text { min: usize, max: usize },
    /// Integer range, inclusive
    Int { min: i64, max: i64 },
    /// Decimal range, inclusive
    Decimal { min: f64, max: f64 },
}

/// Declared constraints for one entity kind.
///
/// Fields without an entry are unconstrained.
pub struct EntitySchema {
    pub kind: EntityKind,
    fields: &'static [(&'static str, FieldRule)],
}

impl EntitySchema {
    /// Look up the rule for `field`, if any.
    pub fn rule(&self, field: &str) -> Option<&FieldRule> {
        self.fields
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, rule)| rule)
    }

    /// Check a string field against its declared length bounds.
    pub fn check_text(&self, field: &'static str, value: &str) -> Result<(), ValidationError> {
        if let Some(FieldRule::Text { min, max }) = self.rule(field) {
            let len = value.chars().count();
            if len < *min || len > *max {
                return Err(ValidationError::LengthOutOfRange {
                    field,
                    len,
                    min: *min,
                    max: *max,
                });
            }
        }
        Ok(())
    }

    /// Check an integer field against its declared range.
    pub fn check_int(&self, field: &'static str, value: i64) -> Result<(), ValidationError> {
        if let Some(FieldRule::Int { min, max }) = self.rule(field) {
            if value < *min || value > *max {
                return Err(ValidationError::OutOfRange {
                    field,
                    value,
                    min: *min,
                    max: *max,
                });
            }
        }
        Ok(())
    }

    /// Check a decimal field against its declared range.
    pub fn check_decimal(&self, field: &'static str, value: f64) -> Result<(), ValidationError> {
        if let Some(FieldRule::Decimal { min, max }) = self.rule(field) {
            if value < *min || value > *max {
                return Err(ValidationError::DecimalOutOfRange {
                    field,
                    value,
                    min: *min,
                    max: *max,
                });
            }
        }
        Ok(())
    }
}

static USER: EntitySchema = EntitySchema {
    kind: EntityKind::User,
    fields: &[
        ("username", FieldRule::Text { min: 1, max: 50 }),
        ("email", FieldRule::Text { min: 3, max: 254 }),
    ],
};

static USER_PROFILE: EntitySchema = EntitySchema {
    kind: EntityKind::UserProfile,
    fields: &[
        ("full_name", FieldRule::Text { min: 0, max: 100 }),
        ("daily_goal_minutes", FieldRule::Int { min: 30, max: 720 }),
        ("work_duration_minutes", FieldRule::Int { min: 5, max: 60 }),
        ("short_break_minutes", FieldRule::Int { min: 1, max: 15 }),
        ("long_break_minutes", FieldRule::Int { min: 10, max: 30 }),
    ],
};

static TASK: EntitySchema = EntitySchema {
    kind: EntityKind::Task,
    fields: &[
        ("title", FieldRule::Text { min: 3, max: 255 }),
        ("category", FieldRule::Text { min: 0, max: 50 }),
    ],
};

static POMODORO_SESSION: EntitySchema = EntitySchema {
    kind: EntityKind::PomodoroSession,
    fields: &[("duration_minutes", FieldRule::Int { min: 1, max: 60 })],
};

static DAILY_STAT: EntitySchema = EntitySchema {
    kind: EntityKind::DailyStat,
    fields: &[(
        "productivity_score",
        FieldRule::Decimal {
            min: 0.0,
            max: 100.0,
        },
    )],
};

/// Schema for `kind`.
pub fn schema(kind: EntityKind) -> &'static EntitySchema {
    match kind {
        EntityKind::User => &USER,
        EntityKind::UserProfile => &USER_PROFILE,
        EntityKind::Task => &TASK,
        EntityKind::PomodoroSession => &POMODORO_SESSION,
        EntityKind::DailyStat => &DAILY_STAT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_a_schema() {
        for kind in EntityKind::ALL {
            assert_eq!(schema(kind).kind, kind);
            assert!(!kind.table().is_empty());
        }
    }

    #[test]
    fn title_length_bounds() {
        let task = schema(EntityKind::Task);
        assert!(task.check_text("title", "ab").is_err());
        assert!(task.check_text("title", "abc").is_ok());
        assert!(task.check_text("title", &"x".repeat(256)).is_err());
        // Unconstrained fields pass
        assert!(task.check_text("description", "").is_ok());
    }

    #[test]
    fn duration_range() {
        let session = schema(EntityKind::PomodoroSession);
        assert!(session.check_int("duration_minutes", 0).is_err());
        assert!(session.check_int("duration_minutes", 25).is_ok());
        assert!(session.check_int("duration_minutes", 61).is_err());
    }

    #[test]
    fn score_range() {
        let stat = schema(EntityKind::DailyStat);
        assert!(stat.check_decimal("productivity_score", -0.1).is_err());
        assert!(stat.check_decimal("productivity_score", 100.0).is_ok());
        assert!(stat.check_decimal("productivity_score", 100.1).is_err());
    }
}
