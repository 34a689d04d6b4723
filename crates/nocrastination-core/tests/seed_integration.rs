//! Integration tests for the synthetic data generator.

use std::collections::HashMap;

use chrono::Duration;
use nocrastination_core::{
    Database, ProductivityAggregator, SeedConfig, Seeder, TaskStatus,
};

fn seeded_db(config: SeedConfig) -> (Database, nocrastination_core::SeedSummary) {
    let db = Database::open_memory().unwrap();
    let summary = Seeder::new(config)
        .run(&db, &ProductivityAggregator::default())
        .unwrap();
    (db, summary)
}

#[test]
fn generated_dataset_is_internally_consistent() {
    let (db, summary) = seeded_db(SeedConfig {
        user_count: 3,
        seed: Some(1234),
        ..SeedConfig::default()
    });
    assert_eq!(summary.users, 3);
    assert_eq!(summary.profiles, 3);
    assert!(summary.tasks >= 3 * 5);

    for user in db.users().unwrap() {
        let tasks = db.tasks_for_user(&user.id).unwrap();
        assert!((5..=15).contains(&tasks.len()));

        for task in &tasks {
            // Completed iff completed_at; effort only for completed.
            assert_eq!(
                task.status == TaskStatus::Completed,
                task.completed_at.is_some()
            );
            if task.actual_minutes > 0 {
                assert_eq!(task.status, TaskStatus::Completed);
            }

            let sessions = db.sessions_for_task(&task.id).unwrap();
            match task.completed_at {
                Some(completed_at) => {
                    assert!((1..=4).contains(&sessions.len()));
                    for session in &sessions {
                        assert!(session.start_time <= completed_at);
                        assert_eq!(
                            session.end_time - session.start_time,
                            Duration::minutes(session.duration_minutes as i64)
                        );
                        assert_eq!(session.duration_minutes, 25);
                    }
                }
                None => assert!(sessions.is_empty()),
            }
        }

        for stat in db.daily_stats_for_user(&user.id).unwrap() {
            assert!((0.0..=100.0).contains(&stat.productivity_score));
            assert!(stat.tasks_completed > 0 || stat.total_work_minutes > 0);
        }
    }
}

#[test]
fn forced_completion_scenario() {
    // 1 user, fixed seed, exactly 5 tasks, all forced COMPLETED.
    let (db, summary) = seeded_db(SeedConfig {
        user_count: 1,
        min_tasks_per_user: 5,
        max_tasks_per_user: 5,
        seed: Some(99),
        force_completed: true,
        ..SeedConfig::default()
    });
    assert_eq!(summary.users, 1);
    assert_eq!(summary.tasks, 5);

    let user = &db.users().unwrap()[0];
    let tasks = db.tasks_for_user(&user.id).unwrap();
    assert_eq!(tasks.len(), 5);

    let mut completed_per_day: HashMap<chrono::NaiveDate, u32> = HashMap::new();
    for task in &tasks {
        assert_eq!(task.status, TaskStatus::Completed);
        let sessions = db.sessions_for_task(&task.id).unwrap();
        assert!((1..=4).contains(&sessions.len()));
        *completed_per_day
            .entry(task.completed_at.unwrap().date_naive())
            .or_default() += 1;
    }

    // Each day with a completion has a stat row matching the count.
    for (date, expected) in completed_per_day {
        let stat = db.daily_stat_on(&user.id, date).unwrap().unwrap();
        assert_eq!(stat.tasks_completed, expected);
    }
}

#[test]
fn same_seed_generates_identical_tasks() {
    let config = SeedConfig {
        user_count: 1,
        seed: Some(7),
        ..SeedConfig::default()
    };
    let (db_a, _) = seeded_db(config.clone());
    let (db_b, _) = seeded_db(config);

    let user_a = &db_a.users().unwrap()[0];
    let user_b = &db_b.users().unwrap()[0];
    let tasks_a = db_a.tasks_for_user(&user_a.id).unwrap();
    let tasks_b = db_b.tasks_for_user(&user_b.id).unwrap();

    assert_eq!(tasks_a.len(), tasks_b.len());
    for (a, b) in tasks_a.iter().zip(&tasks_b) {
        assert_eq!(a.title, b.title);
        assert_eq!(a.status, b.status);
        assert_eq!(a.priority, b.priority);
        assert_eq!(a.estimated_minutes, b.estimated_minutes);
    }
}

#[test]
fn seed_data_survives_a_wipe_and_reseed() {
    let (db, first) = seeded_db(SeedConfig {
        user_count: 2,
        seed: Some(5),
        ..SeedConfig::default()
    });

    let wiped = db.reset_all().unwrap();
    assert_eq!(wiped.deleted_users as u32, first.users);
    assert_eq!(wiped.deleted_tasks as u32, first.tasks);

    // Usernames are free again after the wipe.
    let again = Seeder::new(SeedConfig {
        user_count: 2,
        seed: Some(5),
        ..SeedConfig::default()
    })
    .run(&db, &ProductivityAggregator::default())
    .unwrap();
    assert_eq!(again.users, 2);
}
