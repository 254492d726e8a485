//! Default data seeding for first open.
//!
//! # Responsibility
//! - Install the starter set of final and daily goals on an empty store.
//!
//! # Invariants
//! - Seeding is guarded by a row count, not a marker record; it never runs
//!   when any final goal already exists.
//! - All seed rows are written in one transaction; a reader never observes
//!   a partially seeded store.

use crate::db::DbResult;
use log::info;
use rusqlite::{params, Connection, TransactionBehavior};
use std::time::{SystemTime, UNIX_EPOCH};

struct SeedFinalGoal {
    id: &'static str,
    title: &'static str,
}

struct SeedDailyGoal {
    id: &'static str,
    title: &'static str,
    pillar: &'static str,
    weight: u8,
    final_goal_id: &'static str,
}

const SEED_FINAL_GOALS: &[SeedFinalGoal] = &[
    SeedFinalGoal {
        id: "f1",
        title: "100k CA",
    },
    SeedFinalGoal {
        id: "f2",
        title: "Délocaliser société",
    },
    SeedFinalGoal {
        id: "f3",
        title: "+10kg muscle",
    },
    SeedFinalGoal {
        id: "f4",
        title: "Déménager Italie/USA",
    },
];

const SEED_DAILY_GOALS: &[SeedDailyGoal] = &[
    SeedDailyGoal {
        id: "d1",
        title: "1 action business",
        pillar: "business",
        weight: 5,
        final_goal_id: "f1",
    },
    SeedDailyGoal {
        id: "d2",
        title: "1 action délocalisation",
        pillar: "structure",
        weight: 4,
        final_goal_id: "f2",
    },
    SeedDailyGoal {
        id: "d3",
        title: "Training",
        pillar: "corps",
        weight: 5,
        final_goal_id: "f3",
    },
    SeedDailyGoal {
        id: "d4",
        title: "Nutrition OK",
        pillar: "corps",
        weight: 3,
        final_goal_id: "f3",
    },
    SeedDailyGoal {
        id: "d5",
        title: "1 action vision",
        pillar: "vision",
        weight: 4,
        final_goal_id: "f4",
    },
];

/// Seeds the starter goals when the store holds no final goals yet.
///
/// # Side effects
/// - Emits a `db_seed` logging event when seeding runs.
pub fn seed_defaults(conn: &mut Connection) -> DbResult<()> {
    let final_goal_count: i64 =
        conn.query_row("SELECT COUNT(*) FROM final_goals;", [], |row| row.get(0))?;
    if final_goal_count > 0 {
        return Ok(());
    }

    let created_at = now_epoch_ms();
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    for goal in SEED_FINAL_GOALS {
        tx.execute(
            "INSERT INTO final_goals (id, title, created_at) VALUES (?1, ?2, ?3);",
            params![goal.id, goal.title, created_at],
        )?;
    }

    for goal in SEED_DAILY_GOALS {
        tx.execute(
            "INSERT INTO daily_goals (id, title, pillar, weight, final_goal_id)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![goal.id, goal.title, goal.pillar, goal.weight, goal.final_goal_id],
        )?;
    }

    tx.commit()?;

    info!(
        "event=db_seed module=db status=ok final_goals={} daily_goals={}",
        SEED_FINAL_GOALS.len(),
        SEED_DAILY_GOALS.len()
    );

    Ok(())
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}
