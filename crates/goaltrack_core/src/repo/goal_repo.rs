//! Goal repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over `final_goals` and `daily_goals`.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths call `validate()` before SQL mutations, plus the
//!   referential check for `daily_goals.final_goal_id`.
//! - Deleting a final goal removes its daily goals in the same transaction.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::model::goal::{DailyGoal, FinalGoal, GoalValidationError, Pillar};
use rusqlite::{params, Connection, ErrorCode, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const FINAL_GOAL_SELECT_SQL: &str = "SELECT id, title, created_at FROM final_goals";
const DAILY_GOAL_SELECT_SQL: &str =
    "SELECT id, title, pillar, weight, final_goal_id FROM daily_goals";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for goal and entry persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(GoalValidationError),
    Db(DbError),
    /// `add_*` was called for a key that already exists.
    Duplicate(String),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Duplicate(id) => write!(f, "record already exists: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Duplicate(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<GoalValidationError> for RepoError {
    fn from(value: GoalValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for final/daily goal CRUD operations.
pub trait GoalRepository {
    fn list_final_goals(&self) -> RepoResult<Vec<FinalGoal>>;
    /// Inserts a new final goal. Fails with `Duplicate` if the id exists.
    fn add_final_goal(&self, goal: &FinalGoal) -> RepoResult<()>;
    /// Upserts a final goal by id.
    fn update_final_goal(&self, goal: &FinalGoal) -> RepoResult<()>;
    /// Deletes a final goal and, in the same transaction, every daily goal
    /// owned by it. Deleting an absent id is a no-op.
    fn delete_final_goal(&self, id: &str) -> RepoResult<()>;

    fn list_daily_goals(&self) -> RepoResult<Vec<DailyGoal>>;
    /// Lists daily goals owned by one final goal, via the secondary index.
    fn list_daily_goals_by_final_goal(&self, final_goal_id: &str) -> RepoResult<Vec<DailyGoal>>;
    /// Inserts a new daily goal. Fails with `Duplicate` if the id exists.
    fn add_daily_goal(&self, goal: &DailyGoal) -> RepoResult<()>;
    /// Upserts a daily goal by id.
    fn update_daily_goal(&self, goal: &DailyGoal) -> RepoResult<()>;
    /// Deletes one daily goal. No cascade: entries keep completed ids by
    /// value. Deleting an absent id is a no-op.
    fn delete_daily_goal(&self, id: &str) -> RepoResult<()>;
}

/// SQLite-backed goal repository.
pub struct SqliteGoalRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteGoalRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn final_goal_exists(&self, id: &str) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM final_goals WHERE id = ?1);",
            [id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn ensure_final_goal_reference(&self, goal: &DailyGoal) -> RepoResult<()> {
        if !self.final_goal_exists(&goal.final_goal_id)? {
            return Err(RepoError::Validation(GoalValidationError::UnknownFinalGoal(
                goal.final_goal_id.clone(),
            )));
        }
        Ok(())
    }
}

impl GoalRepository for SqliteGoalRepository<'_> {
    fn list_final_goals(&self) -> RepoResult<Vec<FinalGoal>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{FINAL_GOAL_SELECT_SQL} ORDER BY created_at ASC, id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut goals = Vec::new();

        while let Some(row) = rows.next()? {
            goals.push(parse_final_goal_row(row)?);
        }

        Ok(goals)
    }

    fn add_final_goal(&self, goal: &FinalGoal) -> RepoResult<()> {
        goal.validate()?;

        self.conn
            .execute(
                "INSERT INTO final_goals (id, title, created_at) VALUES (?1, ?2, ?3);",
                params![goal.id, goal.title, goal.created_at],
            )
            .map_err(|err| map_constraint_to_duplicate(err, &goal.id))?;

        Ok(())
    }

    fn update_final_goal(&self, goal: &FinalGoal) -> RepoResult<()> {
        goal.validate()?;

        self.conn.execute(
            "INSERT INTO final_goals (id, title, created_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET title = excluded.title;",
            params![goal.id, goal.title, goal.created_at],
        )?;

        Ok(())
    }

    fn delete_final_goal(&self, id: &str) -> RepoResult<()> {
        // Single-process store: the unchecked transaction is safe because no
        // other transaction can be live on this connection.
        let tx = self.conn.unchecked_transaction()?;

        tx.execute("DELETE FROM final_goals WHERE id = ?1;", [id])?;
        let cascaded = tx.execute("DELETE FROM daily_goals WHERE final_goal_id = ?1;", [id])?;
        tx.commit()?;

        log::info!(
            "event=final_goal_deleted module=repo status=ok id={id} cascaded_daily_goals={cascaded}"
        );

        Ok(())
    }

    fn list_daily_goals(&self) -> RepoResult<Vec<DailyGoal>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{DAILY_GOAL_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut goals = Vec::new();

        while let Some(row) = rows.next()? {
            goals.push(parse_daily_goal_row(row)?);
        }

        Ok(goals)
    }

    fn list_daily_goals_by_final_goal(&self, final_goal_id: &str) -> RepoResult<Vec<DailyGoal>> {
        let mut stmt = self.conn.prepare(&format!(
            "{DAILY_GOAL_SELECT_SQL} WHERE final_goal_id = ?1 ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query([final_goal_id])?;
        let mut goals = Vec::new();

        while let Some(row) = rows.next()? {
            goals.push(parse_daily_goal_row(row)?);
        }

        Ok(goals)
    }

    fn add_daily_goal(&self, goal: &DailyGoal) -> RepoResult<()> {
        goal.validate()?;
        self.ensure_final_goal_reference(goal)?;

        self.conn
            .execute(
                "INSERT INTO daily_goals (id, title, pillar, weight, final_goal_id)
                 VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    goal.id,
                    goal.title,
                    pillar_to_db(goal.pillar),
                    goal.weight,
                    goal.final_goal_id
                ],
            )
            .map_err(|err| map_constraint_to_duplicate(err, &goal.id))?;

        Ok(())
    }

    fn update_daily_goal(&self, goal: &DailyGoal) -> RepoResult<()> {
        goal.validate()?;
        self.ensure_final_goal_reference(goal)?;

        self.conn.execute(
            "INSERT INTO daily_goals (id, title, pillar, weight, final_goal_id)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                pillar = excluded.pillar,
                weight = excluded.weight,
                final_goal_id = excluded.final_goal_id;",
            params![
                goal.id,
                goal.title,
                pillar_to_db(goal.pillar),
                goal.weight,
                goal.final_goal_id
            ],
        )?;

        Ok(())
    }

    fn delete_daily_goal(&self, id: &str) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM daily_goals WHERE id = ?1;", [id])?;
        Ok(())
    }
}

fn parse_final_goal_row(row: &Row<'_>) -> RepoResult<FinalGoal> {
    Ok(FinalGoal {
        id: row.get("id")?,
        title: row.get("title")?,
        created_at: row.get("created_at")?,
    })
}

fn parse_daily_goal_row(row: &Row<'_>) -> RepoResult<DailyGoal> {
    let pillar_text: String = row.get("pillar")?;
    let pillar = parse_pillar(&pillar_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid pillar value `{pillar_text}` in daily_goals.pillar"
        ))
    })?;

    let weight: i64 = row.get("weight")?;
    let weight = u8::try_from(weight).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid weight value `{weight}` in daily_goals.weight"
        ))
    })?;

    let goal = DailyGoal {
        id: row.get("id")?,
        title: row.get("title")?,
        pillar,
        weight,
        final_goal_id: row.get("final_goal_id")?,
    };
    goal.validate().map_err(|err| {
        RepoError::InvalidData(format!("daily goal `{}` fails validation: {err}", goal.id))
    })?;
    Ok(goal)
}

fn map_constraint_to_duplicate(err: rusqlite::Error, id: &str) -> RepoError {
    match &err {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == ErrorCode::ConstraintViolation =>
        {
            RepoError::Duplicate(id.to_string())
        }
        _ => RepoError::Db(DbError::Sqlite(err)),
    }
}

pub(crate) fn pillar_to_db(pillar: Pillar) -> &'static str {
    match pillar {
        Pillar::Business => "business",
        Pillar::Structure => "structure",
        Pillar::Corps => "corps",
        Pillar::Vision => "vision",
    }
}

pub(crate) fn parse_pillar(value: &str) -> Option<Pillar> {
    match value {
        "business" => Some(Pillar::Business),
        "structure" => Some(Pillar::Structure),
        "corps" => Some(Pillar::Corps),
        "vision" => Some(Pillar::Vision),
        _ => None,
    }
}
