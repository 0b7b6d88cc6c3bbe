//! Shared repository utilities.

use sqlx::postgres::PgQueryResult;
use sqlx::{Postgres, QueryBuilder};

use crate::error::AppError;

/// Appends WHERE or AND to the query builder depending on whether a clause has already been added.
pub fn push_clause(builder: &mut QueryBuilder<'_, Postgres>, has_clause: &mut bool) {
    if *has_clause {
        builder.push(" AND ");
    } else {
        builder.push(" WHERE ");
        *has_clause = true;
    }
}

/// Maps a write that touched no rows to `NotFound("<label> not found")`.
pub fn ensure_affected(result: PgQueryResult, label: &str) -> Result<(), AppError> {
    if result.rows_affected() == 0 {
        Err(AppError::NotFound(format!("{} not found", label)))
    } else {
        Ok(())
    }
}

/// `%term%` pattern for ILIKE search; `None` when the term is blank.
pub fn like_pattern(term: Option<&str>) -> Option<String> {
    let term = term?.trim();
    if term.is_empty() {
        return None;
    }
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    Some(format!("%{}%", escaped))
}
