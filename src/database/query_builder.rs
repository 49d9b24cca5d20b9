use chrono::NaiveDate;
use sqlx::{self, postgres::PgArguments, PgConnection};

use crate::database::manager::DatabaseError;
use crate::database::models::Gender;

/// A typed bind parameter for dynamically assembled statements
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(String),
    Int(i32),
    Date(NaiveDate),
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        SqlValue::Int(value)
    }
}

impl From<NaiveDate> for SqlValue {
    fn from(value: NaiveDate) -> Self {
        SqlValue::Date(value)
    }
}

impl From<Gender> for SqlValue {
    fn from(value: Gender) -> Self {
        SqlValue::Text(value.as_str().to_string())
    }
}

/// Builds `UPDATE <table> SET ... WHERE id = $n` from the fields a caller
/// actually supplied. Absent fields never appear in the statement.
#[derive(Debug)]
pub struct UpdateBuilder {
    table: &'static str,
    assignments: Vec<(&'static str, SqlValue)>,
}

impl UpdateBuilder {
    pub fn new(table: &'static str) -> Self {
        Self {
            table,
            assignments: Vec::new(),
        }
    }

    pub fn set<V: Into<SqlValue>>(mut self, column: &'static str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.assignments.push((column, value.into()));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn columns(&self) -> Vec<&'static str> {
        self.assignments.iter().map(|(column, _)| *column).collect()
    }

    pub fn to_sql(&self) -> Option<String> {
        if self.assignments.is_empty() {
            return None;
        }
        let sets: Vec<String> = self
            .assignments
            .iter()
            .enumerate()
            .map(|(i, (column, _))| format!("{} = ${}", column, i + 1))
            .collect();
        Some(format!(
            "UPDATE {} SET {} WHERE id = ${}",
            self.table,
            sets.join(", "),
            self.assignments.len() + 1
        ))
    }

    /// Runs the statement; returns the number of rows touched, or 0 without
    /// a round trip when nothing was supplied.
    pub async fn execute(self, conn: &mut PgConnection, id: i32) -> Result<u64, DatabaseError> {
        let Some(sql) = self.to_sql() else {
            return Ok(0);
        };

        let mut q = sqlx::query(&sql);
        for (_, value) in self.assignments {
            q = bind_value(q, value);
        }
        let result = q.bind(id).execute(&mut *conn).await?;
        Ok(result.rows_affected())
    }
}

fn bind_value<'q>(
    q: sqlx::query::Query<'q, sqlx::Postgres, PgArguments>,
    v: SqlValue,
) -> sqlx::query::Query<'q, sqlx::Postgres, PgArguments> {
    match v {
        SqlValue::Text(s) => q.bind(s),
        SqlValue::Int(i) => q.bind(i),
        SqlValue::Date(d) => q.bind(d),
    }
}
