// prdt-core/src/infrastructure/adapters/duckdb.rs

use duckdb::{Config, Connection, params_from_iter};
use std::path::Path;
use tracing::{debug, info, instrument};

use crate::domain::dataset::{Column, Dataset};
use crate::domain::ports::{DatasetSink, DatasetSource};
use crate::error::PrdtError;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::atomic_write;

const STAGING_TABLE: &str = "prdt_export";

/// CSV reader / writer backed by an in-memory DuckDB.
pub struct DuckDbCsv {
    conn: Connection,
}

impl DuckDbCsv {
    pub fn in_memory() -> Result<Self, InfrastructureError> {
        let conn = Connection::open_in_memory_with_flags(Config::default())?;
        Ok(Self { conn })
    }

    fn read_expr(path: &Path) -> String {
        format!(
            "read_csv('{}', header = true, all_varchar = true)",
            sql_literal(path)
        )
    }

    fn column_names(&self, path: &Path) -> Result<Vec<String>, InfrastructureError> {
        let mut stmt = self
            .conn
            .prepare(&format!("DESCRIBE SELECT * FROM {}", Self::read_expr(path)))?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }
}

impl DatasetSource for DuckDbCsv {
    #[instrument(skip(self), fields(path = %path.display()))]
    fn load(&self, path: &Path) -> Result<Dataset, PrdtError> {
        if !path.exists() {
            return Err(InfrastructureError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Input file not found: {}", path.display()),
            ))
            .into());
        }

        let names = self.column_names(path)?;
        let width = names.len();
        let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); width];

        let mut stmt = self
            .conn
            .prepare(&format!("SELECT * FROM {}", Self::read_expr(path)))
            .map_err(InfrastructureError::from)?;
        let mut rows = stmt.query([]).map_err(InfrastructureError::from)?;
        while let Some(row) = rows.next().map_err(InfrastructureError::from)? {
            for (idx, column) in cells.iter_mut().enumerate() {
                column.push(row.get::<_, Option<String>>(idx).map_err(InfrastructureError::from)?);
            }
        }

        let columns = names
            .into_iter()
            .zip(cells)
            .map(|(name, values)| Column::infer(name, values))
            .collect();
        let dataset = Dataset::from_columns(columns)?;
        info!(
            rows = dataset.row_count(),
            columns = dataset.column_count(),
            "Dataset loaded"
        );
        Ok(dataset)
    }
}

impl DatasetSink for DuckDbCsv {
    #[instrument(skip(self, dataset), fields(path = %path.display()))]
    fn write(&self, dataset: &Dataset, path: &Path) -> Result<(), PrdtError> {
        if dataset.column_count() == 0 {
            atomic_write(path, "")?;
            return Ok(());
        }

        let column_defs = dataset
            .column_names()
            .iter()
            .map(|name| format!("{} VARCHAR", quote_ident(name)))
            .collect::<Vec<_>>()
            .join(", ");
        self.conn
            .execute_batch(&format!(
                "CREATE OR REPLACE TEMP TABLE {STAGING_TABLE} ({column_defs});"
            ))
            .map_err(InfrastructureError::from)?;

        {
            let placeholders = vec!["?"; dataset.column_count()].join(", ");
            let mut insert = self
                .conn
                .prepare(&format!("INSERT INTO {STAGING_TABLE} VALUES ({placeholders})"))
                .map_err(InfrastructureError::from)?;
            for row in dataset.rows_as_text() {
                insert
                    .execute(params_from_iter(row.iter()))
                    .map_err(InfrastructureError::from)?;
            }
        }

        self.conn
            .execute_batch(&format!(
                "COPY {STAGING_TABLE} TO '{}' (HEADER, DELIMITER ','); DROP TABLE {STAGING_TABLE};",
                sql_literal(path)
            ))
            .map_err(InfrastructureError::from)?;
        debug!(rows = dataset.row_count(), "CSV written");
        Ok(())
    }
}

fn sql_literal(path: &Path) -> String {
    path.to_string_lossy().replace('\'', "''")
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
