use crate::error::{AllocationError, Result};
use polars::prelude::*;
use super::types::{InputColumn, TableKind};
use std::collections::{HashMap, HashSet};

pub struct DataValidator;

impl DataValidator {
    /// Resolves every column the table needs to a distinct header name.
    ///
    /// Alias matches are taken first. Columns without one fall back to their
    /// expected position, or to the next header no other column has claimed.
    pub fn resolve_columns(df: &DataFrame, table: TableKind) -> Result<HashMap<InputColumn, String>> {
        let expected = table.columns();
        if df.width() < expected.len() {
            return Err(AllocationError::DataLoading(format!(
                "{} table needs {} columns ({:?}), found {}",
                table.as_str(),
                expected.len(),
                expected.iter().map(|c| c.as_str()).collect::<Vec<_>>(),
                df.width()
            )));
        }

        let columns: Vec<String> = df.get_column_names().iter().map(|c| c.to_string()).collect();
        let mut column_map: HashMap<InputColumn, String> = HashMap::new();
        let mut claimed: HashSet<String> = HashSet::new();

        for required in &expected {
            let by_alias = required
                .aliases()
                .into_iter()
                .find(|alias| !claimed.contains(*alias) && columns.iter().any(|col| col == alias));
            if let Some(alias) = by_alias {
                claimed.insert(alias.to_string());
                column_map.insert(*required, alias.to_string());
            }
        }

        for (position, required) in expected.iter().enumerate() {
            if column_map.contains_key(required) {
                continue;
            }
            let fallback = Some(&columns[position])
                .filter(|col| !claimed.contains(*col))
                .or_else(|| columns.iter().find(|col| !claimed.contains(*col)))
                .cloned()
                .ok_or_else(|| {
                    AllocationError::DataLoading(format!(
                        "{} table: no header left for column '{}'",
                        table.as_str(),
                        required.as_str()
                    ))
                })?;
            log::debug!(
                "{} table: using header '{}' for column '{}'",
                table.as_str(),
                fallback,
                required.as_str()
            );
            claimed.insert(fallback.clone());
            column_map.insert(*required, fallback);
        }

        Ok(column_map)
    }

    /// Amounts must be present, finite and non-negative.
    pub fn validate_amounts(amounts: &[Option<f64>], table: TableKind) -> Result<()> {
        for (row, amount) in amounts.iter().enumerate() {
            match amount {
                Some(v) if v.is_finite() && *v >= 0.0 => {}
                Some(v) => {
                    return Err(AllocationError::DataLoading(format!(
                        "{} row {}: invalid amount {}",
                        table.as_str(),
                        row + 1,
                        v
                    )))
                }
                None => {
                    return Err(AllocationError::DataLoading(format!(
                        "{} row {}: missing amount",
                        table.as_str(),
                        row + 1
                    )))
                }
            }
        }
        Ok(())
    }

    /// Text cells must be present and non-blank.
    pub fn require_text(values: &[Option<String>], column: InputColumn, table: TableKind) -> Result<()> {
        if let Some(row) = values
            .iter()
            .position(|v| v.as_deref().map_or(true, |s| s.trim().is_empty()))
        {
            return Err(AllocationError::DataLoading(format!(
                "{} row {}: missing {}",
                table.as_str(),
                row + 1,
                column.as_str()
            )));
        }
        Ok(())
    }
}
