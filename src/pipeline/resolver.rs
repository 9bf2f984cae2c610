//! Semantic column resolution.

use crate::config::ColumnRules;
use crate::error::{DashboardError, Result};
use crate::models::ColumnRole;
use tracing::debug;

/// Find the column playing `role`.
///
/// Columns are searched in their original order and the first one whose
/// lowercased name satisfies the role's matcher wins. Fails with
/// [`DashboardError::ColumnNotFound`] when nothing matches.
pub fn resolve_column(columns: &[String], role: ColumnRole, rules: &ColumnRules) -> Result<String> {
    let matcher = rules.matcher(role);

    let resolved = columns
        .iter()
        .find(|name| matcher.matches(name))
        .cloned()
        .ok_or_else(|| DashboardError::column_not_found(role, columns))?;

    debug!("Resolved {} column: '{}'", role, resolved);
    Ok(resolved)
}
