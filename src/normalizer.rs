use std::collections::BTreeMap;
use tracing::debug;

use crate::models::ColumnTable;
use crate::schema::NA_SENTINEL;

/// Number of `NA` sentinels replaced, per column name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    pub replaced: BTreeMap<&'static str, usize>,
}

impl NormalizeReport {
    pub fn total(&self) -> usize {
        self.replaced.values().sum()
    }
}

/// Replace every `NA` text cell with `None`
///
/// Numeric, tool and logical columns are already free of the sentinel after
/// import, so only the text columns are touched. All other values pass
/// through unchanged.
pub fn normalize(mut table: ColumnTable) -> (ColumnTable, NormalizeReport) {
    let mut report = NormalizeReport::default();

    for row in &mut table.rows {
        for (column, value) in row.text_cells_mut() {
            if value.as_deref() == Some(NA_SENTINEL) {
                *value = None;
                *report.replaced.entry(column).or_insert(0) += 1;
            }
        }
    }

    debug!(
        "Replaced {} NA sentinels: {:?}",
        report.total(),
        report.replaced
    );
    (table, report)
}
