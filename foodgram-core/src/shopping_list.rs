//! Consolidating a user's shopping cart into one ingredient list.

use serde::Serialize;
use std::collections::BTreeMap;

/// One row of the consolidated list: an ingredient and the summed amount
/// across every recipe in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShoppingListLine {
    pub name: String,
    pub measurement_unit: String,
    pub total_amount: i64,
}

impl ShoppingListLine {
    pub fn new(name: impl Into<String>, measurement_unit: impl Into<String>, total: i64) -> Self {
        Self {
            name: name.into(),
            measurement_unit: measurement_unit.into(),
            total_amount: total,
        }
    }

    /// Text of the line as printed in the exported document.
    pub fn display_line(&self) -> String {
        format!(
            "{} ({}) - {}",
            self.name, self.measurement_unit, self.total_amount
        )
    }
}

/// Group `(name, unit, amount)` rows by `(name, unit)` and sum the amounts.
///
/// The result is ordered by name ignoring case, then by exact name and unit,
/// so "apple" and "Apple" sit together ahead of "Banana". An empty input
/// yields an empty list.
pub fn aggregate<I, N, U>(rows: I) -> Vec<ShoppingListLine>
where
    I: IntoIterator<Item = (N, U, i32)>,
    N: Into<String>,
    U: Into<String>,
{
    let mut totals: BTreeMap<(String, String), i64> = BTreeMap::new();

    for (name, unit, amount) in rows {
        *totals.entry((name.into(), unit.into())).or_insert(0) += i64::from(amount);
    }

    let mut lines: Vec<ShoppingListLine> = totals
        .into_iter()
        .map(|((name, measurement_unit), total_amount)| ShoppingListLine {
            name,
            measurement_unit,
            total_amount,
        })
        .collect();
    // Stable, so equal folded names keep the map's byte order
    lines.sort_by_cached_key(|line| line.name.to_lowercase());
    lines
}
