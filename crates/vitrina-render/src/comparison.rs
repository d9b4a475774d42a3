//! Comparison pivot: feature rows × item columns.

use serde_json::Value;
use vitrina_types::ComparisonData;

/// One matrix cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    Check,
    Cross,
    Text(String),
    /// The item does not list this feature.
    Missing,
}

impl Cell {
    fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Bool(true)) => Cell::Check,
            Some(Value::Bool(false)) => Cell::Cross,
            Some(Value::String(s)) => Cell::Text(s.clone()),
            Some(Value::Null) | None => Cell::Missing,
            Some(other) => Cell::Text(other.to_string()),
        }
    }

    pub fn display(&self) -> &str {
        match self {
            Cell::Check => "✓",
            Cell::Cross => "✗",
            Cell::Text(s) => s,
            Cell::Missing => "-",
        }
    }
}

/// Row-per-feature, column-per-item matrix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComparisonMatrix {
    /// Column headers (item names).
    pub columns: Vec<String>,
    /// `(feature label, one cell per column)`, in feature order.
    pub rows: Vec<(String, Vec<Cell>)>,
}

impl ComparisonMatrix {
    pub fn pivot(data: &ComparisonData) -> Self {
        let columns = data.items.iter().map(|item| item.name.clone()).collect();
        let rows = data
            .features
            .iter()
            .map(|label| {
                let cells = data
                    .items
                    .iter()
                    .map(|item| Cell::from_value(item.features.get(label)))
                    .collect();
                (label.clone(), cells)
            })
            .collect();
        Self { columns, rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pivot_three_features_two_items() {
        let data: ComparisonData = serde_json::from_value(json!({
            "features": ["Precio", "Colaboración", "Plugins"],
            "items": [
                {"name": "Figma", "features": {"Precio": "12 €", "Colaboración": true, "Plugins": true}},
                {"name": "Sketch", "features": {"Plugins": 3, "Colaboración": false}}
            ]
        }))
        .unwrap();
        let matrix = ComparisonMatrix::pivot(&data);
        assert_eq!(matrix.columns, ["Figma", "Sketch"]);
        assert_eq!(matrix.rows.len(), 3);
        assert!(matrix.rows.iter().all(|(_, cells)| cells.len() == 2));
        assert_eq!(matrix.rows[0], ("Precio".into(), vec![Cell::Text("12 €".into()), Cell::Missing]));
        assert_eq!(matrix.rows[1].1, [Cell::Check, Cell::Cross]);
        assert_eq!(matrix.rows[2].1, [Cell::Check, Cell::Text("3".into())]);
    }
}
