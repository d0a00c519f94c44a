use google_sheets4::api::ValueRange;
use serde_json::Value;

/// Builders for the `ValueRange` payloads the spreadsheet API consumes.
pub trait ValueRangeFactory {
    fn from_row<T: AsRef<str>>(cells: &[T]) -> Self;
    fn from_grid(rows: &[Vec<String>]) -> Self;
}

fn cells_to_values<T: AsRef<str>>(cells: &[T]) -> Vec<Value> {
    cells
        .iter()
        .map(|cell| Value::String(cell.as_ref().to_owned()))
        .collect()
}

impl ValueRangeFactory for ValueRange {
    /// A single row spanning one cell per entry.
    fn from_row<T: AsRef<str>>(cells: &[T]) -> Self {
        ValueRange {
            major_dimension: Some("ROWS".to_string()),
            range: None,
            values: Some(vec![cells_to_values(cells)]),
        }
    }

    /// Multiple rows, written in the order given.
    fn from_grid(rows: &[Vec<String>]) -> Self {
        ValueRange {
            major_dimension: Some("ROWS".to_string()),
            range: None,
            values: Some(rows.iter().map(|row| cells_to_values(row)).collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_to_values() {
        let cells = vec!["a", "b", "c"];
        let values = cells_to_values(&cells);
        assert_eq!(
            values,
            vec![
                Value::String("a".to_string()),
                Value::String("b".to_string()),
                Value::String("c".to_string()),
            ]
        );
    }

    #[test]
    fn test_from_row() {
        let cells = vec!["a", "b", "c"];
        let value_range = ValueRange::from_row(&cells);
        assert_eq!(value_range.major_dimension, Some("ROWS".to_string()));
        assert_eq!(value_range.values, Some(vec![cells_to_values(&cells)]));
    }

    #[test]
    fn test_from_grid() {
        let rows = vec![
            vec!["a".to_string(), "b".to_string()],
            vec!["c".to_string(), "d".to_string()],
        ];
        let value_range = ValueRange::from_grid(&rows);
        assert_eq!(value_range.major_dimension, Some("ROWS".to_string()));
        assert_eq!(
            value_range.values,
            Some(vec![
                cells_to_values(&rows[0]),
                cells_to_values(&rows[1]),
            ])
        );
    }
}
