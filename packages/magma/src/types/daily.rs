use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One body row of the daily report table, keyed by normalized column header.
///
/// The schema comes from the table's own header row, so there is no fixed
/// struct. Column order is preserved.
pub type DailyReportRow = IndexMap<String, CellValue>;

/// Contents of one table cell.
///
/// A cell with exactly one text contribution collapses to `Text`; anything
/// else (lists, several paragraphs, an empty cell) is a `List`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    List(Vec<String>),
}

impl CellValue {
    pub fn from_parts(mut parts: Vec<String>) -> Self {
        if parts.len() == 1 {
            Self::Text(parts.remove(0))
        } else {
            Self::List(parts)
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::Text(_) => None,
            Self::List(items) => Some(items),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_part_collapses_to_text() {
        let value = CellValue::from_parts(vec!["Merapi".to_string()]);
        assert_eq!(value, CellValue::Text("Merapi".to_string()));
        assert_eq!(serde_json::to_string(&value).unwrap(), r#""Merapi""#);
    }

    #[test]
    fn test_empty_and_multi_stay_lists() {
        assert_eq!(CellValue::from_parts(vec![]), CellValue::List(vec![]));

        let value = CellValue::from_parts(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(value.as_list(), Some(&["a".to_string(), "b".to_string()][..]));
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"["a","b"]"#);
    }
}
