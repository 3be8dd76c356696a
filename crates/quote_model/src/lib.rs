use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One daily bar of a ticker's price history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRow {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub adj_close: f64,
    pub volume: i64,
}

impl QuoteRow {
    /// Look up a bar field by its spreadsheet header name.
    pub fn attribute(&self, name: &str) -> Option<AttributeValue> {
        match name {
            "Date" => Some(AttributeValue::Date(self.date)),
            "Open" => Some(AttributeValue::Number(self.open)),
            "High" => Some(AttributeValue::Number(self.high)),
            "Low" => Some(AttributeValue::Number(self.low)),
            "Close" => Some(AttributeValue::Number(self.close)),
            "Adj Close" => Some(AttributeValue::Number(self.adj_close)),
            "Volume" => Some(AttributeValue::Number(self.volume as f64)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    Number(f64),
    Date(NaiveDate),
    Text(String),
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AttributeValue::Number(value) => write!(f, "{}", value),
            AttributeValue::Date(date) => write!(f, "{}", date),
            AttributeValue::Text(text) => write!(f, "{}", text),
        }
    }
}

/// Records for one run, all sharing the schema `["Ticker"] + attributes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabularResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<AttributeValue>>,
}

impl TabularResult {
    pub fn new(attributes: &[String]) -> Self {
        let mut columns = vec!["Ticker".to_string()];
        columns.extend(attributes.iter().cloned());
        TabularResult {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_record(&mut self, ticker: &str, values: Vec<AttributeValue>) {
        let mut row = Vec::with_capacity(values.len() + 1);
        row.push(AttributeValue::Text(ticker.to_string()));
        row.extend(values);
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> QuoteRow {
        QuoteRow {
            date: NaiveDate::from_ymd_opt(2023, 12, 29).unwrap(),
            open: 10.5,
            high: 11.25,
            low: 10.0,
            close: 11.0,
            adj_close: 10.9,
            volume: 1200,
        }
    }

    #[test]
    fn attribute_pass_known_names() {
        let row = sample_row();
        assert_eq!(
            row.attribute("Date"),
            Some(AttributeValue::Date(row.date))
        );
        assert_eq!(row.attribute("Open"), Some(AttributeValue::Number(10.5)));
        assert_eq!(row.attribute("High"), Some(AttributeValue::Number(11.25)));
        assert_eq!(row.attribute("Low"), Some(AttributeValue::Number(10.0)));
        assert_eq!(row.attribute("Close"), Some(AttributeValue::Number(11.0)));
        assert_eq!(
            row.attribute("Adj Close"),
            Some(AttributeValue::Number(10.9))
        );
        assert_eq!(
            row.attribute("Volume"),
            Some(AttributeValue::Number(1200.0))
        );
    }

    #[test]
    fn attribute_fail_unknown_name() {
        assert_eq!(sample_row().attribute("Dividends"), None);
    }

    #[test]
    fn tabular_result_pass_schema() {
        let table = TabularResult::new(&["Date".to_string(), "Close".to_string()]);
        assert_eq!(table.columns, vec!["Ticker", "Date", "Close"]);
        assert!(table.is_empty());
    }

    #[test]
    fn tabular_result_pass_prepends_ticker() {
        let mut table = TabularResult::new(&["Close".to_string()]);
        table.push_record("AAA", vec![AttributeValue::Number(10.0)]);
        assert_eq!(table.rows[0][0], AttributeValue::Text("AAA".to_string()));
        assert_eq!(table.rows[0][1], AttributeValue::Number(10.0));
    }

    #[test]
    fn tabular_result_pass_preserves_order() {
        let mut table = TabularResult::new(&["Close".to_string()]);
        table.push_record("AAA", vec![AttributeValue::Number(1.0)]);
        table.push_record("BBB", vec![AttributeValue::Number(2.0)]);
        assert_eq!(table.rows[0][0], AttributeValue::Text("AAA".to_string()));
        assert_eq!(table.rows[1][0], AttributeValue::Text("BBB".to_string()));
    }

    #[test]
    fn attribute_value_pass_display() {
        assert_eq!(AttributeValue::Number(10.25).to_string(), "10.25");
        assert_eq!(
            AttributeValue::Date(NaiveDate::from_ymd_opt(2023, 12, 29).unwrap()).to_string(),
            "2023-12-29"
        );
        assert_eq!(AttributeValue::Text("AAA".to_string()).to_string(), "AAA");
    }

    #[test]
    fn quote_row_pass_serde_roundtrip() {
        let row = sample_row();
        let serialized = serde_json::to_string(&row).unwrap();
        let deserialized: QuoteRow = serde_json::from_str(&serialized).unwrap();
        assert_eq!(row, deserialized);
    }
}
