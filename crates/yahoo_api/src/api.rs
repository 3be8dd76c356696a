use chrono::NaiveDate;
use itertools::izip;
use log::{debug, warn};
use quote_model::{AttributeValue, QuoteRow};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

const YAHOO_BASE_API_URL: &str = "https://query1.finance.yahoo.com";

pub struct YahooAPI {
    base_url: String,
    client: reqwest::Client,
    headers: reqwest::header::HeaderMap,
}

impl YahooAPI {
    pub fn new() -> Self {
        let mut reqwest_headers = reqwest::header::HeaderMap::new();
        reqwest_headers.insert(reqwest::header::USER_AGENT, "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36".parse().unwrap());

        return YahooAPI {
            base_url: YAHOO_BASE_API_URL.to_string(),
            client: reqwest::Client::new(),
            headers: reqwest_headers,
        };
    }

    /// Full daily history for one ticker. An unknown symbol yields an empty
    /// history, not an error.
    pub async fn get_ticker(&self, ticker: &str) -> Result<Vec<QuoteRow>, Box<dyn Error>> {
        let url = format!(
            "{}/v8/finance/chart/{}?range=max&interval=1d",
            self.base_url, ticker
        );

        debug!("get_ticker | url: {}", url);

        let chart_json = self
            .client
            .get(&url)
            .headers(self.headers.clone())
            .send()
            .await?
            .json::<ChartJSON>()
            .await?;

        let mut results = match chart_json.chart.result {
            Some(results) => results,
            None => {
                warn!("get_ticker | no chart data for {}", ticker);
                return Ok(vec![]);
            }
        };

        if results.is_empty() {
            warn!("get_ticker | empty chart result for {}", ticker);
            return Ok(vec![]);
        }

        Ok(parse_chart(results.remove(0)))
    }
}

/// Keep the bar matching `date` exactly and extract `attributes` from it,
/// rounded to 2 decimal places except for the date itself. Zero matching
/// bars means no record for this ticker.
pub fn record_for_date(
    history: &[QuoteRow],
    date: NaiveDate,
    attributes: &[String],
) -> Result<Option<Vec<AttributeValue>>, CustomError> {
    let row = match history.iter().find(|row| row.date == date) {
        Some(row) => row,
        None => return Ok(None),
    };

    let mut values = Vec::with_capacity(attributes.len());
    for attrib in attributes {
        let value = row
            .attribute(attrib)
            .ok_or_else(|| CustomError::UnknownAttribute(attrib.clone()))?;
        values.push(match value {
            AttributeValue::Number(number) => AttributeValue::Number(round2(number)),
            other => other,
        });
    }

    Ok(Some(values))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn parse_chart(result: ChartResult) -> Vec<QuoteRow> {
    let timestamps = result.timestamp.unwrap_or_default();
    let quote = match result.indicators.quote.into_iter().next() {
        Some(quote) => quote,
        None => return vec![],
    };
    let adjclose = result
        .indicators
        .adjclose
        .unwrap_or_default()
        .into_iter()
        .next()
        .map(|series| series.adjclose)
        .unwrap_or_else(|| vec![None; timestamps.len()]);

    izip!(
        timestamps,
        quote.open,
        quote.high,
        quote.low,
        quote.close,
        quote.volume,
        adjclose
    )
    .map(|(timestamp, open, high, low, close, volume, adj_close)| QuoteRow {
        date: chrono::DateTime::from_timestamp(timestamp, 0)
            .unwrap_or_default()
            .date_naive(),
        open: open.unwrap_or_default(),
        high: high.unwrap_or_default(),
        low: low.unwrap_or_default(),
        close: close.unwrap_or_default(),
        adj_close: adj_close.unwrap_or_default(),
        volume: volume.unwrap_or_default(),
    })
    .collect()
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChartJSON {
    pub chart: Chart,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Chart {
    pub result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChartResult {
    pub timestamp: Option<Vec<i64>>,
    pub indicators: Indicators,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Indicators {
    pub quote: Vec<Quote>,
    pub adjclose: Option<Vec<AdjClose>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Quote {
    pub open: Vec<Option<f64>>,
    pub high: Vec<Option<f64>>,
    pub low: Vec<Option<f64>>,
    pub close: Vec<Option<f64>>,
    pub volume: Vec<Option<i64>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdjClose {
    pub adjclose: Vec<Option<f64>>,
}

#[derive(Debug)]
pub enum CustomError {
    UnknownAttribute(String),
}

impl fmt::Display for CustomError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CustomError::UnknownAttribute(name) => write!(f, "Unknown attribute: {}", name),
        }
    }
}

impl Error for CustomError {}
