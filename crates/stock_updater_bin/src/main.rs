use chrono::NaiveDate;
use colored::Colorize;
use dialoguer::Input;
use log::info;
use quote_model::{AttributeValue, TabularResult};
use sheet_io::SheetError;
use std::error::Error;
use std::fmt;
use std::path::Path;
use yahoo_api::api::YahooAPI;

mod config;
mod utils;

use config::Config;

const DATE_FORMAT: &str = "%d/%m/%y";

#[derive(Debug)]
enum UpdateError {
    Input(SheetError),
    Prompt(String),
    DateParse(chrono::ParseError),
    Fetch { ticker: String, message: String },
    Write(SheetError),
}

impl fmt::Display for UpdateError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UpdateError::Input(e) => write!(f, "Input workbook error: {}", e),
            UpdateError::Prompt(e) => write!(f, "Could not read date from console: {}", e),
            UpdateError::DateParse(e) => write!(f, "Invalid date, expected DD/MM/YY: {}", e),
            UpdateError::Fetch { ticker, message } => {
                write!(f, "Fetch failed for {}: {}", ticker, message)
            }
            UpdateError::Write(e) => write!(f, "Workbook write error: {}", e),
        }
    }
}

impl Error for UpdateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            UpdateError::Input(e) | UpdateError::Write(e) => Some(e),
            UpdateError::DateParse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<chrono::ParseError> for UpdateError {
    fn from(err: chrono::ParseError) -> UpdateError {
        UpdateError::DateParse(err)
    }
}

fn parse_run_date(input: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
}

async fn run(config: &Config) -> Result<(), UpdateError> {
    let path = Path::new(&config.input_path);
    let input = sheet_io::read_input(path).map_err(UpdateError::Input)?;

    if config.print_intermediate {
        if config.deep_debug {
            println!("Number of tickers (tickers): {}", input.tickers.len());
            println!("Number of attributes (attributes): {}", input.attributes.len());
        } else {
            println!("Number of tickers: {}", input.tickers.len());
            println!("Number of attributes: {}", input.attributes.len());
        }
    }

    if config.deep_debug {
        println!("Attribute list (attributes): {:?}", input.attributes);
    } else {
        println!("Attribute list: {:?}", input.attributes);
    }

    let date_input: String = Input::new()
        .with_prompt("Enter Date to extract data (DD/MM/YY)")
        .interact_text()
        .map_err(|e| UpdateError::Prompt(e.to_string()))?;
    let date = parse_run_date(&date_input)?;

    let api = YahooAPI::new();
    let mut table = TabularResult::new(&input.attributes);

    for ticker in &input.tickers {
        let symbol = utils::sanitize_ticker(ticker.clone());
        if config.deep_debug {
            info!("Processing ticker (symbol): {}", symbol);
        } else {
            info!("Processing ticker {}", symbol);
        }

        let history = api
            .get_ticker(&symbol)
            .await
            .map_err(|e| UpdateError::Fetch {
                ticker: symbol.clone(),
                message: e.to_string(),
            })?;

        let record = yahoo_api::api::record_for_date(&history, date, &input.attributes).map_err(
            |e| UpdateError::Fetch {
                ticker: symbol.clone(),
                message: e.to_string(),
            },
        )?;

        if let Some(values) = record {
            if config.print_intermediate {
                println!("{} | {}", symbol, render_values(&values));
            }
            table.push_record(&symbol, values);
        }
    }

    if config.print_intermediate {
        if config.deep_debug {
            println!("Master data (table):\n{}", render_table(&table));
        } else {
            println!("Master data:\n{}", render_table(&table));
        }
    }

    if table.is_empty() {
        println!("{}", "No stock data present for the given date".red());
        return Ok(());
    }

    sheet_io::write_current(path, &table).map_err(UpdateError::Write)?;
    println!(
        "{}",
        format!(
            "Stock data for all tickers saved successfully in {} sheet",
            sheet_io::CURRENT_SHEET
        )
        .green()
    );

    sheet_io::append_history(path, &table).map_err(UpdateError::Write)?;
    println!(
        "{}",
        format!(
            "Stock data for all tickers saved successfully in {} sheet",
            sheet_io::HISTORY_SHEET
        )
        .green()
    );

    Ok(())
}

fn render_values(values: &[AttributeValue]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" | ")
}

fn render_table(table: &TabularResult) -> String {
    let mut lines = vec![table.columns.join(" | ")];
    for row in &table.rows {
        lines.push(render_values(row));
    }
    lines.join("\n")
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    let config = Config::new();

    if let Err(e) = run(&config).await {
        if config.print_detailed_exception {
            eprintln!("{}", format!("Exception occurred: {:?}", e).red());
            let mut source = e.source();
            while let Some(inner) = source {
                eprintln!("Caused by: {}", inner);
                source = inner.source();
            }
        } else {
            eprintln!("{}", format!("Exception occurred: {}", e).red());
        }
    }
}
