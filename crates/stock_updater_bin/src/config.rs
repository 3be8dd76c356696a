use dotenvy::dotenv;
use std::env;

const DEFAULT_INPUT_PATH: &str = "input/stocks.xlsx";

/// Runtime configuration, resolved once at startup and passed into the
/// pipeline.
pub struct Config {
    pub input_path: String,
    pub print_detailed_exception: bool,
    pub print_intermediate: bool,
    pub deep_debug: bool,
}

impl Config {
    pub fn new() -> Config {
        dotenv().ok();

        let mut input_path = env::var("STOCK_UPDATER_INPUT").unwrap_or_default();
        if input_path.trim().is_empty() {
            input_path = DEFAULT_INPUT_PATH.to_string();
        }

        return Config {
            input_path,
            print_detailed_exception: env_flag("STOCK_UPDATER_PRINT_DETAILED_EXCEPTION"),
            print_intermediate: env_flag("STOCK_UPDATER_PRINT_INTERMEDIATE"),
            deep_debug: env_flag("STOCK_UPDATER_DEEP_DEBUG"),
        };
    }
}

fn env_flag(name: &str) -> bool {
    match env::var(name) {
        Ok(value) => {
            let value = value.trim();
            value == "1" || value.eq_ignore_ascii_case("true")
        }
        Err(_) => false,
    }
}
