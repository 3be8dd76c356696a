pub fn sanitize_ticker(ticker: String) -> String {
    return ticker
        .trim()
        .chars()
        .take(20)
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '.' || *c == '^' || *c == '=')
        .collect::<String>()
        .to_uppercase();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_ticker_pass_no_harm() {
        let result = sanitize_ticker("AAPL".to_string());
        assert_eq!(result, "AAPL".to_string());
    }

    #[test]
    fn sanitize_ticker_pass_delimiters() {
        let result = sanitize_ticker("BRK-B".to_string());
        assert_eq!(result, "BRK-B".to_string());
        let result = sanitize_ticker("^GSPC".to_string());
        assert_eq!(result, "^GSPC".to_string());
        let result = sanitize_ticker("6758.T".to_string());
        assert_eq!(result, "6758.T".to_string());
    }

    #[test]
    fn sanitize_ticker_pass_remove_non_alnum() {
        let result = sanitize_ticker("AAPL*&( ,/".to_string());
        assert_eq!(result, "AAPL".to_string());
    }

    #[test]
    fn sanitize_ticker_pass_max_len() {
        let result = sanitize_ticker("123123123123123123123".to_string());
        assert_eq!(result, "12312312312312312312".to_string());
    }

    #[test]
    fn sanitize_ticker_pass_to_uppercase() {
        let result = sanitize_ticker("aapl".to_string());
        assert_eq!(result, "AAPL".to_string());
    }

    #[test]
    fn sanitize_ticker_pass_trims_whitespace() {
        let result = sanitize_ticker(" MSFT ".to_string());
        assert_eq!(result, "MSFT".to_string());
    }
}
