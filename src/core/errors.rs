use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("URL parsing error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Extraction error: {0}")]
    ExtractionError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Failed to connect to {url} after {attempts} attempts: {last_error}")]
    MaxRetriesReached {
        url: Url,
        attempts: usize,
        last_error: String,
    },

    #[error("Initial connection test failed for {url}")]
    ConnectivityCheck {
        url: Url,
        #[source]
        source: Box<ScraperError>,
    },
}

pub type ScraperResult<T> = Result<T, ScraperError>;

/// `error` followed by each distinct message in its `source()` chain,
/// joined with `": "`.
pub fn error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connectivity_check_names_cause_once() {
        let error = ScraperError::ConnectivityCheck {
            url: Url::parse("https://www.mapion.co.jp/").unwrap(),
            source: Box::new(ScraperError::ConnectionError("connection refused".to_string())),
        };

        assert_eq!(
            error.to_string(),
            "Initial connection test failed for https://www.mapion.co.jp/"
        );
        let chain = error_chain(&error);
        assert_eq!(chain.matches("connection refused").count(), 1);
        assert!(chain.ends_with(": Connection error: connection refused"));
    }

    #[test]
    fn test_error_chain_without_source_is_display() {
        let error = ScraperError::ExtractionError("no table".to_string());
        assert_eq!(error_chain(&error), "Extraction error: no table");
    }
}
