//! Fetches the CSV source and hands it to the parser.

use crate::{Error, transaction::Transaction};

use super::parse_transactions;

/// Loads and parses the transaction set from `source`, which is either a
/// local file path or an `http(s)://` URL.
///
/// Fetch failures surface as [`Error::LoadFailure`] with the source name
/// alongside the reason; parse failures keep their row-level variants.
pub async fn load_transactions(source: &str) -> Result<Vec<Transaction>, Error> {
    let text = read_source(source).await.map_err(|reason| Error::LoadFailure {
        source_name: source.to_owned(),
        reason,
    })?;

    parse_transactions(&text)
}

async fn read_source(source: &str) -> Result<String, String> {
    if source.starts_with("http://") || source.starts_with("https://") {
        let response = reqwest::get(source)
            .await
            .map_err(|error| error.to_string())?;

        response
            .error_for_status()
            .map_err(|error| error.to_string())?
            .text()
            .await
            .map_err(|error| error.to_string())
    } else {
        tokio::fs::read_to_string(source)
            .await
            .map_err(|error| error.to_string())
    }
}
