use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    models::Movie,
    services::{catalog::CatalogStore, providers::CatalogSource},
};

/// Pulls the record array out of a catalog payload
///
/// Accepts either a bare array or an object carrying a `data` array.
pub fn extract_records(payload: Value) -> AppResult<Vec<Value>> {
    match payload {
        Value::Array(records) => Ok(records),
        Value::Object(mut object) => match object.remove("data") {
            Some(Value::Array(records)) => Ok(records),
            _ => Err(AppError::Ingestion(
                "Unexpected response format: object without a data array".to_string(),
            )),
        },
        other => Err(AppError::Ingestion(format!(
            "Unexpected response format: {}",
            json_kind(&other)
        ))),
    }
}

/// Keeps the records that carry a non-empty `id` and `title`, in order
pub fn admit_records(records: &[Value]) -> Vec<Movie> {
    records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| match Movie::try_from(record) {
            Ok(movie) => Some(movie),
            Err(reason) => {
                tracing::debug!(index, ?reason, "Dropping catalog record");
                None
            }
        })
        .collect()
}

/// Fetches the catalog from `source` and installs it in `catalog`
///
/// Failures are logged and leave the catalog empty. Returns the number of
/// admitted movies.
pub async fn ingest_catalog(source: &dyn CatalogSource, catalog: &CatalogStore) -> usize {
    let records = match source.fetch_catalog().await.and_then(extract_records) {
        Ok(records) => records,
        Err(e) => {
            tracing::error!(source = source.name(), error = %e, "Failed to fetch movies");
            catalog.reset();
            return 0;
        }
    };

    let movies = admit_records(&records);
    let admitted = movies.len();

    tracing::info!(
        source = source.name(),
        received = records.len(),
        admitted,
        dropped = records.len() - admitted,
        "Catalog ingested"
    );

    catalog.set_movies(movies);
    admitted
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
