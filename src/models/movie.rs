use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Poster shown when a movie has no usable poster URL
pub const PLACEHOLDER_POSTER: &str = "https://via.placeholder.com/300x450?text=No+Image";

/// A movie as returned by the remote catalog API
///
/// Field names follow the remote payload, so the same shape is used for the
/// catalog, the API responses and the persisted watchlist snapshots.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub poster: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imdb_rating: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plot: Option<String>,
}

/// Why a raw catalog record was not admitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    NotAnObject,
    MissingId,
    MissingTitle,
}

impl Movie {
    /// Creates a movie with only the required fields set
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            poster: String::new(),
            year: None,
            imdb_rating: None,
            runtime: None,
            plot: None,
        }
    }

    /// Poster URL to display, falling back to the placeholder image
    pub fn poster_url(&self) -> &str {
        if self.poster.starts_with("http") {
            &self.poster
        } else {
            PLACEHOLDER_POSTER
        }
    }

    pub fn rating_label(&self) -> &str {
        non_empty(self.imdb_rating.as_deref()).unwrap_or("N/A")
    }

    pub fn year_label(&self) -> String {
        match self.year {
            Some(year) if year != 0 => year.to_string(),
            _ => "N/A".to_string(),
        }
    }

    pub fn runtime_label(&self) -> &str {
        non_empty(self.runtime.as_deref()).unwrap_or("2h")
    }

    pub fn plot_label(&self) -> &str {
        non_empty(self.plot.as_deref()).unwrap_or("No description available.")
    }
}

impl TryFrom<&Value> for Movie {
    type Error = RejectReason;

    /// Admits a raw catalog record when both `id` and `title` are present and
    /// non-empty. Optional fields of an unexpected type are treated as absent.
    fn try_from(record: &Value) -> Result<Self, Self::Error> {
        let object = record.as_object().ok_or(RejectReason::NotAnObject)?;

        let id = object
            .get("id")
            .and_then(id_value)
            .ok_or(RejectReason::MissingId)?;

        let title = object
            .get("title")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .ok_or(RejectReason::MissingTitle)?;

        Ok(Movie {
            id,
            title: title.to_string(),
            poster: object
                .get("poster")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            year: object.get("year").and_then(year_value),
            imdb_rating: object.get("imdbRating").and_then(display_value),
            runtime: object.get("runtime").and_then(display_value),
            plot: object.get("plot").and_then(display_value),
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn id_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

fn year_value(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => n.as_i64().and_then(|y| i32::try_from(y).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn display_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, found {}",
            other
        ))),
    }
}

/// A movie annotated with simulated viewing statistics
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RankedMovie {
    #[serde(flatten)]
    pub movie: Movie,
    pub views: u32,
    pub popularity: u8,
}
