use std::path::{Path, PathBuf};
use std::time::Duration;

use serde_json::{Map, Value};
use tracing::{debug, warn};
use url::Url;

use crate::catalog::{Catalog, FilterOptions};
use crate::config::Config;
use crate::error::{LapviewError, Result};
use crate::record::Record;

const USER_AGENT: &str = concat!("lapview/", env!("CARGO_PKG_VERSION"));

/// Where laptop records and filter vocabularies come from
pub trait CatalogSource: Send + Sync {
    fn fetch_records(&self) -> Result<Vec<Record>>;
    fn fetch_filter_options(&self) -> Result<FilterOptions>;
}

/// The catalog service's explore endpoints
pub struct HttpSource {
    agent: ureq::Agent,
    base_url: Url,
}

impl HttpSource {
    pub fn new(config: &Config) -> Result<Self> {
        let base_url = Url::parse(&config.api_url())?;
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .build()
            .into();

        Ok(Self { agent, base_url })
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    fn get(&self, path: &str) -> Result<String> {
        let url = self.endpoint(path);
        debug!(%url, "GET");

        let response = self
            .agent
            .get(url.as_str())
            .header("Accept", "application/json")
            .header("User-Agent", USER_AGENT)
            .call()?;
        Ok(response.into_body().read_to_string()?)
    }
}

impl CatalogSource for HttpSource {
    fn fetch_records(&self) -> Result<Vec<Record>> {
        records_from_response(&self.get("explore/")?)
    }

    fn fetch_filter_options(&self) -> Result<FilterOptions> {
        options_from_response(&self.get("explore/filter-options")?)
    }
}

/// A saved response on disk: the service envelope or a bare record array.
///
/// Filter options are read from a top-level `filter_options` object when
/// present.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Value> {
        let content = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl CatalogSource for FileSource {
    fn fetch_records(&self) -> Result<Vec<Record>> {
        records_from_value(&self.read()?)
    }

    fn fetch_filter_options(&self) -> Result<FilterOptions> {
        Ok(self
            .read()?
            .get("filter_options")
            .map(options_from_value)
            .unwrap_or_default())
    }
}

/// Fetch records and options side by side and build a snapshot.
///
/// A failed fetch is logged and yields an empty record list or empty
/// vocabularies; loading itself never fails.
pub fn load_catalog(source: &dyn CatalogSource) -> Catalog {
    let (records, options) = std::thread::scope(|s| {
        let options = s.spawn(|| source.fetch_filter_options());
        let records = source.fetch_records();
        let options = options.join().unwrap_or_else(|_| {
            Err(LapviewError::UnexpectedResponse(
                "options fetch panicked".into(),
            ))
        });
        (records, options)
    });

    let records = records.unwrap_or_else(|e| {
        warn!(error = %e, "failed to load laptops, showing an empty catalog");
        Vec::new()
    });
    let options = options.unwrap_or_else(|e| {
        warn!(error = %e, "failed to load filter options");
        FilterOptions::default()
    });

    debug!(records = records.len(), "catalog loaded");
    Catalog::new(records, options)
}

/// Records from the body of `GET /explore/`
pub fn records_from_response(body: &str) -> Result<Vec<Record>> {
    records_from_value(&serde_json::from_str(body)?)
}

/// Filter vocabularies from the body of `GET /explore/filter-options`
pub fn options_from_response(body: &str) -> Result<FilterOptions> {
    let value: Value = serde_json::from_str(body)?;
    let obj = envelope(&value)?;
    Ok(options_from_value(obj.get("data").unwrap_or(&value)))
}

fn records_from_value(value: &Value) -> Result<Vec<Record>> {
    if let Value::Array(items) = value {
        return Ok(items.iter().map(Record::from_value).collect());
    }

    let obj = envelope(value)?;
    let laptops = obj
        .get("data")
        .and_then(|data| data.get("laptops"))
        .or_else(|| obj.get("laptops"));

    match laptops {
        Some(Value::Array(items)) => Ok(items.iter().map(Record::from_value).collect()),
        Some(Value::Null) | None => Err(LapviewError::UnexpectedResponse(
            "no laptops in response".into(),
        )),
        Some(_) => Err(LapviewError::UnexpectedResponse(
            "laptops is not a list".into(),
        )),
    }
}

/// Unwrap `{ success, message, data }`, rejecting reported failures
fn envelope(value: &Value) -> Result<&Map<String, Value>> {
    let obj = value
        .as_object()
        .ok_or_else(|| LapviewError::UnexpectedResponse("expected a JSON object".into()))?;

    if obj.get("success").and_then(Value::as_bool) == Some(false) {
        let message = obj
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("request reported failure");
        return Err(LapviewError::UnexpectedResponse(message.to_string()));
    }

    Ok(obj)
}

/// Tolerant decode: non-string entries are skipped, missing lists are empty
fn options_from_value(value: &Value) -> FilterOptions {
    let list = |key: &str| -> Vec<String> {
        value
            .get(key)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    };

    FilterOptions {
        brands: list("brands"),
        processors: list("processors"),
        memory: list("memory"),
        storage: list("storage"),
        displays: list("displays"),
    }
}
