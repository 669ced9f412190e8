use crate::geo::WorldMap;
use crate::wire::RawMatchRow;
use crate::{Dataset, MatchRecord};
use futures_util::future::try_join;
use log::{debug, warn};
use reqwest::Client;
use std::fmt;
use std::io::Read;
use std::time::Duration;

pub type LoadResult<T> = Result<T, LoadError>;

#[derive(Debug)]
pub enum LoadError {
    Network(reqwest::Error, String),
    Status(u16, String),
    Parsing(String, String),
    Io(std::io::Error, String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Network(e, source) => write!(f, "Network error for {source}: {e}"),
            LoadError::Status(code, source) => write!(f, "HTTP {code} for {source}"),
            LoadError::Parsing(msg, source) => write!(f, "Parse error in {source}: {msg}"),
            LoadError::Io(e, source) => write!(f, "Could not read {source}: {e}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Network(e, _) => Some(e),
            LoadError::Io(e, _) => Some(e),
            _ => None,
        }
    }
}

/// Where each dataset comes from: a local path or an `http(s)://` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSources {
    pub matches: String,
    pub world: String,
}

fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

#[derive(Debug, Clone)]
pub struct DatasetLoader {
    client: Client,
    timeout: Duration,
    sources: DatasetSources,
}

impl DatasetLoader {
    pub fn new(sources: DatasetSources) -> Self {
        Self {
            client: Client::builder()
                .user_agent("aotui/0.1 (terminal tennis explorer)")
                .build()
                .unwrap_or_default(),
            timeout: Duration::from_secs(15),
            sources,
        }
    }

    pub fn sources(&self) -> &DatasetSources {
        &self.sources
    }

    /// Fetch and parse both datasets. Either failing fails the load; there is
    /// no partial dataset.
    pub async fn load(&self) -> LoadResult<Dataset> {
        let (matches, world) = try_join(self.load_matches(), self.load_world()).await?;
        debug!(
            "loaded {} matches and {} country outlines",
            matches.len(),
            world.countries.len()
        );
        Ok(Dataset { matches, world })
    }

    pub async fn load_matches(&self) -> LoadResult<Vec<MatchRecord>> {
        let source = &self.sources.matches;
        let text = self.fetch_text(source).await?;
        parse_matches(text.as_bytes(), source)
    }

    pub async fn load_world(&self) -> LoadResult<WorldMap> {
        let source = &self.sources.world;
        let text = self.fetch_text(source).await?;
        WorldMap::parse(&text).map_err(|e| LoadError::Parsing(e.to_string(), source.clone()))
    }

    async fn fetch_text(&self, source: &str) -> LoadResult<String> {
        if !is_url(source) {
            return tokio::fs::read_to_string(source)
                .await
                .map_err(|e| LoadError::Io(e, source.to_owned()));
        }

        let response = self
            .client
            .get(source)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| LoadError::Network(e, source.to_owned()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status(status.as_u16(), source.to_owned()));
        }
        response
            .text()
            .await
            .map_err(|e| LoadError::Network(e, source.to_owned()))
    }
}

/// Read match rows from CSV. Missing trailing columns read as empty.
/// Rows whose year, gender or round cannot be understood, or whose fields
/// do not fit a match row, are dropped with a warning; a broken file (bad
/// quoting, I/O) is an error.
pub fn parse_matches<R: Read>(input: R, source: &str) -> LoadResult<Vec<MatchRecord>> {
    let parsing = |e: csv::Error| LoadError::Parsing(e.to_string(), source.to_owned());
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(input);
    let headers = reader.headers().map_err(parsing)?.clone();

    let mut records = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let mut record = record.map_err(parsing)?;
        // +2: header line, and rows are 1-based
        let line = line + 2;
        while record.len() < headers.len() {
            record.push_field("");
        }
        let row = match record.deserialize::<RawMatchRow>(Some(&headers)) {
            Ok(row) => row,
            Err(e) => {
                warn!("{source}: skipping row {line}: {e}");
                continue;
            }
        };
        match MatchRecord::try_from(row) {
            Ok(record) => records.push(record),
            Err(reason) => warn!("{source}: skipping row {line}: {reason}"),
        }
    }
    Ok(records)
}
