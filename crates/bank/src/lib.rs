pub mod error;
pub mod records;

use core::{
    fmt::{self, Display},
    str::FromStr,
};
use error::{Error, Result};
use http_body_util::{BodyExt, Empty};
use hyper::{body::Bytes, Uri};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use model::Question;
use std::path::PathBuf;

/// Where a question bank lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Http(Uri),
}

impl FromStr for Source {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        let text = text.trim();
        if text.starts_with("https://") {
            return Err(Error::UnsupportedScheme);
        }

        if text.starts_with("http://") {
            let uri = text.parse().map_err(|_| Error::InvalidUri)?;
            return Ok(Self::Http(uri));
        }

        Ok(Self::File(PathBuf::from(text)))
    }
}

impl Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => path.display().fmt(f),
            Self::Http(uri) => uri.fmt(f),
        }
    }
}

/// Fetches and merges question banks.
pub struct Loader {
    sources: Vec<Source>,
    http: Client<HttpConnector, Empty<Bytes>>,
}

impl From<Vec<Source>> for Loader {
    fn from(sources: Vec<Source>) -> Self {
        let http = Client::builder(TokioExecutor::new()).build_http();
        Self { sources, http }
    }
}

impl Loader {
    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    async fn fetch(&self, source: &Source) -> Result<Vec<u8>> {
        match source {
            Source::File(path) => Ok(tokio::fs::read(path).await?),
            Source::Http(uri) => {
                let response = self.http.get(uri.clone()).await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(Error::Status(status.as_u16()));
                }
                let bytes = response.into_body().collect().await?.to_bytes();
                Ok(bytes.to_vec())
            }
        }
    }

    async fn load(&self, source: &Source) -> Result<Vec<serde_json::Value>> {
        let bytes = self.fetch(source).await.inspect_err(|err| log::error!("cannot load {source}: {err}"))?;
        let records = records::parse(&bytes).inspect_err(|err| log::error!("cannot parse {source}: {err}"))?;
        log::info!("loaded {} records from {source}", records.len());
        Ok(records)
    }

    /// Loads every source concurrently and concatenates them in source order.
    /// Fails if any single source fails.
    pub async fn load_all(&self) -> Result<Vec<Question>> {
        use futures_util::future::try_join_all;
        let documents = try_join_all(self.sources.iter().map(|source| self.load(source))).await?;
        let questions = records::retain_usable(documents.into_iter().flatten());
        log::info!("{} usable questions in {} sources", questions.len(), self.sources.len());
        Ok(questions)
    }

    /// Like [`Loader::load_all`] but never fails: any source failure yields an
    /// empty bank alongside the error that caused it.
    pub async fn load_soft(&self) -> (Vec<Question>, Option<Error>) {
        match self.load_all().await {
            Ok(questions) => (questions, None),
            Err(err) => (Vec::new(), Some(err)),
        }
    }
}
