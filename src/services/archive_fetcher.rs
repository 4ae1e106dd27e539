use std::fmt;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use flate2::read::GzDecoder;
use futures_util::StreamExt;
use reqwest::Client;
use tokio::sync::mpsc;

use crate::utils::error::{Result, SiteError};
use crate::utils_ext::fs_utils::ensure_directory_exists;
use crate::utils_ext::paths::absolute;

/// Host serving `<owner>/<repo>/archive/<branch>.tar.gz`
pub const DEFAULT_ARCHIVE_HOST: &str = "https://github.com";

/// Branch whose archive is fetched
pub const ARCHIVE_BRANCH: &str = "master";

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Chunks buffered between the download and the extraction thread
const CHUNK_QUEUE_DEPTH: usize = 16;

/// `owner/repo` repository identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    pub owner: String,
    pub repo: String,
}

impl RepoSlug {
    /// Path of the default-branch tarball on the archive host
    pub fn archive_path(&self) -> String {
        format!("/{}/{}/archive/{}.tar.gz", self.owner, self.repo, ARCHIVE_BRANCH)
    }

    /// Top-level directory inside the tarball
    pub fn extracted_dir_name(&self) -> String {
        format!("{}-{}", self.repo, ARCHIVE_BRANCH)
    }
}

impl FromStr for RepoSlug {
    type Err = SiteError;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => Ok(Self {
                owner: owner.to_string(),
                repo: repo.to_string(),
            }),
            _ => Err(SiteError::InvalidInput(format!(
                "Bad repo: {}. Couldn't find repo name.",
                s
            ))),
        }
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Downloads repository archives and unpacks them
#[derive(Debug, Clone)]
pub struct ArchiveFetcher {
    /// HTTP client for archive requests
    client: Client,
    /// Archive host (configurable for testing)
    host: String,
    /// User agent string for requests
    user_agent: String,
}

impl Default for ArchiveFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveFetcher {
    /// Create a fetcher for the default host
    pub fn new() -> Self {
        Self::with_host(DEFAULT_ARCHIVE_HOST.to_string())
    }

    /// Create a fetcher for a custom archive host
    pub fn with_host(host: String) -> Self {
        Self::with_client(Client::new(), host)
    }

    /// Create a fetcher with a custom HTTP client
    pub fn with_client(client: Client, host: String) -> Self {
        Self {
            client,
            host,
            user_agent: format!("sitekit/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    pub fn archive_url(&self, slug: &RepoSlug) -> String {
        format!("{}{}", self.host.trim_end_matches('/'), slug.archive_path())
    }

    /// Download the default-branch archive of `repo` (`owner/repo`), unpack
    /// it into `ex_path` and rename the unpacked directory to `name`.
    ///
    /// Returns the absolute path of the renamed directory. A malformed `repo`
    /// fails before any request is made.
    pub async fn extract_repo(&self, repo: &str, ex_path: &Path, name: &str) -> Result<PathBuf> {
        let slug: RepoSlug = repo.parse()?;
        let ex_path = absolute(ex_path)?;
        let url = self.archive_url(&slug);

        ensure_directory_exists(&ex_path).map_err(|e| SiteError::io_at(&ex_path, e))?;
        log::debug!("Fetching {} into {}", url, ex_path.display());

        let response = self
            .client
            .get(&url)
            .header("User-Agent", &self.user_agent)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SiteError::Network(format!(
                "GET {} returned {}",
                url,
                response.status()
            )));
        }

        unpack_response(response, &ex_path).await?;

        let from_path = ex_path.join(slug.extracted_dir_name());
        let to_path = ex_path.join(name);
        tokio::fs::rename(&from_path, &to_path)
            .await
            .map_err(|e| SiteError::io_at(&from_path, e))?;

        log::debug!("Extracted {} to {}", slug, to_path.display());
        Ok(to_path)
    }
}

/// [`ArchiveFetcher::extract_repo`] against the default host
pub async fn extract_gh_repo(repo: &str, ex_path: &Path, name: &str) -> Result<PathBuf> {
    ArchiveFetcher::new().extract_repo(repo, ex_path, name).await
}

/// Stream the response body into a blocking extraction task
async fn unpack_response(response: reqwest::Response, dest: &Path) -> Result<()> {
    let (tx, rx) = mpsc::channel::<Vec<u8>>(CHUNK_QUEUE_DEPTH);
    let dest = dest.to_path_buf();
    let extractor = tokio::task::spawn_blocking(move || unpack(ChunkReader::new(rx), &dest));

    let mut stream = response.bytes_stream();
    let mut transfer: Result<()> = Ok(());
    while let Some(chunk) = stream.next().await {
        match chunk {
            Ok(bytes) => {
                // Receiver gone means extraction already finished or failed
                if tx.send(bytes.to_vec()).await.is_err() {
                    break;
                }
            }
            Err(e) => {
                transfer = Err(SiteError::Network(e.to_string()));
                break;
            }
        }
    }
    drop(tx);

    let unpacked = extractor
        .await
        .map_err(|e| SiteError::Archive(format!("Extraction task failed: {}", e)))?;
    transfer?;
    unpacked
}

/// Unpack a tar stream, gunzipping it first when it starts with the gzip magic
pub fn unpack<R: Read + 'static>(reader: R, dest: &Path) -> Result<()> {
    let mut reader = BufReader::new(reader);
    let gzipped = reader
        .fill_buf()
        .map_err(|e| SiteError::Archive(e.to_string()))?
        .starts_with(&GZIP_MAGIC);

    let input: Box<dyn Read> = if gzipped {
        Box::new(GzDecoder::new(reader))
    } else {
        Box::new(reader)
    };

    tar::Archive::new(input)
        .unpack(dest)
        .map_err(|e| SiteError::Archive(e.to_string()))
}

/// Blocking reader over chunks sent from the async download loop
struct ChunkReader {
    rx: mpsc::Receiver<Vec<u8>>,
    chunk: Vec<u8>,
    pos: usize,
}

impl ChunkReader {
    fn new(rx: mpsc::Receiver<Vec<u8>>) -> Self {
        Self {
            rx,
            chunk: Vec::new(),
            pos: 0,
        }
    }
}

impl Read for ChunkReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        while self.pos >= self.chunk.len() {
            match self.rx.blocking_recv() {
                Some(chunk) => {
                    self.chunk = chunk;
                    self.pos = 0;
                }
                None => return Ok(0),
            }
        }

        let n = buf.len().min(self.chunk.len() - self.pos);
        buf[..n].copy_from_slice(&self.chunk[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}
