//! Z39.50 client for the remote Aleph catalog
//!
//! Queries run through `yaz-client`, which writes every retrieved MARC record
//! verbatim to a dump file; the raw bytes of that file are the result.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::{
    config::AppConfig,
    error::{AppError, AppResult},
    models::RecordId,
};

/// Bib-1 use attribute for the Aleph local system number
pub const ATTR_LOCAL_NUMBER: u32 = 1032;

static HITS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Number of hits:\s*(\d+)").expect("valid hits regex"));

/// Source of raw MARC records for a given identifier
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Raw bytes of the first record matching `id`
    async fn query(&self, id: &RecordId) -> AppResult<Vec<u8>>;
}

/// [`CatalogClient`] backed by the `yaz-client` command-line tool
#[derive(Debug, Clone)]
pub struct YazClient {
    program: String,
    zurl: String,
    syntax: String,
    timeout: Duration,
}

impl YazClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            program: config.catalog.yaz_client.clone(),
            zurl: config.zurl(),
            syntax: config.catalog.syntax.clone(),
            timeout: Duration::from_secs(config.catalog.timeout_secs),
        }
    }

    /// PQF query selecting one record by local system number
    pub fn pqf(id: &RecordId) -> String {
        format!("@attr 1={} {}", ATTR_LOCAL_NUMBER, id)
    }

    /// Commands fed to yaz-client on stdin. Only the first hit is presented.
    fn script(&self, id: &RecordId) -> String {
        format!(
            "format {}\nfind {}\nshow 1\nquit\n",
            self.syntax,
            Self::pqf(id)
        )
    }

    async fn run(&self, id: &RecordId, dump: &std::path::Path) -> AppResult<String> {
        let mut child = Command::new(&self.program)
            .arg("-m")
            .arg(dump)
            .arg(&self.zurl)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                tracing::warn!("Failed to start {}: {}", self.program, e);
                AppError::Z3950(format!("Failed to start {}: {}", self.program, e))
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(self.script(id).as_bytes())
                .await
                .map_err(|e| AppError::Z3950(format!("Failed to send query: {}", e)))?;
        }

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| {
                tracing::warn!("Z39.50 request for {} timed out on {}", id, self.zurl);
                AppError::Z3950Timeout(self.timeout.as_secs())
            })?
            .map_err(|e| AppError::Z3950(format!("yaz-client failed: {}", e)))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::Z3950(format!(
                "yaz-client exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(stdout)
    }
}

/// Hit count reported by yaz-client, if a search response was received
pub fn hit_count(output: &str) -> Option<u64> {
    HITS_RE
        .captures(output)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

#[async_trait]
impl CatalogClient for YazClient {
    async fn query(&self, id: &RecordId) -> AppResult<Vec<u8>> {
        tracing::info!("Z39.50 search for sysid {} on {}", id, self.zurl);
        tracing::debug!("Z39.50 query: {}", Self::pqf(id));

        let dump = tempfile::NamedTempFile::new()
            .map_err(|e| AppError::Z3950(format!("Failed to create MARC dump file: {}", e)))?;

        let output = self.run(id, dump.path()).await?;

        match hit_count(&output) {
            None => {
                return Err(AppError::Z3950(format!(
                    "No search response from {}: {}",
                    self.zurl,
                    output.lines().last().unwrap_or_default().trim()
                )));
            }
            Some(0) => {
                return Err(AppError::Z3950(format!("No record found for sysid {}", id)));
            }
            Some(hits) => {
                tracing::debug!("Z39.50 search returned {} hits for {}", hits, id);
            }
        }

        let bytes = tokio::fs::read(dump.path())
            .await
            .map_err(|e| AppError::Z3950(format!("Failed to read MARC dump: {}", e)))?;

        if bytes.is_empty() {
            return Err(AppError::Z3950(format!(
                "Z39.50 present returned no record for sysid {}",
                id
            )));
        }

        tracing::info!("Retrieved {} bytes for sysid {}", bytes.len(), id);
        Ok(bytes)
    }
}
