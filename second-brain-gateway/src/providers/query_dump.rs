//! Raw request/response dumps for debugging model calls.
//!
//! Enabled with `dump_queries = true` under `[logging]`. Each call writes
//! `{dir}/{timestamp}-{provider}-{model}.request.json` and, once the body
//! arrives, a matching `.response.json`. Write failures are only warned about.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde_json::Value;
use tracing::warn;

/// Directory used by the gateway binary.
pub const DEFAULT_DUMP_DIR: &str = "./logs/queries";

/// Pairs a dumped request with its response file.
#[derive(Debug)]
pub struct QueryDump {
    dir: PathBuf,
    stem: String,
}

impl QueryDump {
    /// Write the request body and return the handle for the response.
    pub async fn request(dir: &Path, provider: &str, model: &str, body: &Value) -> Option<Self> {
        if let Err(e) = tokio::fs::create_dir_all(dir).await {
            warn!("dump_queries: cannot create {}: {}", dir.display(), e);
            return None;
        }

        let stamp = Utc::now().format("%Y%m%d-%H%M%S%.3f");
        let dump = Self {
            dir: dir.to_path_buf(),
            stem: format!("{stamp}-{provider}-{}", file_safe(model)),
        };
        write_pretty(&dump.path("request"), body).await;

        Some(dump)
    }

    /// Write the response body next to the request.
    pub async fn response(&self, raw_body: &str) {
        let value = serde_json::from_str::<Value>(raw_body)
            .unwrap_or_else(|_| Value::String(raw_body.to_string()));
        write_pretty(&self.path("response"), &value).await;
    }

    // Model names contain dots, so the suffix is appended rather than set
    // through `Path::with_extension`.
    fn path(&self, phase: &str) -> PathBuf {
        self.dir.join(format!("{}.{phase}.json", self.stem))
    }
}

fn file_safe(model: &str) -> String {
    model
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '.' => c,
            _ => '_',
        })
        .collect()
}

async fn write_pretty(path: &Path, value: &Value) {
    let body = match serde_json::to_string_pretty(value) {
        Ok(body) => body,
        Err(e) => {
            warn!("dump_queries: cannot serialize {}: {}", path.display(), e);
            return;
        }
    };
    if let Err(e) = tokio::fs::write(path, body).await {
        warn!("dump_queries: cannot write {}: {}", path.display(), e);
    }
}
