//! JSON-file persistence for phase artifacts. Every phase writes its output
//! here before returning it, so a process restart never loses completed
//! phases and the REST layer can serve results straight from disk.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tokio::fs;
use tracing::{debug, warn};

use reviewsim_core::{AnalysisResult, Product, Review, ReviewerProfile};

use crate::error::{PipelineError, Result};

const REVIEWS_DIR: &str = "reviews";

/// The four durable artifacts, one per phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Product,
    Reviewers,
    Reviews,
    Analysis,
}

impl ArtifactKind {
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Product => "product.json",
            Self::Reviewers => "reviewers.json",
            Self::Reviews => "reviews.json",
            Self::Analysis => "analysis.json",
        }
    }

    /// The value a reader gets when the artifact has not been produced yet.
    fn empty_value(&self) -> Value {
        match self {
            Self::Product | Self::Analysis => Value::Object(Default::default()),
            Self::Reviewers | Self::Reviews => Value::Array(Default::default()),
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Product => "product",
            Self::Reviewers => "reviewers",
            Self::Reviews => "reviews",
            Self::Analysis => "analysis",
        };
        f.write_str(name)
    }
}

/// File-backed store rooted at one output directory.
///
/// Individual reviews additionally live under `reviews/review_<index>.json`
/// so a partially completed fan-out survives a crash; the collection file is
/// rebuilt from them at the end of phase 3.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, kind: ArtifactKind) -> PathBuf {
        self.root.join(kind.file_name())
    }

    fn reviews_dir(&self) -> PathBuf {
        self.root.join(REVIEWS_DIR)
    }

    fn review_path(&self, index: usize) -> PathBuf {
        self.reviews_dir().join(format!("review_{index}.json"))
    }

    /// Delete everything under the output directory, creating it if absent.
    /// Idempotent.
    pub async fn reset(&self) -> Result<()> {
        if fs::try_exists(&self.root).await? {
            let mut entries = fs::read_dir(&self.root).await?;
            while let Some(entry) = entries.next_entry().await? {
                let path = entry.path();
                if entry.file_type().await?.is_dir() {
                    fs::remove_dir_all(&path).await?;
                } else {
                    fs::remove_file(&path).await?;
                }
            }
        } else {
            fs::create_dir_all(&self.root).await?;
        }
        debug!(dir = %self.root.display(), "output directory reset");
        Ok(())
    }

    /// Load one artifact as raw JSON. A missing or zero-length file yields
    /// the artifact's empty shape. A file with unparseable content is reset
    /// to the empty shape on disk and reported as corrupt once.
    pub async fn load_value(&self, kind: ArtifactKind) -> Result<Value> {
        let path = self.path(kind);
        let content = match fs::read_to_string(&path).await {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(kind.empty_value());
            }
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(kind.empty_value());
        }
        match serde_json::from_str(&content) {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!(%kind, error = %e, "artifact file is corrupt, resetting to empty shape");
                self.write_json(&path, &kind.empty_value()).await?;
                Err(PipelineError::CorruptArtifact {
                    kind,
                    reason: e.to_string(),
                })
            }
        }
    }

    pub async fn load_product(&self) -> Result<Option<Product>> {
        let value = self.load_value(ArtifactKind::Product).await?;
        if is_empty_shape(&value) {
            return Ok(None);
        }
        Ok(Some(serde_json::from_value(value)?))
    }

    pub async fn load_reviewers(&self) -> Result<Vec<ReviewerProfile>> {
        let value = self.load_value(ArtifactKind::Reviewers).await?;
        Ok(serde_json::from_value(unwrap_list(value, "profiles"))?)
    }

    /// Load the phase-3 collection file. Accepts both the wrapped
    /// `{"reviews": [...]}` form the store writes and a bare array.
    pub async fn load_reviews(&self) -> Result<Vec<Review>> {
        let value = self.load_value(ArtifactKind::Reviews).await?;
        Ok(serde_json::from_value(unwrap_list(value, "reviews"))?)
    }

    pub async fn load_analysis(&self) -> Result<Option<AnalysisResult>> {
        let value = self.load_value(ArtifactKind::Analysis).await?;
        if is_empty_shape(&value) {
            return Ok(None);
        }
        Ok(Some(serde_json::from_value(value)?))
    }

    pub async fn save_product(&self, product: &Product) -> Result<()> {
        self.write_json(&self.path(ArtifactKind::Product), product)
            .await
    }

    pub async fn save_reviewers(&self, profiles: &[ReviewerProfile]) -> Result<()> {
        self.write_json(&self.path(ArtifactKind::Reviewers), &profiles)
            .await
    }

    /// Persist the review collection in its wrapped form.
    pub async fn save_reviews_collection(&self, reviews: &[Review]) -> Result<()> {
        let wrapped = serde_json::json!({ "reviews": reviews });
        self.write_json(&self.path(ArtifactKind::Reviews), &wrapped)
            .await
    }

    pub async fn save_analysis(&self, analysis: &AnalysisResult) -> Result<()> {
        self.write_json(&self.path(ArtifactKind::Analysis), analysis)
            .await
    }

    /// Persist one review under `reviews/review_<index>.json`.
    pub async fn save_review(&self, index: usize, review: &Review) -> Result<()> {
        fs::create_dir_all(self.reviews_dir()).await?;
        self.write_json(&self.review_path(index), review).await
    }

    /// Remove any per-review files left over from an earlier fan-out.
    pub async fn clear_reviews(&self) -> Result<()> {
        let dir = self.reviews_dir();
        if fs::try_exists(&dir).await? {
            fs::remove_dir_all(&dir).await?;
        }
        fs::create_dir_all(&dir).await?;
        Ok(())
    }

    /// Gather the per-review files in index order. Files that fail to parse
    /// are skipped with a warning rather than failing the whole collection.
    pub async fn collect_reviews(&self) -> Result<Vec<Review>> {
        let dir = self.reviews_dir();
        if !fs::try_exists(&dir).await? {
            return Ok(Vec::new());
        }

        let mut indexed: Vec<(usize, Review)> = Vec::new();
        let mut entries = fs::read_dir(&dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let Some(index) = review_index(&path) else {
                continue;
            };
            let content = fs::read_to_string(&path).await?;
            match serde_json::from_str::<Review>(&content) {
                Ok(review) => indexed.push((index, review)),
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "skipping unreadable review file");
                }
            }
        }

        indexed.sort_by_key(|(index, _)| *index);
        Ok(indexed.into_iter().map(|(_, review)| review).collect())
    }

    /// Atomic write: serialize to a sibling temp file, then rename over the
    /// target so readers never observe a half-written artifact.
    async fn write_json<T: Serialize + ?Sized>(&self, path: &Path, value: &T) -> Result<()> {
        fs::create_dir_all(&self.root).await?;
        let content = serde_json::to_string_pretty(value)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, &content).await?;
        fs::rename(&tmp, path).await?;
        debug!(file = %path.display(), bytes = content.len(), "artifact written");
        Ok(())
    }
}

fn is_empty_shape(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Accept both `{"<key>": [...]}` and a bare `[...]`.
fn unwrap_list(value: Value, key: &str) -> Value {
    match value {
        Value::Object(mut map) => map.remove(key).unwrap_or(Value::Array(Default::default())),
        other => other,
    }
}

fn review_index(path: &Path) -> Option<usize> {
    let stem = path.file_stem()?.to_str()?;
    stem.strip_prefix("review_")?.parse().ok()
}
