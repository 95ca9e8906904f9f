//! In-memory vector index over the document chunks

use tracing::debug;

use crate::chunking::Chunk;
use crate::errors::RehabRagError;
use crate::errors::Result;
use crate::rag::SearchResult;

/// Read-only index of (chunk, vector) entries, built once at startup
#[derive(Debug)]
pub struct VectorIndex {
    entries: Vec<IndexEntry>,
    dimension: usize,
}

#[derive(Debug)]
struct IndexEntry {
    chunk: Chunk,
    vector: Vec<f32>,
    norm: f32,
}

impl VectorIndex {
    /// Store all entries; the i-th vector belongs to the i-th chunk
    ///
    /// # Errors
    /// `Index` if there are no entries, the counts differ, the vectors do
    /// not share one non-zero dimension or a component is NaN or infinite
    pub fn build(chunks: Vec<Chunk>, vectors: Vec<Vec<f32>>) -> Result<Self> {
        if chunks.is_empty() {
            return Err(RehabRagError::Index(
                "Cannot build an index without chunks".to_string(),
            ));
        }
        if chunks.len() != vectors.len() {
            return Err(RehabRagError::Index(format!(
                "{} chunks but {} vectors",
                chunks.len(),
                vectors.len()
            )));
        }

        let dimension = vectors[0].len();
        if dimension == 0 {
            return Err(RehabRagError::Index("Vectors must not be empty".to_string()));
        }

        let mut entries = Vec::with_capacity(chunks.len());
        for (chunk, vector) in chunks.into_iter().zip(vectors) {
            if vector.len() != dimension {
                return Err(RehabRagError::Index(format!(
                    "Chunk {} has dimension {}, expected {dimension}",
                    chunk.index,
                    vector.len()
                )));
            }
            if !is_finite(&vector) {
                return Err(RehabRagError::Index(format!(
                    "Chunk {} has a non-finite vector component",
                    chunk.index
                )));
            }
            let norm = l2_norm(&vector);
            entries.push(IndexEntry {
                chunk,
                vector,
                norm,
            });
        }

        debug!(
            "Built vector index with {} entries of dimension {}",
            entries.len(),
            dimension
        );

        Ok(Self { entries, dimension })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    /// The `k` chunks closest to `query` by cosine distance
    ///
    /// Results are ordered by increasing distance, ties by chunk order. When
    /// `k` exceeds the index size every entry is returned.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchResult>> {
        if query.len() != self.dimension {
            return Err(RehabRagError::Index(format!(
                "Query has dimension {}, index has {}",
                query.len(),
                self.dimension
            )));
        }
        if !is_finite(query) {
            return Err(RehabRagError::Index(
                "Query has a non-finite component".to_string(),
            ));
        }

        let query_norm = l2_norm(query);
        let mut scored: Vec<(f32, &IndexEntry)> = self
            .entries
            .iter()
            .map(|entry| (cosine_distance(query, query_norm, entry), entry))
            .collect();

        scored.sort_by(|a, b| {
            a.0.total_cmp(&b.0)
                .then_with(|| a.1.chunk.index.cmp(&b.1.chunk.index))
        });

        Ok(scored
            .into_iter()
            .take(k)
            .map(|(distance, entry)| SearchResult {
                chunk: entry.chunk.clone(),
                distance,
                score: 1.0 - distance,
            })
            .collect())
    }
}

fn is_finite(vector: &[f32]) -> bool {
    vector.iter().all(|x| x.is_finite())
}

fn l2_norm(vector: &[f32]) -> f32 {
    vector.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// `1 - cosine_similarity`; a zero vector on either side counts as unrelated
fn cosine_distance(query: &[f32], query_norm: f32, entry: &IndexEntry) -> f32 {
    let denom = query_norm * entry.norm;
    if denom <= f32::EPSILON {
        return 1.0;
    }
    let dot: f32 = query.iter().zip(&entry.vector).map(|(a, b)| a * b).sum();
    let similarity = dot / denom;
    // overflow in huge components
    if !similarity.is_finite() {
        return 1.0;
    }
    1.0 - similarity.clamp(-1.0, 1.0)
}
