//! In-memory dense vector model.
//!
//! Vectors are normalised when inserted, so similarity is a plain dot
//! product. Neighbour queries rank the whole vocabulary against the
//! normalised mean of the positive words' unit vectors.
//!
//! Reads the word2vec *text* format: an optional `count dim` header
//! followed by one `word v1 v2 ... vdim` line per word.

use std::io::BufRead;
use std::path::Path;

use rustc_hash::{FxHashMap, FxHashSet};

use super::model::{EmbeddingError, EmbeddingModel, Neighbor};
use crate::core::LoadError;

/// Dense word vectors held in one flat buffer.
#[derive(Clone, Debug, Default)]
pub struct VectorModel {
    dim: usize,
    words: Vec<String>,
    index: FxHashMap<String, usize>,
    data: Vec<f32>,
}

impl VectorModel {
    /// Empty model with fixed dimensionality.
    #[must_use]
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            ..Self::default()
        }
    }

    /// Vector dimensionality.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Vocabulary size.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Add or replace a word's vector.
    ///
    /// NaN and infinite components are rejected; they would poison every
    /// similarity involving the word.
    pub fn insert(&mut self, word: impl Into<String>, vector: &[f32]) -> Result<(), EmbeddingError> {
        if vector.len() != self.dim {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dim,
                actual: vector.len(),
            });
        }
        let word = word.into();
        if !vector.iter().all(|v| v.is_finite()) {
            return Err(EmbeddingError::NonFinite(word));
        }

        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        let scale = if norm > 0.0 { norm.recip() } else { 0.0 };
        let unit = vector.iter().map(|v| v * scale);

        match self.index.get(&word) {
            Some(&row) => {
                let start = row * self.dim;
                for (slot, v) in self.data[start..start + self.dim].iter_mut().zip(unit) {
                    *slot = v;
                }
            }
            None => {
                self.index.insert(word.clone(), self.words.len());
                self.words.push(word);
                self.data.extend(unit);
            }
        }
        Ok(())
    }

    /// Parse the word2vec text format.
    pub fn from_reader(reader: impl BufRead) -> Result<Self, LoadError> {
        let mut model: Option<VectorModel> = None;

        for (i, line) in reader.lines().enumerate() {
            let line_no = i + 1;
            let line = line.map_err(|e| LoadError::format(line_no, e.to_string()))?;
            let mut fields = line.split_whitespace();
            let Some(word) = fields.next() else {
                continue;
            };
            let values: Vec<f32> = fields
                .map(str::parse::<f32>)
                .collect::<Result<Vec<f32>, _>>()
                .map_err(|e| LoadError::format(line_no, format!("bad component: {e}")))?;

            // "count dim" header
            if line_no == 1 && values.len() == 1 && word.parse::<usize>().is_ok() {
                model = Some(VectorModel::new(values[0] as usize));
                continue;
            }

            let model = model.get_or_insert_with(|| VectorModel::new(values.len()));
            model
                .insert(word, &values)
                .map_err(|e| LoadError::format(line_no, e.to_string()))?;
        }

        Ok(model.unwrap_or_default())
    }

    /// Read a word2vec text file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| LoadError::io(path, e))?;
        let model = Self::from_reader(std::io::BufReader::new(file))?;
        tracing::info!(
            path = %path.display(),
            words = model.len(),
            dim = model.dim(),
            "loaded word vectors"
        );
        Ok(model)
    }

    fn row(&self, word: &str) -> Option<&[f32]> {
        let row = *self.index.get(word)?;
        Some(&self.data[row * self.dim..(row + 1) * self.dim])
    }

    fn lookup(&self, word: &str) -> Result<&[f32], EmbeddingError> {
        self.row(word)
            .ok_or_else(|| EmbeddingError::UnknownWord(word.to_string()))
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum::<f32>().clamp(-1.0, 1.0)
}

impl EmbeddingModel for VectorModel {
    fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    fn similarity(&self, a: &str, b: &str) -> Result<f32, EmbeddingError> {
        Ok(dot(self.lookup(a)?, self.lookup(b)?))
    }

    fn nearest_neighbors(
        &self,
        positive: &[&str],
        top_k: usize,
    ) -> Result<Vec<Neighbor>, EmbeddingError> {
        let rows: Vec<&[f32]> = positive.iter().filter_map(|w| self.row(w)).collect();
        if rows.is_empty() {
            return Err(EmbeddingError::UnknownWord(positive.join(" ")));
        }

        let mut mean = vec![0.0f32; self.dim];
        for row in &rows {
            for (m, v) in mean.iter_mut().zip(row.iter()) {
                *m += v;
            }
        }
        let norm = mean.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            mean.iter_mut().for_each(|v| *v /= norm);
        }

        let exclude: FxHashSet<&str> = positive.iter().copied().collect();
        let mut hits: Vec<Neighbor> = self
            .words
            .iter()
            .filter(|w| !exclude.contains(w.as_str()))
            .filter_map(|w| self.row(w).map(|row| Neighbor::new(w.as_str(), dot(&mean, row))))
            .collect();

        hits.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.word.cmp(&b.word)));
        hits.truncate(top_k);
        Ok(hits)
    }
}
