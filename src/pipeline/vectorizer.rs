//! TF-IDF vectorizer over word n-grams
//!
//! Tokens are runs of two or more word characters. Term weights use the
//! smoothed inverse document frequency `ln((1 + n) / (1 + df)) + 1` and every
//! row vector is L2-normalized.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ClassifierError, Result};

/// Sparse row vector as `(feature index, weight)` pairs sorted by index.
pub type SparseVector = Vec<(usize, f64)>;

static TOKEN_PATTERN: OnceLock<Regex> = OnceLock::new();

fn token_pattern() -> &'static Regex {
    TOKEN_PATTERN.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("token pattern is valid"))
}

/// Vectorizer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorizerConfig {
    /// Smallest and largest n-gram length, inclusive
    pub ngram_range: (usize, usize),
    /// Keep only this many terms, ranked by total count across the corpus
    pub max_features: Option<usize>,
    /// Drop terms that appear in fewer documents than this
    pub min_df: usize,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            ngram_range: (1, 2),
            max_features: Some(5000),
            min_df: 1,
        }
    }
}

/// Learned vocabulary and IDF weights
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    config: VectorizerConfig,
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    pub fn new(config: VectorizerConfig) -> Self {
        Self {
            config,
            vocabulary: BTreeMap::new(),
            idf: Vec::new(),
        }
    }

    pub fn config(&self) -> &VectorizerConfig {
        &self.config
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_fitted(&self) -> bool {
        !self.vocabulary.is_empty()
    }

    /// Index of a term in the learned vocabulary.
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// Split a document into its unigram..=n-gram terms.
    pub fn analyze(&self, document: &str) -> Vec<String> {
        let lowered = document.to_lowercase();
        let tokens: Vec<&str> = token_pattern()
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .collect();

        let (min_n, max_n) = self.config.ngram_range;
        let mut terms = Vec::new();
        for n in min_n.max(1)..=max_n {
            if n > tokens.len() {
                break;
            }
            for window in tokens.windows(n) {
                terms.push(window.join(" "));
            }
        }
        terms
    }

    /// Learn the vocabulary and IDF weights from a corpus.
    pub fn fit(&mut self, documents: &[String]) -> Result<()> {
        if documents.is_empty() {
            return Err(ClassifierError::EmptyTrainingSet);
        }

        let mut document_frequency: HashMap<String, usize> = HashMap::new();
        let mut term_frequency: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let terms = self.analyze(doc);
            let mut seen: HashSet<&str> = HashSet::new();
            for term in &terms {
                *term_frequency.entry(term.clone()).or_insert(0) += 1;
                if seen.insert(term.as_str()) {
                    *document_frequency.entry(term.clone()).or_insert(0) += 1;
                }
            }
        }

        let mut kept: Vec<(String, usize)> = document_frequency
            .into_iter()
            .filter(|(_, df)| *df >= self.config.min_df)
            .collect();

        if let Some(limit) = self.config.max_features {
            if kept.len() > limit {
                kept.sort_by(|a, b| {
                    term_frequency[&b.0]
                        .cmp(&term_frequency[&a.0])
                        .then_with(|| a.0.cmp(&b.0))
                });
                kept.truncate(limit);
            }
        }

        if kept.is_empty() {
            return Err(ClassifierError::EmptyVocabulary);
        }

        // Indices follow alphabetical term order
        kept.sort_by(|a, b| a.0.cmp(&b.0));

        let n_documents = documents.len() as f64;
        self.idf = kept
            .iter()
            .map(|(_, df)| ((1.0 + n_documents) / (1.0 + *df as f64)).ln() + 1.0)
            .collect();
        self.vocabulary = kept
            .into_iter()
            .enumerate()
            .map(|(idx, (term, _))| (term, idx))
            .collect();

        Ok(())
    }

    /// Transform one document into an L2-normalized TF-IDF vector.
    ///
    /// Terms outside the vocabulary are ignored; a document with no known
    /// terms maps to the empty vector.
    pub fn transform_one(&self, document: &str) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for term in self.analyze(document) {
            if let Some(&idx) = self.vocabulary.get(&term) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut row: SparseVector = counts
            .into_iter()
            .map(|(idx, count)| (idx, count * self.idf[idx]))
            .collect();

        let norm = row.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, v) in row.iter_mut() {
                *v /= norm;
            }
        }
        row
    }

    pub fn transform(&self, documents: &[String]) -> Result<Vec<SparseVector>> {
        if !self.is_fitted() {
            return Err(ClassifierError::NotFitted);
        }
        Ok(documents.iter().map(|d| self.transform_one(d)).collect())
    }

    pub fn fit_transform(&mut self, documents: &[String]) -> Result<Vec<SparseVector>> {
        self.fit(documents)?;
        self.transform(documents)
    }
}
