use std::collections::{HashMap, HashSet};

use indicatif::{ProgressBar, ProgressStyle};
use thiserror::Error;

use crate::evaluation::confusion::BinaryConfusion;
use crate::tokenizer::Tokenizer;

#[derive(Error, Debug)]
pub enum NaiveBayesError {
    #[error("Cannot train on an empty document set")]
    EmptyTrainingSet,

    #[error("Invalid input: {0}")]
    InputError(String),
}

/// Per-category token counts. `total` tracks every token the category
/// emitted during training, repeats included.
#[derive(Debug, Clone, Default)]
pub struct ClassCounts {
    words: HashMap<String, u64>,
    total: u64,
}

impl ClassCounts {
    pub fn count(&self, token: &str) -> u64 {
        self.words.get(token).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.total
    }
}

/// Accumulates vocabulary and counts while documents stream in.
/// `finish` computes the priors and freezes everything into a
/// `NaiveBayes`; the tables cannot be touched afterwards.
pub struct NaiveBayesBuilder {
    tokenizer: Tokenizer,
    vocab: HashSet<String>,
    categories: Vec<String>,
    counts: HashMap<String, ClassCounts>,
    documents: u64,
}

impl NaiveBayesBuilder {
    pub fn new(tokenizer: Tokenizer) -> Self {
        Self {
            tokenizer,
            vocab: HashSet::new(),
            categories: Vec::new(),
            counts: HashMap::new(),
            documents: 0,
        }
    }

    /// Ingest one labeled document. A document that tokenizes to nothing
    /// still counts toward the document total.
    pub fn observe(&mut self, text: &str, label: &str) {
        let words = self.tokenizer.apply(text);

        if !self.counts.contains_key(label) {
            self.categories.push(label.to_string());
        }
        let counts = self.counts.entry(label.to_string()).or_default();
        counts.total += words.len() as u64;
        for word in words {
            *counts.words.entry(word.clone()).or_insert(0) += 1;
            self.vocab.insert(word);
        }
        self.documents += 1;
    }

    /// Compute the priors and freeze the model.
    ///
    /// The prior of a category is its total token count divided by the
    /// number of training documents, a compatibility choice kept from
    /// the data this classifier was built against.
    pub fn finish(self) -> Result<NaiveBayes, NaiveBayesError> {
        if self.documents == 0 {
            return Err(NaiveBayesError::EmptyTrainingSet);
        }

        let total_documents = self.documents as f64;
        let priors = self
            .counts
            .iter()
            .map(|(label, counts)| (label.clone(), counts.total as f64 / total_documents))
            .collect();

        Ok(NaiveBayes {
            tokenizer: self.tokenizer,
            vocab: self.vocab,
            categories: self.categories,
            counts: self.counts,
            priors,
        })
    }
}

/// Trained multinomial Naive Bayes classifier with add-one smoothing.
/// Every table is frozen at construction; scoring calls are read-only.
pub struct NaiveBayes {
    tokenizer: Tokenizer,
    vocab: HashSet<String>,
    categories: Vec<String>,
    counts: HashMap<String, ClassCounts>,
    priors: HashMap<String, f64>,
}

impl NaiveBayes {
    /// Train a model in one shot from aligned text/label sequences.
    pub fn fit(
        tokenizer: Tokenizer,
        texts: &[String],
        labels: &[String],
    ) -> Result<Self, NaiveBayesError> {
        if texts.len() != labels.len() {
            return Err(NaiveBayesError::InputError(format!(
                "{} texts but {} labels",
                texts.len(),
                labels.len()
            )));
        }

        // Initialize progress bar
        let pb = ProgressBar::new(texts.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        pb.set_message("Training in progress...");

        let mut builder = NaiveBayesBuilder::new(tokenizer);
        for (text, label) in texts.iter().zip(labels) {
            builder.observe(text, label);
            pb.inc(1);
        }

        pb.finish_with_message("Training complete!");
        builder.finish()
    }

    /// Categories in the order they were first seen during training.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn vocab_size(&self) -> usize {
        self.vocab.len()
    }

    pub fn prior(&self, category: &str) -> Option<f64> {
        self.priors.get(category).copied()
    }

    pub fn class_counts(&self, category: &str) -> Option<&ClassCounts> {
        self.counts.get(category)
    }

    /// Log-space posterior per category, aligned with `categories()`.
    ///
    /// The product form `prior * Π (count+1)/(total+|V|)` underflows to
    /// zero on long inputs, so the sum of logs is kept instead; relative
    /// ordering is identical. A zero prior maps to negative infinity.
    pub fn log_posteriors(&self, text: &str) -> Vec<f64> {
        let words = self.tokenizer.apply(text);
        let vocab_size = self.vocab.len() as f64;

        self.categories
            .iter()
            .map(|label| {
                let counts = &self.counts[label];
                let denom = counts.total() as f64 + vocab_size;
                let mut log_posterior = self.priors[label].ln();
                for word in &words {
                    log_posterior += ((counts.count(word) as f64 + 1.0) / denom).ln();
                }
                log_posterior
            })
            .collect()
    }

    /// Pseudo-probability of `target` for `text`: the posterior divided
    /// by the sum of all posteriors, in [0, 1]. Exponentiation happens
    /// only here, shifted by the maximum so the normalization cannot
    /// underflow. Unknown categories and an all-zero normalizer score 0.
    pub fn score(&self, text: &str, target: &str) -> f64 {
        let idx = match self.categories.iter().position(|c| c == target) {
            Some(idx) => idx,
            None => return 0.0,
        };

        let logs = self.log_posteriors(text);
        let max = logs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        if max == f64::NEG_INFINITY {
            return 0.0;
        }

        let normalizer: f64 = logs.iter().map(|lp| (lp - max).exp()).sum();
        (logs[idx] - max).exp() / normalizer
    }

    /// Top-1 category for each text.
    pub fn predict(&self, texts: &[String]) -> Vec<String> {
        texts.iter().map(|text| self.predict_one(text)).collect()
    }

    /// Top-1 category for a single text. Categories are scanned in the
    /// order they were first seen during training and only a strictly
    /// greater posterior displaces the current best, so ties go to the
    /// first-discovered category. That tie-break is deliberate and
    /// stable, not an accident of map iteration.
    pub fn predict_one(&self, text: &str) -> String {
        let logs = self.log_posteriors(text);
        let mut best = 0;
        for (idx, log_posterior) in logs.iter().enumerate() {
            if *log_posterior > logs[best] {
                best = idx;
            }
        }
        self.categories[best].clone()
    }

    /// Binary one-vs-rest decision at `threshold` for `target`: a
    /// document is predicted positive when its normalized score strictly
    /// exceeds the threshold. Returns the confusion counts over the set.
    pub fn classify(
        &self,
        texts: &[String],
        labels: &[String],
        threshold: f64,
        target: &str,
    ) -> Result<BinaryConfusion, NaiveBayesError> {
        if texts.len() != labels.len() {
            return Err(NaiveBayesError::InputError(format!(
                "{} texts but {} labels",
                texts.len(),
                labels.len()
            )));
        }

        let mut cm = BinaryConfusion::default();
        for (text, label) in texts.iter().zip(labels) {
            let positive = self.score(text, target) > threshold;
            let actual = label.as_str() == target;
            match (positive, actual) {
                (true, true) => cm.tp += 1,
                (true, false) => cm.fp += 1,
                (false, true) => cm.fne += 1,
                (false, false) => cm.tn += 1,
            }
        }
        Ok(cm)
    }
}
