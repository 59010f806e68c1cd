use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::Stemmer;

lazy_static! {
    static ref PUNCTUATION: Regex = Regex::new(r"[[:punct:]]").unwrap();
}

pub type WordFilter = Box<dyn Fn(&str) -> bool>;
pub type WordSanitizer = Box<dyn Fn(&str) -> String>;

/// Splits text on whitespace, keeps the words the filter accepts and
/// normalizes each kept word with the sanitizer. Both strategies are
/// injected so preprocessing can be swapped without touching the model.
pub struct Tokenizer {
    filter: WordFilter,
    sanitizer: WordSanitizer,
}

impl Tokenizer {
    pub fn new(filter: WordFilter, sanitizer: WordSanitizer) -> Self {
        Self { filter, sanitizer }
    }

    /// No preprocessing at all; every whitespace-separated word becomes
    /// a token as-is.
    pub fn identity() -> Self {
        Self::new(Box::new(|_: &str| true), Box::new(str::to_string))
    }

    /// Keeps alphabetic words longer than 3 characters, lowercases them
    /// and strips punctuation.
    pub fn complex() -> Self {
        Self::new(Box::new(complex_filter), Box::new(complex_sanitize))
    }

    /// Same filter as `complex`, plus a snowball stemming reduction on
    /// the sanitized word. The stemmer is owned by the sanitizer; build
    /// one with `Stemmer::create(Algorithm::Spanish)` and hand it over.
    pub fn custom(stemmer: Stemmer) -> Self {
        Self::new(
            Box::new(complex_filter),
            Box::new(move |word: &str| stemmer.stem(&complex_sanitize(word)).into_owned()),
        )
    }

    /// Tokenize `text`. Word order is preserved.
    pub fn apply(&self, text: &str) -> Vec<String> {
        text.split_whitespace()
            .filter(|word| (self.filter)(word))
            .map(|word| (self.sanitizer)(word))
            .collect()
    }
}

fn remove_short_words(word: &str, n: usize) -> bool {
    word.chars().count() > n
}

fn remove_non_alpha(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_alphabetic())
}

pub fn complex_filter(word: &str) -> bool {
    remove_short_words(word, 3) && remove_non_alpha(word)
}

fn remove_punctuation(word: &str) -> String {
    PUNCTUATION.replace_all(word, "").into_owned()
}

pub fn complex_sanitize(word: &str) -> String {
    remove_punctuation(word).to_lowercase()
}
