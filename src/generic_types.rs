use serde::{Serialize, Deserialize};

/// One row of the news dataset. A missing category marks a headline
/// the classifier has to label itself.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Document {
    pub headline: String,
    pub category: Option<String>,
}

impl Document {
    pub fn labeled(headline: &str, category: &str) -> Self {
        Self {
            headline: headline.to_string(),
            category: Some(category.to_string()),
        }
    }

    pub fn unlabeled(headline: &str) -> Self {
        Self {
            headline: headline.to_string(),
            category: None,
        }
    }

    pub fn is_labeled(&self) -> bool {
        self.category.is_some()
    }
}
