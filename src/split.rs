use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::generic_types::Document;

/// Train/test partition that keeps every category at roughly its
/// original proportion in both subsets.
///
/// Each category's documents are shuffled independently and cut at
/// `floor(count * (1 - test_fraction))`: the head goes to train, the
/// tail to test. The combined sets are shuffled once more so documents
/// of the same category do not sit next to each other. With a seed the
/// outcome is fully deterministic.
pub fn stratified_split(
    docs: &[Document],
    test_fraction: f64,
    seed: Option<u64>,
) -> (Vec<Document>, Vec<Document>) {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    // Group by category in first-seen order so the seed alone fixes
    // the outcome.
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<&Document>> = HashMap::new();
    for doc in docs {
        let category = doc.category.as_deref().unwrap_or_default();
        if !groups.contains_key(category) {
            order.push(category);
        }
        groups.entry(category).or_default().push(doc);
    }

    let mut train = Vec::new();
    let mut test = Vec::new();
    for category in order {
        let mut subset = groups.remove(category).unwrap_or_default();
        subset.shuffle(&mut rng);

        let split_idx = (subset.len() as f64 * (1.0 - test_fraction)) as usize;
        train.extend(subset[..split_idx].iter().map(|doc| (*doc).clone()));
        test.extend(subset[split_idx..].iter().map(|doc| (*doc).clone()));
    }

    train.shuffle(&mut rng);
    test.shuffle(&mut rng);

    (train, test)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn sample_docs() -> Vec<Document> {
        let mut docs = Vec::new();
        for i in 0..10 {
            docs.push(Document::labeled(&format!("economia {i}"), "Economía"));
        }
        for i in 0..5 {
            docs.push(Document::labeled(&format!("deportes {i}"), "Deportes"));
        }
        docs
    }

    fn count_category(docs: &[Document], category: &str) -> usize {
        docs.iter()
            .filter(|d| d.category.as_deref() == Some(category))
            .count()
    }

    #[test]
    fn per_category_counts_are_conserved() {
        let docs = sample_docs();
        let (train, test) = stratified_split(&docs, 0.2, Some(7));

        assert_eq!(count_category(&train, "Economía") + count_category(&test, "Economía"), 10);
        assert_eq!(count_category(&train, "Deportes") + count_category(&test, "Deportes"), 5);
        assert_eq!(train.len() + test.len(), docs.len());
    }

    #[test]
    fn split_point_rounds_toward_train() {
        let docs = sample_docs();
        let (train, test) = stratified_split(&docs, 0.2, Some(7));

        // floor(10 * 0.8) = 8 and floor(5 * 0.8) = 4
        assert_eq!(count_category(&train, "Economía"), 8);
        assert_eq!(count_category(&test, "Economía"), 2);
        assert_eq!(count_category(&train, "Deportes"), 4);
        assert_eq!(count_category(&test, "Deportes"), 1);
    }

    #[test]
    fn no_document_lands_in_both_subsets() {
        let docs = sample_docs();
        let (train, test) = stratified_split(&docs, 0.3, Some(13));

        let train_headlines: HashSet<_> = train.iter().map(|d| d.headline.clone()).collect();
        assert!(test.iter().all(|d| !train_headlines.contains(&d.headline)));
    }

    #[test]
    fn same_seed_means_same_split() {
        let docs = sample_docs();
        let (train_a, test_a) = stratified_split(&docs, 0.2, Some(42));
        let (train_b, test_b) = stratified_split(&docs, 0.2, Some(42));

        let headlines = |docs: &[Document]| -> Vec<String> {
            docs.iter().map(|d| d.headline.clone()).collect()
        };
        assert_eq!(headlines(&train_a), headlines(&train_b));
        assert_eq!(headlines(&test_a), headlines(&test_b));
    }

    #[test]
    fn empty_input_yields_empty_subsets() {
        let (train, test) = stratified_split(&[], 0.2, Some(1));
        assert!(train.is_empty());
        assert!(test.is_empty());
    }
}
