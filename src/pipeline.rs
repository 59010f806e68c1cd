use std::collections::HashMap;

use anyhow::Result;
use rust_stemmers::{Algorithm, Stemmer};
use tracing::info;

use crate::classifiers::naive_bayes::NaiveBayes;
use crate::config::Config;
use crate::dataset;
use crate::evaluation::confusion::{compute_confusion_matrix, MultiClassMatrix};
use crate::evaluation::metrics::{compute_metrics, macro_metrics};
use crate::evaluation::roc::roc_curves;
use crate::generic_types::Document;
use crate::options::{Options, TokenizerMode};
use crate::split::stratified_split;
use crate::tokenizer::Tokenizer;

// -----------------------------------------------------------------------------
// End-to-end run: load -> split -> fit -> evaluate -> report
// -----------------------------------------------------------------------------

pub fn exec(config: &Config, options: &Options) -> Result<()> {
    let docs = dataset::read_input(&config.dataset.path)?;
    let (labeled, unlabeled) = dataset::partition(docs, &config.dataset.exclude);
    info!(
        "{} labeled documents, {} without a category",
        labeled.len(),
        unlabeled.len()
    );

    let (train_set, test_set) =
        stratified_split(&labeled, config.split.test_fraction, config.split.seed);
    info!("Split into {} train / {} test", train_set.len(), test_set.len());

    let (x_train, y_train) = dataset::split_x_y(&train_set);
    let (x_test, y_test) = dataset::split_x_y(&test_set);

    let mode = TokenizerMode::from_str(&options.mode);
    info!("Tokenizer mode: {}", mode);
    let model = NaiveBayes::fit(build_tokenizer(mode), &x_train, &y_train)?;

    let categories = dataset::extract_categories(&train_set);
    let y_pred = model.predict(&x_test);

    print_confusion_tables(&y_test, &y_pred, &categories);
    print_macro_summary(&y_test, &y_pred, &categories);

    if options.roc {
        print_roc(&model, &x_test, &y_test, &categories, config.evaluation.roc_steps)?;
    }

    if options.predict_unlabeled && !unlabeled.is_empty() {
        label_the_unlabeled(&model, &unlabeled);
    }

    Ok(())
}

pub fn build_tokenizer(mode: TokenizerMode) -> Tokenizer {
    match mode {
        TokenizerMode::Identity => Tokenizer::identity(),
        TokenizerMode::Complex => Tokenizer::complex(),
        TokenizerMode::Custom => Tokenizer::custom(Stemmer::create(Algorithm::Spanish)),
    }
}

/// One-vs-rest counts and metrics, one row per category.
fn print_confusion_tables(y_test: &[String], y_pred: &[String], categories: &[String]) {
    let matrices = compute_confusion_matrix(y_test, y_pred, categories);

    println!("Confusion matrix (one-vs-rest):");
    for category in categories {
        if let Some(cm) = matrices.get(category) {
            println!(
                "  {:<28} TP={:<6} FP={:<6} FN={:<6} TN={:<6}",
                category, cm.tp, cm.fp, cm.fne, cm.tn
            );
        }
    }

    let metrics = compute_metrics(&matrices);
    println!("Evaluation metrics:");
    for category in categories {
        if let Some(m) = metrics.get(category) {
            println!(
                "  {:<28} accuracy={:.5} precision={:.5} recall={:.5} f1={:.5}",
                category, m.accuracy, m.precision, m.recall, m.f1
            );
        }
    }
}

/// The full grid plus the macro-averaged summary.
fn print_macro_summary(y_test: &[String], y_pred: &[String], categories: &[String]) {
    let matrix = MultiClassMatrix::from_labels(y_test, y_pred, categories);

    println!("Confusion matrix (rows = true, columns = predicted):");
    for (row, category) in categories.iter().enumerate() {
        let counts: Vec<String> = (0..categories.len())
            .map(|col| format!("{:>6}", matrix.grid()[[row, col]]))
            .collect();
        println!("  {:<28} {}", category, counts.join(" "));
    }

    let macros = macro_metrics(&matrix);
    println!("Precision (macro average): {:.5}", macros.precision);
    println!("Recall (macro average): {:.5}", macros.recall);
    println!("Accuracy: {:.5}", macros.accuracy);
    println!("F1 score (macro average): {:.5}", macros.f1);
}

/// FP-rate / TP-rate pairs per category across the threshold sweep; the
/// caller plots them, we only print the points.
fn print_roc(
    model: &NaiveBayes,
    x_test: &[String],
    y_test: &[String],
    categories: &[String],
    steps: usize,
) -> Result<()> {
    info!("Sweeping {} thresholds per category, this can take a while", steps);
    let curves = roc_curves(model, x_test, y_test, categories, steps)?;

    for curve in curves {
        println!("ROC points for {}:", curve.category);
        for point in curve.points {
            println!(
                "  threshold={:.2} fp_rate={:.5} tp_rate={:.5}",
                point.threshold, point.fpr, point.tpr
            );
        }
    }
    Ok(())
}

/// Assign a category to every headline that came without one and print
/// the resulting distribution.
fn label_the_unlabeled(model: &NaiveBayes, unlabeled: &[Document]) {
    let texts: Vec<String> = unlabeled.iter().map(|doc| doc.headline.clone()).collect();
    let predictions = model.predict(&texts);

    println!("Assigned categories:");
    for (doc, label) in unlabeled.iter().zip(&predictions) {
        println!("  {:<28} {}", label, doc.headline);
    }

    let mut counts: HashMap<&String, usize> = HashMap::new();
    for label in &predictions {
        *counts.entry(label).or_insert(0) += 1;
    }
    let mut distribution: Vec<(&String, usize)> = counts.into_iter().collect();
    distribution.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let total = predictions.len() as f64;
    println!("Category distribution:");
    for (label, count) in distribution {
        println!("  {:<28} {:.2}%", label, count as f64 / total * 100.0);
    }
}
