use indicatif::{ProgressBar, ProgressStyle};

use crate::classifiers::naive_bayes::{NaiveBayes, NaiveBayesError};
use super::metrics::ratio;

/// A single point of a threshold-swept curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RocPoint {
    pub threshold: f64,
    /// FP / (FP + TN), 0 when the denominator is 0.
    pub fpr: f64,
    /// TP / (TP + FN), 0 when the denominator is 0.
    pub tpr: f64,
}

/// One curve per category, points ordered by ascending threshold.
#[derive(Debug, Clone)]
pub struct RocCurve {
    pub category: String,
    pub points: Vec<RocPoint>,
}

/// Sweep `steps` evenly spaced thresholds over [0, 1] and record the
/// false/true positive rates of the binary decision for every category.
/// The sweep re-scores the whole set once per (category, threshold)
/// pair, which is why the caller gets a progress bar.
pub fn roc_curves(
    model: &NaiveBayes,
    texts: &[String],
    labels: &[String],
    categories: &[String],
    steps: usize,
) -> Result<Vec<RocCurve>, NaiveBayesError> {
    let thresholds = linspace(steps);

    let pb = ProgressBar::new((categories.len() * thresholds.len()) as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message("Sweeping thresholds...");

    let mut curves = Vec::with_capacity(categories.len());
    for category in categories {
        let mut points = Vec::with_capacity(thresholds.len());
        for &threshold in &thresholds {
            let cm = model.classify(texts, labels, threshold, category)?;
            points.push(RocPoint {
                threshold,
                fpr: ratio(cm.fp, cm.fp + cm.tn),
                tpr: ratio(cm.tp, cm.tp + cm.fne),
            });
            pb.inc(1);
        }
        curves.push(RocCurve {
            category: category.clone(),
            points,
        });
    }

    pb.finish_and_clear();
    Ok(curves)
}

/// `steps` evenly spaced values covering [0, 1] inclusive.
fn linspace(steps: usize) -> Vec<f64> {
    if steps <= 1 {
        return vec![0.0];
    }
    (0..steps)
        .map(|idx| idx as f64 / (steps - 1) as f64)
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::tokenizer::Tokenizer;

    use super::*;

    fn to_strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn sample_model() -> NaiveBayes {
        let texts = to_strings(&[
            "stocks rally today",
            "team wins championship",
            "market crash today",
        ]);
        let labels = to_strings(&["finance", "sports", "finance"]);
        NaiveBayes::fit(Tokenizer::identity(), &texts, &labels).unwrap()
    }

    #[test]
    fn linspace_covers_the_unit_interval() {
        let values = linspace(11);
        assert_eq!(values.len(), 11);
        assert_eq!(values[0], 0.0);
        assert_eq!(values[10], 1.0);
        assert!((values[5] - 0.5).abs() < 1e-12);
        assert!(values.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn one_curve_per_category_with_ascending_thresholds() {
        let model = sample_model();
        let texts = to_strings(&["stocks today", "big win"]);
        let labels = to_strings(&["finance", "sports"]);
        let categories = to_strings(&["finance", "sports"]);

        let curves = roc_curves(&model, &texts, &labels, &categories, 5).unwrap();
        assert_eq!(curves.len(), 2);
        for curve in &curves {
            assert_eq!(curve.points.len(), 5);
            assert!(curve
                .points
                .windows(2)
                .all(|w| w[0].threshold < w[1].threshold));
        }
    }

    #[test]
    fn extreme_thresholds_pin_the_rates() {
        let model = sample_model();
        let texts = to_strings(&["stocks today", "big win", "crash fears"]);
        let labels = to_strings(&["finance", "sports", "finance"]);
        let categories = to_strings(&["finance"]);

        let curves = roc_curves(&model, &texts, &labels, &categories, 11).unwrap();
        let points = &curves[0].points;

        // At 0.0 every strictly positive score is a positive call, so
        // both rates saturate; at 1.0 nothing clears the bar.
        assert_eq!(points[0].tpr, 1.0);
        assert_eq!(points[0].fpr, 1.0);
        assert_eq!(points[10].tpr, 0.0);
        assert_eq!(points[10].fpr, 0.0);
    }

    #[test]
    fn category_absent_from_the_set_yields_zero_rates() {
        let model = sample_model();
        let texts = to_strings(&["stocks today"]);
        let labels = to_strings(&["finance"]);
        let categories = to_strings(&["sports"]);

        let curves = roc_curves(&model, &texts, &labels, &categories, 3).unwrap();
        // No true positives are possible; the zero-denominator policy
        // keeps the TP rate at 0 instead of dividing by zero.
        assert!(curves[0].points.iter().all(|p| p.tpr == 0.0));
    }
}
