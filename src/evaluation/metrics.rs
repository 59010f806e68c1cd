use std::collections::HashMap;

use super::confusion::{BinaryConfusion, MultiClassMatrix};

/// Derived quality numbers. Always recomputed from a confusion matrix,
/// never stored alongside it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

/// A zero denominator yields 0 by policy, never an error or a NaN.
pub(crate) fn ratio(num: u64, denom: u64) -> f64 {
    if denom == 0 {
        0.0
    } else {
        num as f64 / denom as f64
    }
}

impl Metrics {
    pub fn from_confusion(cm: &BinaryConfusion) -> Self {
        let accuracy = ratio(cm.tp + cm.tn, cm.total());
        let precision = ratio(cm.tp, cm.tp + cm.fp);
        let recall = ratio(cm.tp, cm.tp + cm.fne);
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        Self {
            accuracy,
            precision,
            recall,
            f1,
        }
    }
}

/// Per-category metrics out of the one-vs-rest matrices.
pub fn compute_metrics(
    matrices: &HashMap<String, BinaryConfusion>,
) -> HashMap<String, Metrics> {
    matrices
        .iter()
        .map(|(category, cm)| (category.clone(), Metrics::from_confusion(cm)))
        .collect()
}

/// Unweighted per-category averages over the multi-class grid, plus the
/// overall accuracy (trace over total).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

pub fn macro_metrics(matrix: &MultiClassMatrix) -> MacroMetrics {
    let size = matrix.categories().len();
    let mut precision_sum = 0.0;
    let mut recall_sum = 0.0;
    let mut f1_sum = 0.0;

    for idx in 0..size {
        let per_class = Metrics::from_confusion(&matrix.binary_counts(idx));
        precision_sum += per_class.precision;
        recall_sum += per_class.recall;
        f1_sum += per_class.f1;
    }

    let count = size.max(1) as f64;
    MacroMetrics {
        accuracy: ratio(matrix.trace(), matrix.total()),
        precision: precision_sum / count,
        recall: recall_sum / count,
        f1: f1_sum / count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn metrics_match_hand_computation() {
        let cm = BinaryConfusion {
            tp: 2,
            fp: 1,
            fne: 1,
            tn: 6,
        };
        let m = Metrics::from_confusion(&cm);
        assert!(close(m.accuracy, 0.8));
        assert!(close(m.precision, 2.0 / 3.0));
        assert!(close(m.recall, 2.0 / 3.0));
        assert!(close(m.f1, 2.0 / 3.0));
    }

    #[test]
    fn all_zero_positives_yield_zero_not_nan() {
        // The category never appears in truth or predictions.
        let cm = BinaryConfusion {
            tp: 0,
            fp: 0,
            fne: 0,
            tn: 4,
        };
        let m = Metrics::from_confusion(&cm);
        assert_eq!(m.precision, 0.0);
        assert_eq!(m.recall, 0.0);
        assert_eq!(m.f1, 0.0);
        assert!(close(m.accuracy, 1.0));
    }

    #[test]
    fn empty_matrix_is_all_zero() {
        let m = Metrics::from_confusion(&BinaryConfusion::default());
        assert_eq!(m.accuracy, 0.0);
        assert_eq!(m.precision, 0.0);
        assert_eq!(m.recall, 0.0);
        assert_eq!(m.f1, 0.0);
    }

    #[test]
    fn macro_average_is_unweighted() {
        let y_true = to_strings(&["a", "a", "a", "b", "b", "b"]);
        let y_pred = to_strings(&["a", "a", "b", "b", "b", "a"]);
        let categories = to_strings(&["a", "b"]);
        let matrix = MultiClassMatrix::from_labels(&y_true, &y_pred, &categories);

        // Both categories: TP=2, FP=1, FN=1 -> precision = recall = 2/3.
        let macros = macro_metrics(&matrix);
        assert!(close(macros.precision, 2.0 / 3.0));
        assert!(close(macros.recall, 2.0 / 3.0));
        assert!(close(macros.f1, 2.0 / 3.0));
        assert!(close(macros.accuracy, 4.0 / 6.0));
    }

    #[test]
    fn macro_average_survives_an_absent_category() {
        let y_true = to_strings(&["a", "a"]);
        let y_pred = to_strings(&["a", "a"]);
        let categories = to_strings(&["a", "ghost"]);
        let matrix = MultiClassMatrix::from_labels(&y_true, &y_pred, &categories);

        let macros = macro_metrics(&matrix);
        // "a" is perfect, "ghost" contributes zeros.
        assert!(close(macros.precision, 0.5));
        assert!(close(macros.recall, 0.5));
        assert!(close(macros.accuracy, 1.0));
    }

    #[test]
    fn empty_grid_yields_zeroes() {
        let matrix = MultiClassMatrix::from_labels(&[], &[], &[]);
        let macros = macro_metrics(&matrix);
        assert_eq!(macros.accuracy, 0.0);
        assert_eq!(macros.precision, 0.0);
    }
}
