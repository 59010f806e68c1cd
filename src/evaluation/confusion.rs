use std::collections::HashMap;

use ndarray::Array2;

/// One-vs-rest counts for a single category over an evaluated set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BinaryConfusion {
    pub tp: u64,
    pub fp: u64,
    /// False negatives. `fn` is reserved, hence the spelling.
    pub fne: u64,
    pub tn: u64,
}

impl BinaryConfusion {
    pub fn total(&self) -> u64 {
        self.tp + self.fp + self.fne + self.tn
    }
}

/// Build one binary matrix per category from aligned true/predicted
/// label sequences. Every category is evaluated independently against
/// the rest.
pub fn compute_confusion_matrix(
    y_true: &[String],
    y_pred: &[String],
    categories: &[String],
) -> HashMap<String, BinaryConfusion> {
    let mut matrices = HashMap::new();
    for category in categories {
        let mut cm = BinaryConfusion::default();
        for (truth, pred) in y_true.iter().zip(y_pred) {
            match (truth == category, pred == category) {
                (true, true) => cm.tp += 1,
                (false, true) => cm.fp += 1,
                (true, false) => cm.fne += 1,
                (false, false) => cm.tn += 1,
            }
        }
        matrices.insert(category.clone(), cm);
    }
    matrices
}

/// |C| x |C| count grid. Rows are true labels, columns predictions.
#[derive(Debug, Clone)]
pub struct MultiClassMatrix {
    categories: Vec<String>,
    grid: Array2<u64>,
}

impl MultiClassMatrix {
    /// Count every (true, predicted) pair into the grid. Pairs whose
    /// labels fall outside the category set are ignored.
    pub fn from_labels(y_true: &[String], y_pred: &[String], categories: &[String]) -> Self {
        let index: HashMap<&str, usize> = categories
            .iter()
            .enumerate()
            .map(|(idx, category)| (category.as_str(), idx))
            .collect();

        let size = categories.len();
        let mut grid = Array2::<u64>::zeros((size, size));
        for (truth, pred) in y_true.iter().zip(y_pred) {
            if let (Some(&row), Some(&col)) = (index.get(truth.as_str()), index.get(pred.as_str())) {
                grid[[row, col]] += 1;
            }
        }

        Self {
            categories: categories.to_vec(),
            grid,
        }
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn grid(&self) -> &Array2<u64> {
        &self.grid
    }

    pub fn total(&self) -> u64 {
        self.grid.sum()
    }

    /// Number of correct predictions.
    pub fn trace(&self) -> u64 {
        (0..self.categories.len()).map(|idx| self.grid[[idx, idx]]).sum()
    }

    /// One-vs-rest counts for the category at `idx`: the diagonal cell
    /// is TP, the rest of the column FP, the rest of the row FN, and
    /// everything else TN.
    pub fn binary_counts(&self, idx: usize) -> BinaryConfusion {
        let tp = self.grid[[idx, idx]];
        let fp = self.grid.column(idx).sum() - tp;
        let fne = self.grid.row(idx).sum() - tp;
        let tn = self.total() - tp - fp - fne;
        BinaryConfusion { tp, fp, fne, tn }
    }
}
