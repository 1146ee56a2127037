//! Scoring predictions against ground truth: RMSE plus a per-class
//! classification report.

use crate::error::{EvalError, Result};
use data_loader::fmt_rating;
use std::collections::BTreeMap;
use std::fmt;

/// Precision/recall/F1/support for one rating class
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Number of truth values in this class
    pub support: usize,
}

/// Per-class summary over the whole evaluation batch.
///
/// Each distinct canonical rating string is its own class label. The
/// canonical form comes from `fmt_rating`, so a parsed "4" and a truth
/// value 4.0 land in the same "4.0" class.
#[derive(Debug, Clone)]
pub struct ClassificationReport {
    pub classes: BTreeMap<String, ClassMetrics>,
    pub accuracy: f64,
    pub macro_avg: ClassMetrics,
    pub weighted_avg: ClassMetrics,
}

/// RMSE plus the classification report for one run
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub rmse: f64,
    pub report: ClassificationReport,
}

/// Score predictions against ground truth.
///
/// The sequences must pair up one to one and must not be empty; both are
/// contract violations, not conditions to paper over.
pub fn evaluate(truth: &[f32], predictions: &[f32]) -> Result<Evaluation> {
    if truth.len() != predictions.len() {
        return Err(EvalError::LengthMismatch {
            truth: truth.len(),
            predictions: predictions.len(),
        });
    }
    if truth.is_empty() {
        return Err(EvalError::EmptyInput);
    }

    Ok(Evaluation {
        rmse: rmse(truth, predictions),
        report: classification_report(truth, predictions),
    })
}

/// Root-mean-square error over paired sequences
fn rmse(truth: &[f32], predictions: &[f32]) -> f64 {
    let sum_sq: f64 = truth
        .iter()
        .zip(predictions)
        .map(|(t, p)| {
            let d = (*t - *p) as f64;
            d * d
        })
        .sum();
    (sum_sq / truth.len() as f64).sqrt()
}

fn classification_report(truth: &[f32], predictions: &[f32]) -> ClassificationReport {
    let truth_labels: Vec<String> = truth.iter().map(|v| fmt_rating(*v)).collect();
    let pred_labels: Vec<String> = predictions.iter().map(|v| fmt_rating(*v)).collect();

    // Per-label tallies: true positives, predicted count, truth count
    let mut tallies: BTreeMap<&str, (usize, usize, usize)> = BTreeMap::new();
    for (t, p) in truth_labels.iter().zip(&pred_labels) {
        if t == p {
            tallies.entry(t).or_default().0 += 1;
        }
        tallies.entry(p).or_default().1 += 1;
        tallies.entry(t).or_default().2 += 1;
    }

    let total = truth_labels.len();
    let correct = truth_labels
        .iter()
        .zip(&pred_labels)
        .filter(|(t, p)| t == p)
        .count();

    let mut classes = BTreeMap::new();
    for (label, (tp, predicted, support)) in &tallies {
        let precision = ratio(*tp, *predicted);
        let recall = ratio(*tp, *support);
        classes.insert(
            label.to_string(),
            ClassMetrics {
                precision,
                recall,
                f1: f1_score(precision, recall),
                support: *support,
            },
        );
    }

    let n_classes = classes.len() as f64;
    let macro_avg = ClassMetrics {
        precision: classes.values().map(|c| c.precision).sum::<f64>() / n_classes,
        recall: classes.values().map(|c| c.recall).sum::<f64>() / n_classes,
        f1: classes.values().map(|c| c.f1).sum::<f64>() / n_classes,
        support: total,
    };
    let weighted_avg = ClassMetrics {
        precision: weighted(&classes, total, |c| c.precision),
        recall: weighted(&classes, total, |c| c.recall),
        f1: weighted(&classes, total, |c| c.f1),
        support: total,
    };

    ClassificationReport {
        classes,
        accuracy: correct as f64 / total as f64,
        macro_avg,
        weighted_avg,
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

fn f1_score(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}

fn weighted(
    classes: &BTreeMap<String, ClassMetrics>,
    total: usize,
    metric: impl Fn(&ClassMetrics) -> f64,
) -> f64 {
    classes
        .values()
        .map(|c| metric(c) * c.support as f64)
        .sum::<f64>()
        / total as f64
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>14} {:>9} {:>9} {:>9} {:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;
        for (label, m) in &self.classes {
            writeln!(
                f,
                "{:>14} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                label, m.precision, m.recall, m.f1, m.support
            )?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>14} {:>9} {:>9} {:>9.2} {:>9}",
            "accuracy", "", "", self.accuracy, self.macro_avg.support
        )?;
        for (name, m) in [("macro avg", &self.macro_avg), ("weighted avg", &self.weighted_avg)] {
            writeln!(
                f,
                "{:>14} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                name, m.precision, m.recall, m.f1, m.support
            )?;
        }
        Ok(())
    }
}
