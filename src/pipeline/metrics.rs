//! Hold-out evaluation metrics

use std::collections::BTreeSet;

use serde::Serialize;

/// Precision, recall and F1 for one label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassMetrics {
    pub label: String,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Averaged precision, recall and F1
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AverageMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Per-label metrics plus accuracy and macro/weighted averages
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationReport {
    pub accuracy: f64,
    pub classes: Vec<ClassMetrics>,
    pub macro_avg: AverageMetrics,
    pub weighted_avg: AverageMetrics,
}

/// Fraction of predictions equal to the truth. Empty input scores 0.
pub fn accuracy(y_true: &[String], y_pred: &[String]) -> f64 {
    if y_true.is_empty() {
        return 0.0;
    }
    let correct = y_true.iter().zip(y_pred).filter(|(t, p)| t == p).count();
    correct as f64 / y_true.len() as f64
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Build a report over every label seen in either the truth or the predictions.
///
/// Undefined ratios (no predictions or no support for a label) count as 0.
pub fn classification_report(y_true: &[String], y_pred: &[String]) -> ClassificationReport {
    let labels: BTreeSet<&str> = y_true
        .iter()
        .chain(y_pred)
        .map(String::as_str)
        .collect();

    let classes: Vec<ClassMetrics> = labels
        .into_iter()
        .map(|label| {
            let tp = y_true
                .iter()
                .zip(y_pred)
                .filter(|(t, p)| *t == label && *p == label)
                .count();
            let predicted = y_pred.iter().filter(|p| *p == label).count();
            let support = y_true.iter().filter(|t| *t == label).count();

            let precision = ratio(tp, predicted);
            let recall = ratio(tp, support);
            let f1 = if precision + recall > 0.0 {
                2.0 * precision * recall / (precision + recall)
            } else {
                0.0
            };

            ClassMetrics {
                label: label.to_string(),
                precision,
                recall,
                f1,
                support,
            }
        })
        .collect();

    let total_support: usize = classes.iter().map(|c| c.support).sum();
    let n_labels = classes.len().max(1) as f64;

    let macro_avg = AverageMetrics {
        precision: classes.iter().map(|c| c.precision).sum::<f64>() / n_labels,
        recall: classes.iter().map(|c| c.recall).sum::<f64>() / n_labels,
        f1: classes.iter().map(|c| c.f1).sum::<f64>() / n_labels,
        support: total_support,
    };

    let weighted = |metric: fn(&ClassMetrics) -> f64| {
        if total_support == 0 {
            0.0
        } else {
            classes
                .iter()
                .map(|c| metric(c) * c.support as f64)
                .sum::<f64>()
                / total_support as f64
        }
    };
    let weighted_avg = AverageMetrics {
        precision: weighted(|c| c.precision),
        recall: weighted(|c| c.recall),
        f1: weighted(|c| c.f1),
        support: total_support,
    };

    ClassificationReport {
        accuracy: accuracy(y_true, y_pred),
        classes,
        macro_avg,
        weighted_avg,
    }
}
