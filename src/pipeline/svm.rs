//! Linear support vector classifier
//!
//! Squared hinge loss with an L2 penalty, solved in the dual by coordinate
//! descent (Hsieh et al., 2008). The intercept is learned as the weight of a
//! constant feature of value 1.0, so it is regularized like any other weight.
//!
//! Two classes share a single boundary; three or more are trained
//! one-vs-rest and predicted by the highest decision value.

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::{ClassifierError, Result};
use crate::pipeline::vectorizer::SparseVector;

/// Projected gradients smaller than this are treated as zero
const GRADIENT_EPSILON: f64 = 1e-12;

/// Solver settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SvmConfig {
    /// Inverse regularization strength
    pub c: f64,
    /// Maximum passes over the training set per boundary
    pub max_iter: usize,
    /// Stop when the projected gradient spread falls below this
    pub tol: f64,
    /// Seed for the coordinate visiting order
    pub seed: u64,
}

impl Default for SvmConfig {
    fn default() -> Self {
        Self {
            c: 1.0,
            max_iter: 1000,
            tol: 1e-4,
            seed: 42,
        }
    }
}

/// One learned hyperplane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boundary {
    pub weights: Vec<f64>,
    pub intercept: f64,
}

impl Boundary {
    pub fn decision(&self, x: &SparseVector) -> f64 {
        x.iter()
            .filter_map(|&(j, v)| self.weights.get(j).map(|w| w * v))
            .sum::<f64>()
            + self.intercept
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinearSvm {
    config: SvmConfig,
    classes: Vec<String>,
    boundaries: Vec<Boundary>,
}

impl LinearSvm {
    pub fn new(config: SvmConfig) -> Self {
        Self {
            config,
            classes: Vec::new(),
            boundaries: Vec::new(),
        }
    }

    /// Labels the classifier can emit, sorted.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn is_fitted(&self) -> bool {
        !self.boundaries.is_empty()
    }

    pub fn fit(&mut self, x: &[SparseVector], labels: &[String], n_features: usize) -> Result<()> {
        if x.is_empty() {
            return Err(ClassifierError::EmptyTrainingSet);
        }

        let classes: Vec<String> = labels
            .iter()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if classes.len() < 2 {
            return Err(ClassifierError::TooFewClasses {
                found: classes.len(),
            });
        }

        let positives: Vec<&String> = if classes.len() == 2 {
            vec![&classes[1]]
        } else {
            classes.iter().collect()
        };

        let boundaries = positives
            .into_iter()
            .map(|positive| {
                let y: Vec<f64> = labels
                    .iter()
                    .map(|l| if l == positive { 1.0 } else { -1.0 })
                    .collect();
                solve_binary(x, &y, n_features, &self.config)
            })
            .collect();

        self.classes = classes;
        self.boundaries = boundaries;
        Ok(())
    }

    /// Raw decision values, one per boundary.
    pub fn decision_function(&self, x: &SparseVector) -> Vec<f64> {
        self.boundaries.iter().map(|b| b.decision(x)).collect()
    }

    pub fn predict_one(&self, x: &SparseVector) -> Result<&str> {
        if !self.is_fitted() {
            return Err(ClassifierError::NotFitted);
        }
        let scores = self.decision_function(x);

        let idx = if self.classes.len() == 2 {
            usize::from(scores[0] > 0.0)
        } else {
            // first maximum wins
            let mut best = 0;
            for (i, score) in scores.iter().enumerate().skip(1) {
                if *score > scores[best] {
                    best = i;
                }
            }
            best
        };
        Ok(&self.classes[idx])
    }

    pub fn predict(&self, x: &[SparseVector]) -> Result<Vec<String>> {
        x.iter()
            .map(|row| self.predict_one(row).map(str::to_string))
            .collect()
    }
}

/// Dual coordinate descent for one L2-regularized, L2-loss boundary.
fn solve_binary(x: &[SparseVector], y: &[f64], n_features: usize, config: &SvmConfig) -> Boundary {
    let diag = 0.5 / config.c;
    let mut w = vec![0.0; n_features];
    let mut b = 0.0;
    let mut alpha = vec![0.0; x.len()];

    // Squared norm of each row including the constant bias feature
    let qd: Vec<f64> = x
        .iter()
        .map(|row| row.iter().map(|(_, v)| v * v).sum::<f64>() + 1.0 + diag)
        .collect();

    let mut order: Vec<usize> = (0..x.len()).collect();
    let mut rng = StdRng::seed_from_u64(config.seed);

    for _ in 0..config.max_iter {
        order.shuffle(&mut rng);
        let mut pg_max = f64::NEG_INFINITY;
        let mut pg_min = f64::INFINITY;

        for &i in &order {
            let row = &x[i];
            let margin = row.iter().map(|&(j, v)| w[j] * v).sum::<f64>() + b;
            let g = y[i] * margin - 1.0 + diag * alpha[i];
            let pg = if alpha[i] == 0.0 { g.min(0.0) } else { g };

            pg_max = pg_max.max(pg);
            pg_min = pg_min.min(pg);

            if pg.abs() > GRADIENT_EPSILON {
                let old = alpha[i];
                alpha[i] = (old - g / qd[i]).max(0.0);
                let delta = (alpha[i] - old) * y[i];
                for &(j, v) in row {
                    w[j] += delta * v;
                }
                b += delta;
            }
        }

        if pg_max - pg_min <= config.tol {
            break;
        }
    }

    Boundary {
        weights: w,
        intercept: b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_binary_separable() {
        let x: Vec<SparseVector> = vec![
            vec![(0, 1.0)],
            vec![(0, 0.9), (2, 0.1)],
            vec![(1, 1.0)],
            vec![(1, 0.8), (2, 0.2)],
        ];
        let y = labels(&["Food", "Food", "Shopping", "Shopping"]);
        let mut svm = LinearSvm::new(SvmConfig::default());
        svm.fit(&x, &y, 3).unwrap();

        assert_eq!(svm.classes(), &["Food".to_string(), "Shopping".to_string()]);
        assert_eq!(svm.decision_function(&x[0]).len(), 1);
        assert_eq!(svm.predict(&x).unwrap(), y);
        assert_eq!(svm.predict_one(&vec![(0, 1.0)]).unwrap(), "Food");
    }

    #[test]
    fn test_one_vs_rest_three_classes() {
        let x: Vec<SparseVector> = vec![
            vec![(0, 1.0)],
            vec![(0, 1.0)],
            vec![(1, 1.0)],
            vec![(1, 1.0)],
            vec![(2, 1.0)],
            vec![(2, 1.0)],
        ];
        let y = labels(&["a", "a", "b", "b", "c", "c"]);
        let mut svm = LinearSvm::new(SvmConfig::default());
        svm.fit(&x, &y, 3).unwrap();

        assert_eq!(svm.decision_function(&x[0]).len(), 3);
        assert_eq!(svm.predict(&x).unwrap(), y);
    }

    #[test]
    fn test_prediction_space_is_closed() {
        let x: Vec<SparseVector> = vec![vec![(0, 1.0)], vec![(1, 1.0)]];
        let y = labels(&["x", "y"]);
        let mut svm = LinearSvm::new(SvmConfig::default());
        svm.fit(&x, &y, 2).unwrap();

        // An empty row still maps onto a trained label
        let pred = svm.predict_one(&Vec::new()).unwrap();
        assert!(pred == "x" || pred == "y");
    }

    #[test]
    fn test_single_class_rejected() {
        let x: Vec<SparseVector> = vec![vec![(0, 1.0)], vec![(0, 0.5)]];
        let mut svm = LinearSvm::new(SvmConfig::default());
        let err = svm.fit(&x, &labels(&["a", "a"]), 1).unwrap_err();
        assert!(matches!(err, ClassifierError::TooFewClasses { found: 1 }));
    }

    #[test]
    fn test_predict_before_fit() {
        let svm = LinearSvm::new(SvmConfig::default());
        assert!(matches!(
            svm.predict_one(&Vec::new()),
            Err(ClassifierError::NotFitted)
        ));
    }

    #[test]
    fn test_fit_is_deterministic() {
        let x: Vec<SparseVector> = vec![
            vec![(0, 0.7), (1, 0.7)],
            vec![(1, 1.0)],
            vec![(0, 1.0)],
            vec![(0, 0.2), (1, 0.9)],
        ];
        let y = labels(&["p", "q", "p", "q"]);
        let mut first = LinearSvm::new(SvmConfig::default());
        let mut second = LinearSvm::new(SvmConfig::default());
        first.fit(&x, &y, 2).unwrap();
        second.fit(&x, &y, 2).unwrap();
        assert_eq!(first.boundaries[0].weights, second.boundaries[0].weights);
        assert_eq!(first.boundaries[0].intercept, second.boundaries[0].intercept);
    }
}
