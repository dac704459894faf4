//! Stress classifier models exported from offline training
//!
//! Two model kinds are understood:
//! - `random_forest`: decision trees stored as flat node arrays; per-tree leaf
//!   class counts are normalised and averaged
//! - `logistic_regression`: one coefficient row per class (or a single row
//!   for a binary model) with softmax / sigmoid probabilities

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// A classifier producing per-class probabilities for one feature row
pub trait ProbabilisticClassifier {
    /// Number of classes the model predicts
    fn n_classes(&self) -> usize;

    /// Number of input columns the model expects
    fn n_features(&self) -> usize;

    /// Per-class probabilities for one row
    fn predict_proba(&self, row: &[f64]) -> AppResult<Vec<f64>>;

    /// Most probable class index. Ties go to the lowest index.
    fn predict(&self, row: &[f64]) -> AppResult<usize> {
        let proba = self.predict_proba(row)?;
        argmax(&proba).ok_or_else(|| {
            AppError::Internal("classifier returned no probabilities".to_string())
        })
    }

    /// Structural checks run once after deserialization
    fn check(&self) -> AppResult<()>;
}

/// Index of the largest value, first one on ties
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

fn check_row_width(expected: usize, row: &[f64]) -> AppResult<()> {
    if row.len() != expected {
        return Err(AppError::SchemaMismatch(format!(
            "model expects {} features, row has {}",
            expected,
            row.len()
        )));
    }
    Ok(())
}

/// Serialized classifier, tagged by kind
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classifier {
    RandomForest(RandomForest),
    LogisticRegression(LogisticRegression),
}

impl Classifier {
    pub fn kind(&self) -> &'static str {
        match self {
            Classifier::RandomForest(_) => "random_forest",
            Classifier::LogisticRegression(_) => "logistic_regression",
        }
    }

    fn inner(&self) -> &dyn ProbabilisticClassifier {
        match self {
            Classifier::RandomForest(m) => m,
            Classifier::LogisticRegression(m) => m,
        }
    }
}

impl ProbabilisticClassifier for Classifier {
    fn n_classes(&self) -> usize {
        self.inner().n_classes()
    }

    fn n_features(&self) -> usize {
        self.inner().n_features()
    }

    fn predict_proba(&self, row: &[f64]) -> AppResult<Vec<f64>> {
        self.inner().predict_proba(row)
    }

    fn check(&self) -> AppResult<()> {
        self.inner().check()
    }
}

// ============================================================================
// Random forest
// ============================================================================

/// A node of a decision tree
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TreeNode {
    /// Rows with `row[feature] <= threshold` go left
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Class counts (or weights) of the training rows that reached the leaf
    Leaf { value: Vec<f64> },
}

/// Decision tree stored as a flat node array, root at index 0
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Normalised class distribution of the leaf the row lands in
    fn leaf_distribution(&self, row: &[f64]) -> AppResult<Vec<f64>> {
        let mut index = 0;
        loop {
            match self.nodes.get(index) {
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let value = row.get(*feature).ok_or_else(|| {
                        AppError::SchemaMismatch(format!(
                            "split on feature {} but row has {} features",
                            feature,
                            row.len()
                        ))
                    })?;
                    index = if *value <= *threshold { *left } else { *right };
                }
                Some(TreeNode::Leaf { value }) => {
                    let total: f64 = value.iter().sum();
                    return Ok(value.iter().map(|v| v / total).collect());
                }
                None => {
                    return Err(AppError::Internal(format!(
                        "tree node {} does not exist",
                        index
                    )))
                }
            }
        }
    }

    fn check(&self, tree_index: usize, n_features: usize, n_classes: usize) -> AppResult<()> {
        if self.nodes.is_empty() {
            return Err(AppError::ArtifactLoad(format!("tree {} is empty", tree_index)));
        }
        for (i, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= n_features {
                        return Err(AppError::SchemaMismatch(format!(
                            "tree {} node {} splits on feature {} of {}",
                            tree_index, i, feature, n_features
                        )));
                    }
                    if !threshold.is_finite() {
                        return Err(AppError::ArtifactLoad(format!(
                            "tree {} node {} has a non-finite threshold",
                            tree_index, i
                        )));
                    }
                    // children after the parent keeps traversal acyclic
                    for child in [left, right] {
                        if *child <= i || *child >= self.nodes.len() {
                            return Err(AppError::ArtifactLoad(format!(
                                "tree {} node {} has invalid child {}",
                                tree_index, i, child
                            )));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if value.len() != n_classes {
                        return Err(AppError::ArtifactLoad(format!(
                            "tree {} leaf {} has {} values for {} classes",
                            tree_index,
                            i,
                            value.len(),
                            n_classes
                        )));
                    }
                    let valid = value.iter().all(|v| v.is_finite() && *v >= 0.0);
                    if !valid || value.iter().sum::<f64>() <= 0.0 {
                        return Err(AppError::ArtifactLoad(format!(
                            "tree {} leaf {} has invalid class weights",
                            tree_index, i
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Ensemble of decision trees with averaged leaf probabilities
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RandomForest {
    pub n_features: usize,
    pub n_classes: usize,
    pub trees: Vec<DecisionTree>,
}

impl ProbabilisticClassifier for RandomForest {
    fn n_classes(&self) -> usize {
        self.n_classes
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict_proba(&self, row: &[f64]) -> AppResult<Vec<f64>> {
        check_row_width(self.n_features, row)?;

        let mut proba = vec![0.0; self.n_classes];
        for tree in &self.trees {
            let distribution = tree.leaf_distribution(row)?;
            for (p, d) in proba.iter_mut().zip(distribution) {
                *p += d;
            }
        }

        let n_trees = self.trees.len() as f64;
        Ok(proba.into_iter().map(|p| p / n_trees).collect())
    }

    fn check(&self) -> AppResult<()> {
        if self.n_classes == 0 {
            return Err(AppError::ArtifactLoad("forest has no classes".to_string()));
        }
        if self.trees.is_empty() {
            return Err(AppError::ArtifactLoad("forest has no trees".to_string()));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.check(i, self.n_features, self.n_classes)?;
        }
        Ok(())
    }
}

// ============================================================================
// Logistic regression
// ============================================================================

/// Linear model with softmax output
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogisticRegression {
    /// One row per class; a single row describes a binary model
    pub coefficients: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
}

impl LogisticRegression {
    fn is_binary(&self) -> bool {
        self.coefficients.len() == 1
    }

    fn decision(&self, class: usize, row: &[f64]) -> f64 {
        let dot: f64 = self.coefficients[class]
            .iter()
            .zip(row)
            .map(|(w, x)| w * x)
            .sum();
        dot + self.intercepts[class]
    }
}

impl ProbabilisticClassifier for LogisticRegression {
    fn n_classes(&self) -> usize {
        if self.is_binary() {
            2
        } else {
            self.coefficients.len()
        }
    }

    fn n_features(&self) -> usize {
        self.coefficients.first().map(Vec::len).unwrap_or(0)
    }

    fn predict_proba(&self, row: &[f64]) -> AppResult<Vec<f64>> {
        check_row_width(self.n_features(), row)?;

        if self.is_binary() {
            let p = 1.0 / (1.0 + (-self.decision(0, row)).exp());
            return Ok(vec![1.0 - p, p]);
        }

        let scores: Vec<f64> = (0..self.coefficients.len())
            .map(|c| self.decision(c, row))
            .collect();
        let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
        let total: f64 = exps.iter().sum();
        Ok(exps.into_iter().map(|e| e / total).collect())
    }

    fn check(&self) -> AppResult<()> {
        if self.coefficients.is_empty() {
            return Err(AppError::ArtifactLoad(
                "logistic regression has no coefficients".to_string(),
            ));
        }
        if self.coefficients.len() != self.intercepts.len() {
            return Err(AppError::ArtifactLoad(format!(
                "{} coefficient rows but {} intercepts",
                self.coefficients.len(),
                self.intercepts.len()
            )));
        }
        let width = self.n_features();
        if self.coefficients.iter().any(|row| row.len() != width) {
            return Err(AppError::ArtifactLoad(
                "coefficient rows have different widths".to_string(),
            ));
        }
        let finite = self
            .coefficients
            .iter()
            .flatten()
            .chain(&self.intercepts)
            .all(|v| v.is_finite());
        if !finite {
            return Err(AppError::ArtifactLoad(
                "logistic regression has non-finite weights".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stump() -> RandomForest {
        RandomForest {
            n_features: 2,
            n_classes: 2,
            trees: vec![DecisionTree {
                nodes: vec![
                    TreeNode::Split {
                        feature: 0,
                        threshold: 5.0,
                        left: 1,
                        right: 2,
                    },
                    TreeNode::Leaf {
                        value: vec![3.0, 1.0],
                    },
                    TreeNode::Leaf {
                        value: vec![0.0, 2.0],
                    },
                ],
            }],
        }
    }

    #[test]
    fn test_argmax_first_wins_ties() {
        assert_eq!(argmax(&[0.2, 0.4, 0.4]), Some(1));
        assert_eq!(argmax(&[0.5, 0.5]), Some(0));
        assert_eq!(argmax(&[]), None);
    }

    #[test]
    fn test_forest_threshold_goes_left() {
        let forest = stump();
        assert_eq!(forest.predict_proba(&[5.0, 0.0]).unwrap(), vec![0.75, 0.25]);
        assert_eq!(forest.predict_proba(&[5.1, 0.0]).unwrap(), vec![0.0, 1.0]);
        assert_eq!(forest.predict(&[1.0, 0.0]).unwrap(), 0);
    }

    #[test]
    fn test_forest_rejects_wrong_width() {
        assert!(matches!(
            stump().predict_proba(&[1.0]),
            Err(AppError::SchemaMismatch(_))
        ));
    }

    #[test]
    fn test_forest_check_rejects_backward_child() {
        let mut forest = stump();
        forest.trees[0].nodes[0] = TreeNode::Split {
            feature: 0,
            threshold: 5.0,
            left: 0,
            right: 2,
        };
        assert!(matches!(forest.check(), Err(AppError::ArtifactLoad(_))));
    }

    #[test]
    fn test_forest_check_rejects_feature_out_of_schema() {
        let mut forest = stump();
        forest.trees[0].nodes[0] = TreeNode::Split {
            feature: 7,
            threshold: 5.0,
            left: 1,
            right: 2,
        };
        assert!(matches!(forest.check(), Err(AppError::SchemaMismatch(_))));
    }

    #[test]
    fn test_forest_check_rejects_bad_leaf() {
        let mut forest = stump();
        forest.trees[0].nodes[2] = TreeNode::Leaf {
            value: vec![0.0, 0.0],
        };
        assert!(forest.check().is_err());

        forest.trees[0].nodes[2] = TreeNode::Leaf { value: vec![1.0] };
        assert!(forest.check().is_err());
    }

    #[test]
    fn test_softmax_probabilities() {
        let model = LogisticRegression {
            coefficients: vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![0.0, 0.0]],
            intercepts: vec![0.0, 0.0, 0.0],
        };
        model.check().unwrap();

        let proba = model.predict_proba(&[2.0, 0.0]).unwrap();
        assert_eq!(proba.len(), 3);
        assert!((proba.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert_eq!(model.predict(&[2.0, 0.0]).unwrap(), 0);
        assert_eq!(model.predict(&[0.0, 2.0]).unwrap(), 1);
    }

    #[test]
    fn test_binary_logistic_regression() {
        let model = LogisticRegression {
            coefficients: vec![vec![1.0]],
            intercepts: vec![0.0],
        };
        assert_eq!(model.n_classes(), 2);
        assert_eq!(model.predict_proba(&[0.0]).unwrap(), vec![0.5, 0.5]);
        assert_eq!(model.predict(&[3.0]).unwrap(), 1);
    }

    #[test]
    fn test_tagged_deserialization() {
        let json = r#"{
            "kind": "logistic_regression",
            "coefficients": [[0.5, -0.5]],
            "intercepts": [0.1]
        }"#;
        let classifier: Classifier = serde_json::from_str(json).unwrap();
        assert_eq!(classifier.kind(), "logistic_regression");
        assert_eq!(classifier.n_features(), 2);
    }
}
