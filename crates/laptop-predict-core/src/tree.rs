//! Decision tree ensembles in flat array layout.
//!
//! Each tree is stored as parallel arrays indexed by node id, with node 0 as
//! the root. A node is a leaf when its left child is `-1`; otherwise the row
//! goes left when `row[feature] <= threshold` and right otherwise.

use serde::{Deserialize, Serialize};

use crate::Predictor;

/// Marks a missing child in `children_left` / `children_right`.
pub const LEAF: i64 = -1;

/// A single regression tree. Only checked once it joins a [`TreeEnsemble`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    children_left: Vec<i64>,
    children_right: Vec<i64>,
    feature: Vec<i64>,
    threshold: Vec<f64>,
    value: Vec<f64>,
}

impl Tree {
    pub fn new(
        children_left: Vec<i64>,
        children_right: Vec<i64>,
        feature: Vec<i64>,
        threshold: Vec<f64>,
        value: Vec<f64>,
    ) -> Self {
        Self {
            children_left,
            children_right,
            feature,
            threshold,
            value,
        }
    }

    /// A tree consisting of one leaf.
    pub fn leaf(value: f64) -> Self {
        Self {
            children_left: vec![LEAF],
            children_right: vec![LEAF],
            feature: vec![-2],
            threshold: vec![-2.0],
            value: vec![value],
        }
    }

    fn len(&self) -> usize {
        self.children_left.len()
    }

    fn is_leaf(&self, node: usize) -> bool {
        self.children_left[node] == LEAF
    }

    /// Walks from the root to a leaf. Assumes the tree passed `validate`.
    fn evaluate(&self, row: &[f64]) -> f64 {
        let mut node = 0usize;
        while !self.is_leaf(node) {
            let feature = self.feature[node] as usize;
            node = if row[feature] <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        self.value[node]
    }

    fn validate(&self, n_features: usize) -> Result<(), String> {
        let len = self.len();
        if len == 0 {
            return Err("tree has no nodes".into());
        }
        if [
            self.children_right.len(),
            self.feature.len(),
            self.threshold.len(),
            self.value.len(),
        ]
        .iter()
        .any(|&l| l != len)
        {
            return Err("tree arrays differ in length".into());
        }

        for node in 0..len {
            let left = self.children_left[node];
            let right = self.children_right[node];

            if left == LEAF || right == LEAF {
                if left != right {
                    return Err(format!("node {node} has exactly one child"));
                }
                if !self.value[node].is_finite() {
                    return Err(format!("leaf {node} has a non-finite value"));
                }
                continue;
            }

            // Children must come after their parent so traversal always terminates.
            for child in [left, right] {
                if child <= node as i64 || child >= len as i64 {
                    return Err(format!("node {node} has out of range child {child}"));
                }
            }
            let feature = self.feature[node];
            if feature < 0 || feature as usize >= n_features {
                return Err(format!(
                    "node {node} splits on feature {feature}, model has {n_features}"
                ));
            }
            if !self.threshold[node].is_finite() {
                return Err(format!("node {node} has a non-finite threshold"));
            }
        }
        Ok(())
    }
}

/// How per-tree outputs are combined into one prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Aggregation {
    /// Random forest: average of tree outputs.
    Mean,
    /// Gradient boosting: `base_score + learning_rate * Σ outputs`.
    Boosted { base_score: f64, learning_rate: f64 },
}

/// A validated ensemble. Every constructor, deserialization included, runs
/// the structural checks, so evaluation never indexes out of bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TreeEnsembleArtifact")]
pub struct TreeEnsemble {
    n_features: usize,
    aggregation: Aggregation,
    trees: Vec<Tree>,
}

#[derive(Deserialize)]
struct TreeEnsembleArtifact {
    n_features: usize,
    aggregation: Aggregation,
    trees: Vec<Tree>,
}

impl TryFrom<TreeEnsembleArtifact> for TreeEnsemble {
    type Error = String;

    fn try_from(artifact: TreeEnsembleArtifact) -> Result<Self, Self::Error> {
        Self::try_new(artifact.n_features, artifact.aggregation, artifact.trees)
    }
}

impl TreeEnsemble {
    pub fn try_new(
        n_features: usize,
        aggregation: Aggregation,
        trees: Vec<Tree>,
    ) -> Result<Self, String> {
        let ensemble = Self {
            n_features,
            aggregation,
            trees,
        };
        ensemble.validate()?;
        Ok(ensemble)
    }

    pub fn aggregation(&self) -> Aggregation {
        self.aggregation
    }

    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    fn validate(&self) -> Result<(), String> {
        if self.n_features == 0 {
            return Err("ensemble declares zero features".into());
        }
        if self.trees.is_empty() {
            return Err("ensemble has no trees".into());
        }
        if let Aggregation::Boosted {
            base_score,
            learning_rate,
        } = self.aggregation
        {
            if !base_score.is_finite() || !learning_rate.is_finite() {
                return Err("boosting parameters must be finite".into());
            }
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features)
                .map_err(|e| format!("tree {i}: {e}"))?;
        }
        Ok(())
    }
}

impl Predictor for TreeEnsemble {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict_row(&self, row: &[f64]) -> f64 {
        let sum: f64 = self.trees.iter().map(|t| t.evaluate(row)).sum();
        match self.aggregation {
            Aggregation::Mean => sum / self.trees.len() as f64,
            Aggregation::Boosted {
                base_score,
                learning_rate,
            } => base_score + learning_rate * sum,
        }
    }
}
