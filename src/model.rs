use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("classifier expects {expected} features, got {got}")]
    FeatureLen { expected: usize, got: usize },
}

/// Opaque binary classifier over encoded booking vectors. Label 1 means
/// the booking is predicted to cancel. Implementations must be side-effect
/// free so a single instance can be shared across requests without locking.
pub trait Classifier: Send + Sync {
    fn n_features(&self) -> usize;

    /// Probability distribution over {not cancelled, cancelled}.
    fn predict_proba(&self, features: &[f64]) -> Result<[f64; 2], ModelError>;

    /// Argmax of `predict_proba`; ties resolve to label 0.
    fn predict(&self, features: &[f64]) -> Result<u8, ModelError> {
        let proba = self.predict_proba(features)?;
        Ok(if proba[1] > proba[0] { 1 } else { 0 })
    }
}

/// Pre-trained random forest, deserialized from the JSON artifact exported
/// alongside the training pipeline. Loaded once at startup and immutable
/// afterwards.
#[derive(Debug, Deserialize)]
pub struct RandomForest {
    pub n_features: usize,
    pub trees: Vec<Tree>,
}

#[derive(Debug, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        counts: [f64; 2],
    },
}

impl RandomForest {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read model artifact {}", path.display()))?;
        let forest: RandomForest = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse model artifact {}", path.display()))?;
        forest.validate()?;
        Ok(forest)
    }

    pub fn from_value(value: serde_json::Value) -> anyhow::Result<Self> {
        let forest: RandomForest = serde_json::from_value(value)?;
        forest.validate()?;
        Ok(forest)
    }

    // Child indices must point strictly forward so traversal terminates and
    // stays in bounds without per-request checks.
    fn validate(&self) -> anyhow::Result<()> {
        if self.trees.is_empty() {
            anyhow::bail!("model artifact contains no trees");
        }
        for (t, tree) in self.trees.iter().enumerate() {
            if tree.nodes.is_empty() {
                anyhow::bail!("tree {} has no nodes", t);
            }
            for (i, node) in tree.nodes.iter().enumerate() {
                if let Node::Split {
                    feature,
                    left,
                    right,
                    ..
                } = node
                {
                    if *feature >= self.n_features {
                        anyhow::bail!(
                            "tree {} node {} splits on feature {} but the model has {}",
                            t,
                            i,
                            feature,
                            self.n_features
                        );
                    }
                    if *left <= i || *right <= i || *left >= tree.nodes.len()
                        || *right >= tree.nodes.len()
                    {
                        anyhow::bail!("tree {} node {} has out-of-order child indices", t, i);
                    }
                }
            }
        }
        Ok(())
    }

    fn tree_proba(tree: &Tree, features: &[f64]) -> [f64; 2] {
        // indices validated at load
        let mut idx = 0;
        loop {
            match &tree.nodes[idx] {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
                Node::Leaf { counts } => {
                    let total = counts[0] + counts[1];
                    if total <= 0.0 {
                        return [0.5, 0.5];
                    }
                    return [counts[0] / total, counts[1] / total];
                }
            }
        }
    }
}

impl Classifier for RandomForest {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict_proba(&self, features: &[f64]) -> Result<[f64; 2], ModelError> {
        if features.len() != self.n_features {
            return Err(ModelError::FeatureLen {
                expected: self.n_features,
                got: features.len(),
            });
        }
        let mut acc = [0.0; 2];
        for tree in &self.trees {
            let proba = Self::tree_proba(tree, features);
            acc[0] += proba[0];
            acc[1] += proba[1];
        }
        let n = self.trees.len() as f64;
        Ok([acc[0] / n, acc[1] / n])
    }
}
