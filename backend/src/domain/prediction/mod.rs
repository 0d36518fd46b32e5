//! Random-forest regression used by the prediction endpoint.
//!
//! Models are exported as JSON:
//!
//! ```json
//! {"trees": [{"nodes": [
//!   {"feature": 0, "threshold": 1.5, "left": 1, "right": 2},
//!   {"value": 10.0},
//!   {"value": 20.0}
//! ]}]}
//! ```
//!
//! Evaluation starts at node 0 of every tree and takes the left branch when
//! `features[feature] <= threshold`. The prediction is the mean of the leaf
//! values reached.

use serde::Deserialize;

/// Number of input features the model consumes.
pub const FEATURE_COUNT: usize = 3;

/// Model input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Features(pub [f64; FEATURE_COUNT]);

/// Structural problems detected while loading a forest.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ForestError {
    /// The `trees` array is empty.
    #[error("forest contains no trees")]
    NoTrees,
    /// A tree has no nodes to start from.
    #[error("tree {tree} contains no nodes")]
    EmptyTree {
        /// Index of the offending tree.
        tree: usize,
    },
    /// A split reads a feature index past [`FEATURE_COUNT`].
    #[error("tree {tree} node {node} uses feature {feature}; only {FEATURE_COUNT} exist")]
    UnknownFeature {
        /// Index of the offending tree.
        tree: usize,
        /// Index of the split within the tree.
        node: usize,
        /// Feature index the split reads.
        feature: usize,
    },
    /// A split points backwards, at itself, or past the last node.
    #[error("tree {tree} node {node} points at invalid child {child}")]
    InvalidChild {
        /// Index of the offending tree.
        tree: usize,
        /// Index of the split within the tree.
        node: usize,
        /// Child index the split points at.
        child: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    fn evaluate(&self, features: &Features) -> f64 {
        let mut index = 0;
        loop {
            match self.nodes.get(index) {
                Some(Node::Leaf { value }) => return *value,
                Some(Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let x = features.0.get(*feature).copied().unwrap_or(f64::NAN);
                    index = if x <= *threshold { *left } else { *right };
                }
                // Unreachable for validated forests.
                None => return f64::NAN,
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct ForestDto {
    trees: Vec<Tree>,
}

/// Validated random-forest regressor.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "ForestDto")]
pub struct ForestModel {
    trees: Vec<Tree>,
}

impl TryFrom<ForestDto> for ForestModel {
    type Error = ForestError;

    fn try_from(value: ForestDto) -> Result<Self, Self::Error> {
        if value.trees.is_empty() {
            return Err(ForestError::NoTrees);
        }
        for (tree_index, tree) in value.trees.iter().enumerate() {
            validate_tree(tree_index, tree)?;
        }
        Ok(Self { trees: value.trees })
    }
}

fn validate_tree(tree_index: usize, tree: &Tree) -> Result<(), ForestError> {
    if tree.nodes.is_empty() {
        return Err(ForestError::EmptyTree { tree: tree_index });
    }
    for (node_index, node) in tree.nodes.iter().enumerate() {
        let Node::Split {
            feature,
            left,
            right,
            ..
        } = node
        else {
            continue;
        };
        if *feature >= FEATURE_COUNT {
            return Err(ForestError::UnknownFeature {
                tree: tree_index,
                node: node_index,
                feature: *feature,
            });
        }
        // Children must point forward so evaluation always terminates.
        for child in [*left, *right] {
            if child <= node_index || child >= tree.nodes.len() {
                return Err(ForestError::InvalidChild {
                    tree: tree_index,
                    node: node_index,
                    child,
                });
            }
        }
    }
    Ok(())
}

impl ForestModel {
    /// Mean of every tree's output.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "averaging leaf values is the model")]
    pub fn evaluate(&self, features: &Features) -> f64 {
        let total: f64 = self.trees.iter().map(|tree| tree.evaluate(features)).sum();
        #[expect(
            clippy::cast_precision_loss,
            reason = "forests never approach 2^52 trees"
        )]
        let count = self.trees.len() as f64;
        total / count
    }

    /// Number of trees in the forest.
    #[must_use]
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    /// Always false for a validated forest.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }
}
