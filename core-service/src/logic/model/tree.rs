//! CART Decision Tree - binary classifier
//!
//! Gini impurity, axis-aligned splits at midpoints between distinct values,
//! grown until pure. Leaves store the positive-class fraction.

use ndarray::Array2;
use rand::seq::SliceRandom;
use rand::Rng;

use super::ProbabilisticClassifier;

/// Growth limits of a single tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeParams {
    /// Non-constant features evaluated per split
    pub max_features: usize,
    /// Nodes smaller than this become leaves
    pub min_samples_split: usize,
    pub max_depth: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
enum TreeNode {
    Leaf {
        positive_fraction: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Clone, Copy)]
struct BestSplit {
    feature: usize,
    threshold: f64,
    /// Index into the sorted sample slice where the right child starts
    boundary: usize,
    weighted_impurity: f64,
}

/// Fitted tree; nodes stored in a flat arena, root at index 0
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTree {
    nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Fit on the rows listed in `samples` (repeats allowed, e.g. a bootstrap)
    pub fn fit<R: Rng + ?Sized>(
        x: &Array2<f64>,
        y: &[u8],
        mut samples: Vec<usize>,
        params: &TreeParams,
        rng: &mut R,
    ) -> Self {
        let mut tree = DecisionTree { nodes: Vec::new() };
        if samples.is_empty() {
            tree.nodes.push(TreeNode::Leaf { positive_fraction: 0.0 });
            return tree;
        }
        tree.grow(x, y, &mut samples, 0, params, rng);
        tree
    }

    /// Returns the index of the node it created
    fn grow<R: Rng + ?Sized>(
        &mut self,
        x: &Array2<f64>,
        y: &[u8],
        samples: &mut [usize],
        depth: usize,
        params: &TreeParams,
        rng: &mut R,
    ) -> usize {
        let n = samples.len();
        let positives = samples.iter().filter(|&&i| y[i] == 1).count();
        let leaf = TreeNode::Leaf {
            positive_fraction: positives as f64 / n as f64,
        };

        let pure = positives == 0 || positives == n;
        let too_small = n < params.min_samples_split.max(2);
        let too_deep = params.max_depth.map_or(false, |d| depth >= d);
        if pure || too_small || too_deep {
            self.nodes.push(leaf);
            return self.nodes.len() - 1;
        }

        let best = match find_best_split(x, y, samples, params.max_features, rng) {
            Some(best) => best,
            None => {
                self.nodes.push(leaf);
                return self.nodes.len() - 1;
            }
        };

        sort_by_feature(x, samples, best.feature);

        // reserve the slot, children are appended after it
        let index = self.nodes.len();
        self.nodes.push(leaf);

        let (left_samples, right_samples) = samples.split_at_mut(best.boundary);
        let left = self.grow(x, y, left_samples, depth + 1, params, rng);
        let right = self.grow(x, y, right_samples, depth + 1, params, rng);

        self.nodes[index] = TreeNode::Split {
            feature: best.feature,
            threshold: best.threshold,
            left,
            right,
        };
        index
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

}

impl ProbabilisticClassifier for DecisionTree {
    fn predict_proba(&self, features: &[f64]) -> f64 {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                TreeNode::Leaf { positive_fraction } => return *positive_fraction,
                TreeNode::Split { feature, threshold, left, right } => {
                    index = if features[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
    }
}

fn sort_by_feature(x: &Array2<f64>, samples: &mut [usize], feature: usize) {
    samples.sort_by(|&a, &b| x[[a, feature]].total_cmp(&x[[b, feature]]));
}

fn gini(positives: usize, n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let p = positives as f64 / n as f64;
    2.0 * p * (1.0 - p)
}

/// Visit features in random order until `max_features` non-constant ones were scored
fn find_best_split<R: Rng + ?Sized>(
    x: &Array2<f64>,
    y: &[u8],
    samples: &mut [usize],
    max_features: usize,
    rng: &mut R,
) -> Option<BestSplit> {
    let mut features: Vec<usize> = (0..x.ncols()).collect();
    features.shuffle(rng);

    let n = samples.len();
    let total_pos = samples.iter().filter(|&&i| y[i] == 1).count();
    let mut best: Option<BestSplit> = None;
    let mut visited = 0;

    for feature in features {
        if visited >= max_features.max(1) {
            break;
        }
        sort_by_feature(x, samples, feature);

        let lo = x[[samples[0], feature]];
        let hi = x[[samples[n - 1], feature]];
        if lo == hi {
            continue;
        }
        visited += 1;

        let mut left_pos = 0;
        for i in 1..n {
            if y[samples[i - 1]] == 1 {
                left_pos += 1;
            }
            let a = x[[samples[i - 1], feature]];
            let b = x[[samples[i], feature]];
            if a == b {
                continue;
            }

            let weighted = i as f64 * gini(left_pos, i)
                + (n - i) as f64 * gini(total_pos - left_pos, n - i);

            if best.map_or(true, |s| weighted < s.weighted_impurity) {
                let mut threshold = a + (b - a) / 2.0;
                if threshold >= b {
                    threshold = a;
                }
                best = Some(BestSplit {
                    feature,
                    threshold,
                    boundary: i,
                    weighted_impurity: weighted,
                });
            }
        }
    }

    best
}
