//! K-Fold cross-validation splitter

/// K-Fold cross-validation splitter
#[derive(Clone, Debug)]
pub struct KFold {
    n_splits: usize,
    shuffle: bool,
    seed: u64,
}

impl KFold {
    /// Create a splitter; `n_splits` is raised to at least 1
    pub fn new(n_splits: usize) -> Self {
        Self { n_splits: n_splits.max(1), shuffle: true, seed: 42 }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    pub fn n_splits(&self) -> usize {
        self.n_splits
    }

    /// Generate `(train, test)` indices for each fold
    ///
    /// Test folds partition `0..n_samples`; the first `n_samples % n_splits`
    /// folds get one extra sample.
    pub fn split(&self, n_samples: usize) -> Vec<(Vec<usize>, Vec<usize>)> {
        let mut indices: Vec<usize> = (0..n_samples).collect();

        if self.shuffle {
            // LCG Fisher-Yates, reproducible per seed
            let mut rng_state = self.seed;
            for i in (1..n_samples).rev() {
                rng_state = rng_state.wrapping_mul(6364136223846793005).wrapping_add(1);
                let j = (rng_state >> 33) as usize % (i + 1);
                indices.swap(i, j);
            }
        }

        let fold_size = n_samples / self.n_splits;
        let remainder = n_samples % self.n_splits;

        let mut folds = Vec::with_capacity(self.n_splits);
        let mut start = 0;
        for i in 0..self.n_splits {
            let end = start + fold_size + usize::from(i < remainder);
            let test: Vec<usize> = indices[start..end].to_vec();
            let train: Vec<usize> =
                indices[..start].iter().chain(indices[end..].iter()).copied().collect();
            folds.push((train, test));
            start = end;
        }
        folds
    }
}
