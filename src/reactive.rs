use std::sync::Arc;

// ---------------------------------------------------------------------------
// Memo: one cached derived value behind a dirty flag
// ---------------------------------------------------------------------------

/// A memoized derived value.
///
/// The value is computed on the first read after [`Memo::invalidate`] and
/// shared as an `Arc` until the next invalidation, so every reader in one
/// update cycle sees the same instance.
#[derive(Debug)]
pub struct Memo<T> {
    value: Option<Arc<T>>,
    computations: u64,
}

impl<T> Default for Memo<T> {
    fn default() -> Self {
        Memo {
            value: None,
            computations: 0,
        }
    }
}

impl<T> Memo<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the cached value; the next read recomputes.
    pub fn invalidate(&mut self) {
        self.value = None;
    }

    /// Return the cached value, running `compute` only if dirty.
    pub fn get_or_compute(&mut self, compute: impl FnOnce() -> T) -> Arc<T> {
        if let Some(value) = &self.value {
            return Arc::clone(value);
        }
        let value = Arc::new(compute());
        self.computations += 1;
        self.value = Some(Arc::clone(&value));
        value
    }

    /// How many times the value has been computed so far.
    pub fn computations(&self) -> u64 {
        self.computations
    }
}
