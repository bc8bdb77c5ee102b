/// Types that carry a stable sequential id.
pub trait HasId {
    fn id(&self) -> usize;
}

/// Sorting helpers for slices of `T: HasId`.
pub trait SortById {
    /// Stable, ascending sort by `id()`.
    fn sort_by_id(&mut self);
}

impl<T: HasId> SortById for [T] {
    fn sort_by_id(&mut self) {
        self.sort_by_key(|item| item.id());
    }
}
