//! Per-color usage counts in first-seen order.

/// Mapping from palette entry name to the number of cells using it.
///
/// Insertion order is the order in which colors are first met during a
/// row-major scan of the grid. That order defines legend numbering: the
/// first color seen is number 1, the next new one number 2, and so on.
///
/// # Example
///
/// ```
/// use mosaic_core::ColorCounts;
///
/// let mut counts = ColorCounts::new();
/// for name in ["Red", "Blue", "Red"] {
///     counts.record(name);
/// }
/// assert_eq!(counts.get("Red"), Some(2));
/// assert_eq!(counts.number_of("Blue"), Some(2));
/// assert_eq!(counts.total(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorCounts {
    counts: Vec<(String, usize)>,
}

impl ColorCounts {
    /// Empty counts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more use of `name`, appending it if new.
    pub fn record(&mut self, name: &str) {
        match self.counts.iter_mut().find(|(n, _)| n == name) {
            Some((_, count)) => *count += 1,
            None => self.counts.push((name.to_string(), 1)),
        }
    }

    /// Count one more use of the color at `position`, a value previously
    /// returned by [`position`](Self::position) or [`push_new`](Self::push_new).
    pub(crate) fn increment_at(&mut self, position: usize) {
        self.counts[position].1 += 1;
    }

    /// Append a new color with count 1 and return its position.
    pub(crate) fn push_new(&mut self, name: &str) -> usize {
        self.counts.push((name.to_string(), 1));
        self.counts.len() - 1
    }

    /// Usage count for `name`.
    pub fn get(&self, name: &str) -> Option<usize> {
        self.counts
            .iter()
            .find(|(n, _)| n == name)
            .map(|&(_, count)| count)
    }

    /// Zero-based insertion position of `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.counts.iter().position(|(n, _)| n == name)
    }

    /// One-based legend number of `name`.
    pub fn number_of(&self, name: &str) -> Option<usize> {
        self.position(name).map(|p| p + 1)
    }

    /// `(name, count)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(n, c)| (n.as_str(), *c))
    }

    /// Number of distinct colors.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True if no color was recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, c)| c).sum()
    }
}

impl<'a> FromIterator<&'a str> for ColorCounts {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut counts = Self::new();
        for name in iter {
            counts.record(name);
        }
        counts
    }
}
