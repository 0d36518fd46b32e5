//! Result shape for partial-name searches.

/// Outcome of a search that reports a lone hit as a single object.
///
/// # Examples
/// ```
/// use riverwq::domain::Matches;
///
/// assert_eq!(Matches::from_vec(vec![1]), Some(Matches::One(1)));
/// assert_eq!(Matches::from_vec(vec![1, 2]), Some(Matches::Many(vec![1, 2])));
/// assert_eq!(Matches::<i32>::from_vec(Vec::new()), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matches<T> {
    /// Exactly one hit.
    One(T),
    /// Two or more hits in id order.
    Many(Vec<T>),
}

impl<T> Matches<T> {
    /// Classify search hits; `None` when nothing matched.
    #[must_use]
    pub fn from_vec(mut hits: Vec<T>) -> Option<Self> {
        match hits.len() {
            0 => None,
            1 => hits.pop().map(Self::One),
            _ => Some(Self::Many(hits)),
        }
    }

    /// Transform every hit, preserving the shape.
    #[must_use]
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Matches<U> {
        match self {
            Self::One(hit) => Matches::One(f(hit)),
            Self::Many(hits) => Matches::Many(hits.into_iter().map(f).collect()),
        }
    }
}
