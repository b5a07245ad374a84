use crate::Rid;

/// Sorts IDs in place by [`Rid::compare`].
///
/// The sort is **not** stable: IDs from the same 256 ms bucket compare equal
/// and may end up in any relative order. Callers that need a deterministic
/// tie-break should sort by full bytes afterwards (e.g. with
/// `sort_by(|a, b| a.compare(b).then(a.as_bytes().cmp(b.as_bytes())))`).
///
/// # Example
///
/// ```
/// use rid::{Rid, sort};
///
/// let t1 = Rid::from_components(1_000, 0, 0);
/// let t2 = Rid::from_components(2_000, 0, 0);
/// let t3 = Rid::from_components(3_000, 0, 0);
///
/// let mut ids = [t3, t1, t2];
/// sort(&mut ids);
/// assert_eq!(ids, [t1, t2, t3]);
/// ```
pub fn sort(ids: &mut [Rid]) {
    ids.sort_unstable_by(Rid::compare);
}
