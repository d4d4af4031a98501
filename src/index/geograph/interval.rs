//! α-interval arithmetic (§4.8): usability sets as sorted, disjoint,
//! canonical `[lo, hi] ⊂ [0,1]` lists.
//!
//! Every operation here produces canonical form: intervals sorted by lower
//! bound, non-overlapping (adjacent touching intervals merged), each with
//! `hi >= lo`, all clipped to `[0,1]`. Builders and routers only ever see
//! canonical sets; that invariant is enforced at construction, not just
//! documented.

const EPS: f32 = 1e-6;

/// A canonical α-usability set: disjoint, sorted, closed sub-intervals of
/// `[0,1]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IntervalSet(Vec<(f32, f32)>);

impl IntervalSet {
    /// The full range `[0,1]`.
    #[must_use]
    pub fn full() -> Self {
        Self(vec![(0.0, 1.0)])
    }

    /// The empty set.
    #[must_use]
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// A single `[lo, hi]` interval, clipped to `[0,1]` and dropped if it
    /// collapses or inverts.
    #[must_use]
    pub fn single(lo: f32, hi: f32) -> Self {
        let lo = lo.clamp(0.0, 1.0);
        let hi = hi.clamp(0.0, 1.0);
        if hi <= lo + EPS {
            Self::empty()
        } else {
            Self(vec![(lo, hi)])
        }
    }

    /// Builds a canonical set from arbitrary (possibly unsorted,
    /// overlapping) raw intervals.
    #[must_use]
    pub fn from_raw(mut intervals: Vec<(f32, f32)>) -> Self {
        intervals.retain(|&(lo, hi)| hi > lo + EPS);
        intervals.sort_by(|a, b| a.0.total_cmp(&b.0));
        let mut merged: Vec<(f32, f32)> = Vec::with_capacity(intervals.len());
        for (lo, hi) in intervals {
            if let Some(last) = merged.last_mut() {
                if lo <= last.1 + EPS {
                    last.1 = last.1.max(hi);
                    continue;
                }
            }
            merged.push((lo, hi));
        }
        Self(merged)
    }

    /// Borrows the underlying sorted, disjoint `(lo, hi)` pairs.
    #[must_use]
    pub fn intervals(&self) -> &[(f32, f32)] {
        &self.0
    }

    /// True if the set contains no intervals.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total measure (sum of interval lengths).
    #[must_use]
    pub fn measure(&self) -> f32 {
        self.0.iter().map(|&(lo, hi)| hi - lo).sum()
    }

    /// Membership test: is `alpha` covered by any interval?
    #[must_use]
    pub fn contains(&self, alpha: f32) -> bool {
        self.0.iter().any(|&(lo, hi)| alpha >= lo && alpha <= hi)
    }

    /// Intersection via a two-pointer merge over both canonical sets.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Self {
        let (a, b) = (&self.0, &other.0);
        let (mut i, mut j) = (0, 0);
        let mut out = Vec::new();
        while i < a.len() && j < b.len() {
            let lo = a[i].0.max(b[j].0);
            let hi = a[i].1.min(b[j].1);
            if lo < hi {
                out.push((lo, hi));
            }
            if a[i].1 < b[j].1 {
                i += 1;
            } else {
                j += 1;
            }
        }
        Self::from_raw(out)
    }

    /// Complement within `[0,1]`.
    #[must_use]
    pub fn complement(&self) -> Self {
        let mut out = Vec::new();
        let mut cursor = 0.0_f32;
        for &(lo, hi) in &self.0 {
            if lo > cursor {
                out.push((cursor, lo));
            }
            cursor = cursor.max(hi);
        }
        if cursor < 1.0 {
            out.push((cursor, 1.0));
        }
        Self::from_raw(out)
    }

    /// `self \ other`, computed as `self ∩ complement(other)`.
    #[must_use]
    pub fn subtract(&self, other: &Self) -> Self {
        self.intersect(&other.complement())
    }

    /// Union of an arbitrary collection of sets, merged and canonicalized.
    #[must_use]
    pub fn union_all<'a>(sets: impl IntoIterator<Item = &'a Self>) -> Self {
        let mut raw = Vec::new();
        for s in sets {
            raw.extend_from_slice(&s.0);
        }
        Self::from_raw(raw)
    }
}

#[cfg(test)]
mod interval_tests;
