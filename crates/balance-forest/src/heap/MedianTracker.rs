use tracing::trace;

use crate::error::{ForestError, Result};

use super::binary_heap::Heap;

/// Middle of the values seen so far.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Median<T> {
    /// Odd count: the single central value.
    Single(T),
    /// Even count: the two central values, lower first.
    Pair(T, T),
}

impl<T: Copy + Into<f64>> Median<T> {
    /// The single value, or the mean of the pair.
    pub fn value(self) -> f64 {
        match self {
            Median::Single(v) => v.into(),
            Median::Pair(a, b) => (a.into() + b.into()) / 2.0,
        }
    }
}

/// Running median over a stream, kept in two heaps.
///
/// `lo` is a max-heap holding the lower half and `hi` a min-heap holding the
/// upper half. After every push `0 <= hi.len() - lo.len() <= 1` and every
/// value in `lo` is at most every value in `hi`. The first value always
/// seeds `hi`, so `hi` carries the extra element on odd counts.
#[derive(Clone, Debug)]
pub struct MedianTracker<T> {
    lo: Heap<T>,
    hi: Heap<T>,
}

impl<T: Ord> Default for MedianTracker<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> MedianTracker<T> {
    pub fn new() -> Self {
        Self {
            lo: Heap::max(),
            hi: Heap::min(),
        }
    }

    pub fn push(&mut self, x: T) {
        let upper = match self.hi.peek() {
            None => {
                self.hi.push(x);
                self.debug_check();
                return;
            }
            Some(pivot) => x >= *pivot,
        };
        let hi_short = self.hi.len() <= self.lo.len();

        if upper {
            self.hi.push(x);
            if !hi_short {
                Self::transfer(&mut self.hi, &mut self.lo);
                trace!(lo = self.lo.len(), hi = self.hi.len(), "moved hi root to lo");
            }
        } else {
            self.lo.push(x);
            if hi_short {
                Self::transfer(&mut self.lo, &mut self.hi);
                trace!(lo = self.lo.len(), hi = self.hi.len(), "moved lo root to hi");
            }
        }
        self.debug_check();
    }

    /// Pairs two heaps as-is, skipping every balance check.
    #[cfg(test)]
    fn from_heaps(lo: Heap<T>, hi: Heap<T>) -> Self {
        Self { lo, hi }
    }

    fn transfer(from: &mut Heap<T>, to: &mut Heap<T>) {
        let v = from.pop().expect("heap was just pushed to");
        to.push(v);
    }

    pub fn len(&self) -> usize {
        self.lo.len() + self.hi.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hi.is_empty()
    }

    pub fn lo_len(&self) -> usize {
        self.lo.len()
    }

    pub fn hi_len(&self) -> usize {
        self.hi.len()
    }

    /// Max-heap of the lower half.
    pub fn lo(&self) -> &Heap<T> {
        &self.lo
    }

    /// Min-heap of the upper half.
    pub fn hi(&self) -> &Heap<T> {
        &self.hi
    }

    pub fn assert_valid(&self) -> std::result::Result<(), String> {
        self.lo.assert_valid()?;
        self.hi.assert_valid()?;
        let (lo, hi) = (self.lo.len(), self.hi.len());
        if hi < lo || hi - lo > 1 {
            return Err(format!("Heap sizes out of balance: lo={lo}, hi={hi}"));
        }
        if let (Some(a), Some(b)) = (self.lo.peek(), self.hi.peek()) {
            if a > b {
                return Err("Lower half exceeds upper half".to_string());
            }
        }
        Ok(())
    }

    #[inline]
    fn debug_check(&self) {
        if cfg!(debug_assertions) {
            if let Err(err) = self.assert_valid() {
                panic!("median tracker invariant broken: {err}");
            }
        }
    }
}

impl<T: Ord + Clone> MedianTracker<T> {
    /// Fails with [`ForestError::EmptyTracker`] before the first push.
    pub fn median(&self) -> Result<Median<T>> {
        let hi = self.hi.peek().ok_or(ForestError::EmptyTracker)?;
        if self.hi.len() > self.lo.len() {
            return Ok(Median::Single(hi.clone()));
        }
        let lo = self.lo.peek().ok_or(ForestError::EmptyTracker)?;
        Ok(Median::Pair(lo.clone(), hi.clone()))
    }
}

impl<T: Ord + Copy + Into<f64>> MedianTracker<T> {
    pub fn current_median(&self) -> Result<f64> {
        self.median().map(Median::value)
    }
}

impl<T: Ord> Extend<T> for MedianTracker<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for x in iter {
            self.push(x);
        }
    }
}

impl<T: Ord> FromIterator<T> for MedianTracker<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tracker = Self::new();
        tracker.extend(iter);
        tracker
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heap::HeapKind;

    #[test]
    fn first_value_seeds_upper_half() {
        let mut t = MedianTracker::new();
        t.push(7);
        assert_eq!((t.lo_len(), t.hi_len()), (0, 1));
        assert_eq!(t.median(), Ok(Median::Single(7)));
    }

    #[test]
    fn second_smaller_value_goes_low() {
        let mut t = MedianTracker::new();
        t.push(7);
        t.push(3);
        assert_eq!((t.lo_len(), t.hi_len()), (1, 1));
        assert_eq!(t.median(), Ok(Median::Pair(3, 7)));
    }

    #[test]
    fn second_larger_value_pushes_pivot_low() {
        let mut t = MedianTracker::new();
        t.push(3);
        t.push(7);
        assert_eq!(t.lo().peek(), Some(&3));
        assert_eq!(t.hi().peek(), Some(&7));
    }

    #[test]
    fn equal_values_split_across_halves() {
        let t: MedianTracker<i32> = [4, 4, 4, 4, 4].into_iter().collect();
        t.assert_valid().unwrap();
        assert_eq!(t.median(), Ok(Median::Single(4)));
    }

    #[test]
    fn empty_tracker_has_no_median() {
        let t = MedianTracker::<i32>::new();
        assert!(t.is_empty());
        assert_eq!(t.median(), Err(ForestError::EmptyTracker));
        assert_eq!(t.current_median(), Err(ForestError::EmptyTracker));
    }

    #[test]
    fn median_value_averages_pair() {
        assert_eq!(Median::Pair(3, 4).value(), 3.5);
        assert_eq!(Median::Single(-2).value(), -2.0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "median tracker invariant broken")]
    fn push_onto_crossed_halves_panics_in_debug() {
        // lo's max sits above hi's min; a push into hi leaves that untouched.
        let lo = Heap::from_raw(HeapKind::Max, vec![9]);
        let hi = Heap::from_raw(HeapKind::Min, vec![1]);
        let mut t = MedianTracker::from_heaps(lo, hi);
        t.push(5);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "median tracker invariant broken")]
    fn push_onto_skewed_halves_panics_in_debug() {
        let lo = Heap::from_raw(HeapKind::Max, vec![2, 1, 0]);
        let hi = Heap::new(HeapKind::Min);
        let mut t = MedianTracker::from_heaps(lo, hi);
        t.push(3);
    }
}
