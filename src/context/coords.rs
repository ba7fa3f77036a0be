use crate::foundation::range::{AxisRange, RangeIter};

/// One step of the multi-axis iteration: a value per axis, in nesting order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Coordinate {
    values: Vec<(String, i64)>,
}

impl Coordinate {
    /// Value for `axis`, if that axis is part of the iteration.
    pub fn get(&self, axis: &str) -> Option<i64> {
        self.values
            .iter()
            .find(|(name, _)| name == axis)
            .map(|(_, v)| *v)
    }

    /// `(axis, value)` pairs, outermost axis first.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.values.iter().map(|(name, v)| (name.as_str(), *v))
    }

    /// Number of axes.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True for the single coordinate produced when no axis is registered.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, i64)> for Coordinate {
    fn from_iter<T: IntoIterator<Item = (S, i64)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl serde::Serialize for Coordinate {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (axis, v) in &self.values {
            map.serialize_entry(axis, v)?;
        }
        map.end()
    }
}

/// Lazy Cartesian product over a list of axes, walked like an odometer.
///
/// The first axis is the outermost loop (slowest), the last axis the innermost (fastest).
/// With no axes the product holds exactly one empty coordinate; if any axis is empty the
/// product is empty.
#[derive(Clone, Debug)]
pub struct Coordinates<'a> {
    axes: &'a [AxisRange],
    iters: Vec<RangeIter>,
    current: Vec<i64>,
    state: State,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Fresh,
    Running,
    Done,
}

impl<'a> Coordinates<'a> {
    /// Start a pass over `axes`.
    pub fn new(axes: &'a [AxisRange]) -> Self {
        Self {
            axes,
            iters: axes.iter().map(|a| a.spec.iter()).collect(),
            current: Vec::with_capacity(axes.len()),
            state: State::Fresh,
        }
    }

    fn emit(&self) -> Coordinate {
        self.axes
            .iter()
            .zip(&self.current)
            .map(|(a, v)| (a.axis.as_str(), *v))
            .collect()
    }

    fn prime(&mut self) -> bool {
        for it in &mut self.iters {
            match it.next() {
                Some(v) => self.current.push(v),
                None => return false,
            }
        }
        true
    }

    fn advance(&mut self) -> bool {
        for i in (0..self.iters.len()).rev() {
            if let Some(v) = self.iters[i].next() {
                self.current[i] = v;
                return true;
            }
            // Wrap this wheel; priming proved it is non-empty.
            let mut fresh = self.axes[i].spec.iter();
            match fresh.next() {
                Some(v) => self.current[i] = v,
                None => return false,
            }
            self.iters[i] = fresh;
        }
        false
    }
}

impl Iterator for Coordinates<'_> {
    type Item = Coordinate;

    fn next(&mut self) -> Option<Coordinate> {
        let ok = match self.state {
            State::Done => return None,
            State::Fresh => {
                self.state = State::Running;
                self.prime()
            }
            State::Running => self.advance(),
        };
        if !ok {
            self.state = State::Done;
            return None;
        }
        Some(self.emit())
    }
}

impl std::iter::FusedIterator for Coordinates<'_> {}

/// Total number of coordinates for `axes`, or `None` on overflow.
pub fn product_len(axes: &[AxisRange]) -> Option<u64> {
    axes.iter()
        .try_fold(1u64, |acc, a| acc.checked_mul(a.spec.len()))
}

#[cfg(test)]
#[path = "../../tests/unit/context/coords.rs"]
mod tests;
