use crate::foundation::error::{ScriptError, ScriptResult};

/// Half-open integer range walked with a signed, non-zero step.
///
/// A spec is plain data: every call to [`RangeSpec::iter`] starts over from `start`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct RangeSpec {
    /// First value produced.
    pub start: i64,
    /// Bound in the direction of `step` (exclusive).
    pub end: i64,
    /// Increment between values, never zero.
    pub step: i64,
}

impl RangeSpec {
    /// Build a spec, rejecting a zero `step`.
    pub fn new(start: i64, end: i64, step: i64) -> ScriptResult<Self> {
        if step == 0 {
            return Err(ScriptError::ZeroStep(format!("{start}..{end}")));
        }
        Ok(Self { start, end, step })
    }

    /// Spec that only stops at the numeric limit in the direction of `step`.
    pub fn unbounded(start: i64, step: i64) -> ScriptResult<Self> {
        let end = if step < 0 { i64::MIN } else { i64::MAX };
        Self::new(start, end, step)
    }

    /// Number of values produced, `ceil((end - start) / step)` or 0.
    pub fn len(self) -> u64 {
        let span = i128::from(self.end) - i128::from(self.start);
        let step = i128::from(self.step);
        if span == 0 || (span > 0) != (step > 0) {
            return 0;
        }
        let (span, step) = (span.abs(), step.abs());
        ((span + step - 1) / step) as u64
    }

    /// Whether the spec produces no values at all.
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Whether `v` is one of the values produced.
    pub fn contains(self, v: i64) -> bool {
        let in_bounds = if self.step > 0 {
            self.start <= v && v < self.end
        } else {
            self.end < v && v <= self.start
        };
        in_bounds && (i128::from(v) - i128::from(self.start)) % i128::from(self.step) == 0
    }

    /// Fresh lazy iterator positioned at `start`.
    pub fn iter(self) -> RangeIter {
        RangeIter {
            next: Some(self.start),
            end: self.end,
            step: self.step,
        }
    }
}

impl IntoIterator for RangeSpec {
    type Item = i64;
    type IntoIter = RangeIter;

    fn into_iter(self) -> RangeIter {
        self.iter()
    }
}

/// Cursor over a [`RangeSpec`].
#[derive(Clone, Debug)]
pub struct RangeIter {
    next: Option<i64>,
    end: i64,
    step: i64,
}

impl RangeIter {
    fn remaining(&self) -> u64 {
        match self.next {
            Some(start) => RangeSpec {
                start,
                end: self.end,
                step: self.step,
            }
            .len(),
            None => 0,
        }
    }
}

impl Iterator for RangeIter {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        let cur = self.next?;
        let before_end = if self.step > 0 {
            cur < self.end
        } else {
            cur > self.end
        };
        if !before_end {
            self.next = None;
            return None;
        }
        // Overflow ends the sequence.
        self.next = cur.checked_add(self.step);
        Some(cur)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        match usize::try_from(n) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl std::iter::FusedIterator for RangeIter {}

/// A [`RangeSpec`] bound to a named axis.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct AxisRange {
    /// Axis identifier, any whitespace-free token.
    pub axis: String,
    /// Values walked along the axis.
    #[serde(flatten)]
    pub spec: RangeSpec,
}

impl AxisRange {
    /// Bind `spec` to `axis`.
    pub fn new(axis: impl Into<String>, spec: RangeSpec) -> Self {
        Self {
            axis: axis.into(),
            spec,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/range.rs"]
mod tests;
