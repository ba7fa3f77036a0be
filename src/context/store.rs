use std::collections::BTreeMap;

use crate::context::coords::{Coordinates, product_len};
use crate::foundation::error::{ScriptError, ScriptResult};
use crate::foundation::range::AxisRange;

/// Immutable result of a parsed script: variables, loaded images and iteration axes.
///
/// Lookups fail lazily, so a bad reference only surfaces when something asks for it. Every
/// call to [`Context::coordinates`] starts an independent pass.
#[derive(Clone, Debug)]
pub struct Context<I> {
    variables: BTreeMap<String, String>,
    images: BTreeMap<String, I>,
    initial: Option<I>,
    axes: Vec<AxisRange>,
}

impl<I> Context<I> {
    pub(crate) fn new(
        variables: BTreeMap<String, String>,
        images: BTreeMap<String, I>,
        initial: Option<I>,
        axes: Vec<AxisRange>,
    ) -> Self {
        Self {
            variables,
            images,
            initial,
            axes,
        }
    }

    /// Value of variable `name`.
    pub fn get_var(&self, name: &str) -> ScriptResult<&str> {
        self.variables
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| ScriptError::UndefinedVariable(name.to_string()))
    }

    /// Loaded image bound to `name`.
    pub fn get_img(&self, name: &str) -> ScriptResult<&I> {
        self.images
            .get(name)
            .ok_or_else(|| ScriptError::UnknownImage(name.to_string()))
    }

    /// Image loaded from the `miff` command, if any.
    pub fn initial_image(&self) -> Option<&I> {
        self.initial.as_ref()
    }

    /// Iteration axes, outermost first.
    pub fn axes(&self) -> &[AxisRange] {
        &self.axes
    }

    /// Fresh lazy pass over every coordinate.
    pub fn coordinates(&self) -> Coordinates<'_> {
        Coordinates::new(&self.axes)
    }

    /// Number of coordinates one pass yields, `None` if it does not fit in a `u64`.
    pub fn coordinate_count(&self) -> Option<u64> {
        product_len(&self.axes)
    }
}

impl<'a, I> IntoIterator for &'a Context<I> {
    type Item = crate::context::coords::Coordinate;
    type IntoIter = Coordinates<'a>;

    fn into_iter(self) -> Coordinates<'a> {
        self.coordinates()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/context/store.rs"]
mod tests;
