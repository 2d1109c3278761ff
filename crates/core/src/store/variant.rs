//! Derived views of canonical assets.

/// An asset that can produce transformed copies of itself.
///
/// `resolve` is a pure function of `(self, params)`: it never mutates the
/// canonical value and returns an independently owned result.
pub trait VariantResolver {
    /// Transformation parameters; every field is optional
    type Params;

    fn resolve(&self, params: &Self::Params) -> Self
    where
        Self: Sized;
}
