//! Keyframes stored by tracks.

/// One sample point of an `N`-component curve.
///
/// Tangents are expressed per unit of time and only read by cubic sampling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame<const N: usize> {
    pub time: f32,
    pub value: [f32; N],
    pub in_tangent: [f32; N],
    pub out_tangent: [f32; N],
}

pub type ScalarFrame = Frame<1>;
pub type VectorFrame = Frame<3>;
pub type QuaternionFrame = Frame<4>;

impl<const N: usize> Default for Frame<N> {
    fn default() -> Self {
        Self {
            time: 0.0,
            value: [0.0; N],
            in_tangent: [0.0; N],
            out_tangent: [0.0; N],
        }
    }
}

impl<const N: usize> Frame<N> {
    /// Frame with flat (zero) tangents.
    #[inline]
    pub fn new(time: f32, value: [f32; N]) -> Self {
        Self {
            time,
            value,
            ..Self::default()
        }
    }

    #[inline]
    pub fn with_tangents(mut self, in_tangent: [f32; N], out_tangent: [f32; N]) -> Self {
        self.in_tangent = in_tangent;
        self.out_tangent = out_tangent;
        self
    }
}
