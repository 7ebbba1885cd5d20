pub trait FloatExt: Sized {
    /// `self == other` up to machine epsilon.
    fn eq(self, other: Self) -> bool;

    /// `self != other` up to machine epsilon.
    fn not_eq(self, other: Self) -> bool;
}

impl FloatExt for f64 {
    fn eq(self, other: Self) -> bool {
        (self - other).abs() < f64::EPSILON
    }

    fn not_eq(self, other: Self) -> bool {
        (self - other).abs() >= f64::EPSILON
    }
}
