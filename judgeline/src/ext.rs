use ordered_float::{Float, NotNan};

/// Sort keys for ticks. Only call this on values already checked to be finite.
pub trait NotNanExt: Sized {
    fn not_nan(self) -> NotNan<Self>;
}

impl<T: Sized + Float> NotNanExt for T {
    fn not_nan(self) -> NotNan<Self> {
        NotNan::new(self).unwrap()
    }
}
