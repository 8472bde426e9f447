//! series::observation — conversion of raw elements into numeric values.
//!
//! Callers hand the validator whatever their loader produced: floats,
//! integers, numeric text, optional values, or `(label, value)` pairs from a
//! labeled series. [`Observation`] is the single conversion seam; anything
//! implementing it can be turned into a [`Series`](super::Series).
//!
//! Conversion reports *why* an element is unusable; finiteness is checked by
//! the caller so that `NaN` and `±∞` are rejected uniformly whatever their
//! source type.

/// A raw element convertible into an `f64` observation.
pub trait Observation {
    /// The numeric value, or a short reason when the element is not a number.
    fn to_value(&self) -> Result<f64, &'static str>;
}

impl Observation for f64 {
    fn to_value(&self) -> Result<f64, &'static str> {
        Ok(*self)
    }
}

impl Observation for f32 {
    fn to_value(&self) -> Result<f64, &'static str> {
        Ok(f64::from(*self))
    }
}

macro_rules! impl_observation_for_integers {
    ($($t:ty),*) => {
        $(
            impl Observation for $t {
                fn to_value(&self) -> Result<f64, &'static str> {
                    Ok(*self as f64)
                }
            }
        )*
    };
}

impl_observation_for_integers!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl Observation for str {
    fn to_value(&self) -> Result<f64, &'static str> {
        let trimmed = self.trim();
        if trimmed.is_empty() {
            return Err("missing value");
        }
        trimmed.parse::<f64>().map_err(|_| "text is not a number")
    }
}

impl Observation for String {
    fn to_value(&self) -> Result<f64, &'static str> {
        self.as_str().to_value()
    }
}

impl<T: Observation> Observation for Option<T> {
    fn to_value(&self) -> Result<f64, &'static str> {
        match self {
            Some(value) => value.to_value(),
            None => Err("missing value"),
        }
    }
}

impl<T: Observation + ?Sized> Observation for &T {
    fn to_value(&self) -> Result<f64, &'static str> {
        (**self).to_value()
    }
}

/// Labeled element, e.g. `(date, value)`; the label is ignored.
impl<L, T: Observation> Observation for (L, T) {
    fn to_value(&self) -> Result<f64, &'static str> {
        self.1.to_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Verify conversion across the supported element types.
    //
    // Given
    // -----
    // - An integer, numeric text with padding, `Some`, and a labeled pair.
    //
    // Expect
    // ------
    // - Each converts to the expected `f64`.
    fn observation_converts_supported_types() {
        assert_eq!(42_i32.to_value(), Ok(42.0));
        assert_eq!(" 3.25 ".to_value(), Ok(3.25));
        assert_eq!(Some(1.5_f64).to_value(), Ok(1.5));
        assert_eq!(("2024-01-01", 7_u32).to_value(), Ok(7.0));
        assert_eq!(String::from("-1e3").to_value(), Ok(-1000.0));
    }

    #[test]
    // Purpose
    // -------
    // Verify the failure reasons for unusable elements.
    //
    // Given
    // -----
    // - `None`, an empty string, and non-numeric text.
    //
    // Expect
    // ------
    // - "missing value" for the first two, "text is not a number" for the last.
    fn observation_reports_reason_for_unusable_elements() {
        assert_eq!(None::<f64>.to_value(), Err("missing value"));
        assert_eq!("  ".to_value(), Err("missing value"));
        assert_eq!("abc".to_value(), Err("text is not a number"));
    }
}
