//! Textual representation of scalar query values.
//!
//! Integers are written as base-10 digits and booleans as `true`/`false`.
//! Floats use the shortest decimal that reads back as the same value, which
//! is locale-free and never switches to exponent notation.

/// Scalar types that have a canonical query-string form.
pub trait QueryValue {
    /// Render the value as query text.
    fn to_query_value(&self) -> String;
}

macro_rules! display_query_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl QueryValue for $ty {
                fn to_query_value(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

display_query_value!(
    bool, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, char, str, String,
);

// `Display` on floats is the shortest round-trip form: `10.0` renders as
// `10`, `0.1f32` as `0.1`, and NaN and infinities as `NaN`, `inf`, `-inf`.
impl QueryValue for f32 {
    fn to_query_value(&self) -> String {
        self.to_string()
    }
}

impl QueryValue for f64 {
    fn to_query_value(&self) -> String {
        self.to_string()
    }
}

impl<T: QueryValue + ?Sized> QueryValue for &T {
    fn to_query_value(&self) -> String {
        (**self).to_query_value()
    }
}
