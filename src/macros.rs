/// Builds a `Vec<CsvValue>` row from literals.
///
/// Anything with a `From` conversion into [`crate::CsvValue`] works,
/// including `CsvValue::Null` itself.
///
/// # Examples
///
/// ```rust
/// use flatcsv::{row, CsvValue};
///
/// let r = row![13, "Joe", true, CsvValue::Null];
/// assert_eq!(r.len(), 4);
/// assert_eq!(r[0].as_i64(), Some(13));
/// assert!(r[3].is_null());
/// ```
#[macro_export]
macro_rules! row {
    () => {
        ::std::vec::Vec::<$crate::CsvValue>::new()
    };
    ($($value:expr),+ $(,)?) => {
        vec![$($crate::CsvValue::from($value)),+]
    };
}

#[cfg(test)]
mod tests {
    use crate::{CsvValue, Number};

    #[test]
    fn test_row_macro_primitives() {
        let r = row![1, -2i64, 2.5, "x", true, CsvValue::Null];
        assert_eq!(r[0], CsvValue::Number(Number::Int(1)));
        assert_eq!(r[1], CsvValue::Number(Number::Int(-2)));
        assert_eq!(r[2], CsvValue::Number(Number::Float(2.5)));
        assert_eq!(r[3], CsvValue::String("x".to_string()));
        assert_eq!(r[4], CsvValue::Bool(true));
        assert_eq!(r[5], CsvValue::Null);
    }

    #[test]
    fn test_row_macro_empty_and_trailing_comma() {
        let empty = row![];
        assert!(empty.is_empty());
        let r = row![1, 2,];
        assert_eq!(r.len(), 2);
    }
}
