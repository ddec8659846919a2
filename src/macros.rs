/// Builds a [`Value`](crate::Value) from literal-like syntax.
///
/// Records use braces with string keys, lists use brackets, tuples use
/// parentheses. Anything else falls back to [`to_value`](crate::to_value)
/// on the expression.
///
/// ```rust
/// use serde_rvn::{rvn, Value};
///
/// let data = rvn!({
///     "name": "Alice",
///     "scores": [1, 2, 3],
///     "position": (4, 5),
/// });
///
/// assert!(data.is_record());
/// ```
#[macro_export]
macro_rules! rvn {
    // Booleans
    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    // Lists
    ([]) => {
        $crate::Value::List(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::List(vec![$($crate::rvn!($elem)),*])
    };

    // Tuples (a parenthesized group; `(x)` is treated as a one-tuple)
    (()) => {
        $crate::Value::Tuple(vec![])
    };

    (( $($elem:tt),+ $(,)? )) => {
        $crate::Value::Tuple(vec![$($crate::rvn!($elem)),+])
    };

    // Records
    ({}) => {
        $crate::Value::Record($crate::RvnMap::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut record = $crate::RvnMap::new();
        $(
            record.insert($key.to_string(), $crate::rvn!($value));
        )*
        $crate::Value::Record(record)
    }};

    // Fallback: any serializable expression; the unit value stands in when
    // the expression cannot be represented
    ($other:expr) => {{
        $crate::to_value(&$other).unwrap_or($crate::Value::Tuple(vec![]))
    }};
}
