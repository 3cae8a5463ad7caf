//! The [`ckt!`](crate::ckt) macro.

/// Builds a [`Value`](crate::Value) from JSON-like syntax.
///
/// `[..]` produces a table of elements, `{..}` a table of properties.
/// Anything else goes through [`to_value`](crate::to_value); wrap negative
/// numbers and other multi-token expressions in parentheses.
///
/// ```rust
/// use serde_ckt::ckt;
///
/// let offset = -4;
/// let value = ckt!({"points": [1, (offset), null], "on": true});
/// assert_eq!(value.to_string(), "[points=[1,-4,null],on=true]");
/// ```
#[macro_export]
macro_rules! ckt {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Table($crate::Table::new())
    };

    ([ $($elem:tt),* $(,)? ]) => {{
        let mut table = $crate::Table::new();
        $(
            table.push($crate::ckt!($elem));
        )*
        $crate::Value::Table(table)
    }};

    ({}) => {
        $crate::Value::Table($crate::Table::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut table = $crate::Table::new();
        $(
            table.insert($key.to_string(), $crate::ckt!($value));
        )*
        $crate::Value::Table(table)
    }};

    ($other:expr) => {
        $crate::to_value(&$other).unwrap_or($crate::Value::Null)
    };
}
