/// Builds a [`Shape`](crate::Shape) from a JSON-like literal.
///
/// Leaves are string expressions; `[...]` builds a sequence and `{...}` a
/// mapping whose keys are string literals.
///
/// # Examples
///
/// ```rust
/// use tagpack::{shape, Shape, ShapeMap};
///
/// let s = shape!({"type": "tuple", "value": [{"type": "str", "value": "a"}]});
/// assert!(s.is_map());
///
/// assert_eq!(shape!("x"), Shape::Str("x".to_string()));
/// assert_eq!(shape!([]), Shape::List(vec![]));
/// assert_eq!(shape!({}), Shape::Map(ShapeMap::new()));
/// ```
#[macro_export]
macro_rules! shape {
    // Handle empty sequence
    ([]) => {
        $crate::Shape::List(vec![])
    };

    // Handle non-empty sequence
    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Shape::List(vec![$($crate::shape!($elem)),*])
    };

    // Handle empty mapping
    ({}) => {
        $crate::Shape::Map($crate::ShapeMap::new())
    };

    // Handle non-empty mapping
    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut map = $crate::ShapeMap::new();
        $(
            map.insert($key.to_string(), $crate::shape!($value));
        )*
        $crate::Shape::Map(map)
    }};

    // Any other expression is a string leaf
    ($s:expr) => {
        $crate::Shape::Str(::std::string::ToString::to_string(&$s))
    };
}
