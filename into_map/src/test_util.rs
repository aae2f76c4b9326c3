//! Things to help with testing into_map.

/// Builds a `BTreeMap<String, String>` from `key => value` pairs, for comparing against the
/// output of [`IntoMap::into_map`][crate::IntoMap::into_map].
///
/// ```rust
/// use into_map::string_map;
///
/// let map = string_map! { "id" => 1, "name" => "Ada" };
/// assert_eq!(map["id"], "1");
/// assert_eq!(map["name"], "Ada");
/// ```
#[macro_export]
macro_rules! string_map {
    ($($key:expr => $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut map = $crate::__private::BTreeMap::<
            $crate::__private::String,
            $crate::__private::String,
        >::new();
        $(
            map.insert(
                $crate::__private::ToString::to_string(&$key),
                $crate::__private::ToString::to_string(&$value),
            );
        )*
        map
    }};
}
