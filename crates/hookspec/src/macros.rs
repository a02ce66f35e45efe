//! Convenience macros.

/// Builds a [`Kwargs`](crate::Kwargs) from `name => value` pairs. Values go
/// through `serde_json::json!`.
///
/// # Example
/// ```rust,ignore
/// let kwargs = kwargs! {
///     "x" => 1,
///     "name" => "test.pdf",
/// };
/// ```
#[macro_export]
macro_rules! kwargs {
    () => {
        $crate::Kwargs::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut kwargs = $crate::Kwargs::new();
        $(
            kwargs.insert($key, $crate::__private::serde_json::json!($value));
        )+
        kwargs
    }};
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    #[test]
    fn test_kwargs_macro() {
        let empty = kwargs! {};
        assert!(empty.is_empty());

        let kwargs = kwargs! {
            "x" => 1,
            "name" => "test.pdf",
            "tags" => ["a", "b"],
        };
        assert_eq!(kwargs.get_i64("x"), Some(1));
        assert_eq!(kwargs.get_str("name"), Some("test.pdf"));
        assert_eq!(kwargs.value("tags"), Some(&json!(["a", "b"])));
    }
}
