//! String utilities for names and type paths.

/// Convert a string to PascalCase (e.g., "hello_world" -> "HelloWorld")
pub fn to_pascal_case(s: &str) -> String {
    s.split('_')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c.to_uppercase().chain(chars).collect(),
            }
        })
        .collect()
}

/// Convert a Rust field name to lowerCamelCase (e.g., "bucket_name" -> "bucketName").
///
/// Raw identifier prefixes are dropped, so `r#type` becomes `type`.
pub fn to_camel_case(s: &str) -> String {
    let s = s.strip_prefix("r#").unwrap_or(s);
    let pascal = to_pascal_case(s.trim_start_matches('_'));
    let mut chars = pascal.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_lowercase().chain(chars).collect(),
    }
}

/// The path of a type with any generic arguments removed.
fn strip_generics(path: &str) -> &str {
    path.split_once('<').map(|(head, _)| head).unwrap_or(path)
}

/// The declared name of a type from its `std::any::type_name` path
/// (e.g., "my_provider::storage::Bucket<T>" -> "Bucket").
pub fn short_type_name(path: &str) -> &str {
    let head = strip_generics(path);
    head.rsplit("::").next().unwrap_or(head)
}

/// The module a type is declared in, or `None` at the crate root
/// (e.g., "my_provider::storage::Bucket" -> "storage").
pub fn type_module(path: &str) -> Option<&str> {
    let segments: Vec<&str> = strip_generics(path).split("::").collect();
    if segments.len() < 3 {
        return None;
    }
    segments.get(segments.len() - 2).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("hello"), "Hello");
        assert_eq!(to_pascal_case("hello_world"), "HelloWorld");
        assert_eq!(to_pascal_case(""), "");
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("name"), "name");
        assert_eq!(to_camel_case("bucket_name"), "bucketName");
        assert_eq!(to_camel_case("replace_on_changes"), "replaceOnChanges");
        assert_eq!(to_camel_case("r#type"), "type");
        assert_eq!(to_camel_case("_private"), "private");
        assert_eq!(to_camel_case(""), "");
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name("my_provider::storage::Bucket"), "Bucket");
        assert_eq!(
            short_type_name("my_provider::Wrapper<alloc::string::String>"),
            "Wrapper"
        );
        assert_eq!(short_type_name("bool"), "bool");
    }

    #[test]
    fn test_type_module() {
        assert_eq!(type_module("my_provider::storage::Bucket"), Some("storage"));
        assert_eq!(type_module("my_provider::a::b::Bucket"), Some("b"));
        assert_eq!(type_module("my_provider::Bucket"), None);
        assert_eq!(
            type_module("my_provider::net::Wrapper<alloc::string::String>"),
            Some("net")
        );
    }
}
