//! Naming rules turning schema names into TypeScript identifiers.
//!
//! # Supported Conversions
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `.pkg.Outer.Inner` in `pkg` | [`resolve`] | `Outer_Inner` |
//! | `snake_case` | [`camel_case`] | `snakeCase` |
//! | `GetUser` | [`lower_first`] | `getUser` |
//! | `Outer`, `Inner` | [`nested_name`] | `Outer_Inner` |

/// Resolve a fully-qualified schema name to a local identifier.
///
/// Strips the leading separator and the compilation unit's package prefix,
/// then mangles the remaining path with underscores. Names from other
/// packages keep their full path.
///
/// # Examples
///
/// ```
/// use twirpts_core::naming::resolve;
///
/// assert_eq!(resolve("pkg", ".pkg.Outer.Inner"), "Outer_Inner");
/// assert_eq!(resolve("pkg", "pkg.User"), "User");
/// assert_eq!(resolve("pkg", ".google.protobuf.Empty"), "google_protobuf_Empty");
/// ```
pub fn resolve(package: &str, qualified: &str) -> String {
    let trimmed = qualified.trim_start_matches('.');

    let local = if package.is_empty() {
        trimmed
    } else {
        trimmed
            .strip_prefix(package)
            .and_then(|rest| rest.strip_prefix('.'))
            .unwrap_or(trimmed)
    };

    local.replace('.', "_")
}

/// Name of a type declared inside `outer`.
pub fn nested_name(outer: &str, inner: &str) -> String {
    format!("{outer}_{inner}")
}

/// Convert a snake_case wire name to lowerCamelCase.
///
/// The first segment is lower-cased; later segments get an upper-case first
/// letter and a lower-cased rest. Empty segments disappear.
///
/// # Examples
///
/// ```
/// use twirpts_core::naming::camel_case;
///
/// assert_eq!(camel_case("foo_bar_baz"), "fooBarBaz");
/// assert_eq!(camel_case("user_ID"), "userId");
/// assert_eq!(camel_case("simple"), "simple");
/// ```
pub fn camel_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());

    for (i, part) in s.split('_').enumerate() {
        if i == 0 {
            result.push_str(&part.to_lowercase());
            continue;
        }

        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            result.extend(first.to_uppercase());
            result.push_str(&chars.as_str().to_lowercase());
        }
    }

    result
}

/// Lower-case only the first character.
///
/// # Examples
///
/// ```
/// use twirpts_core::naming::lower_first;
///
/// assert_eq!(lower_first("GetUserRequest"), "getUserRequest");
/// assert_eq!(lower_first(""), "");
/// ```
pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}
