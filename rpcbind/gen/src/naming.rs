//! Identifier transliteration for generated code.
//!
//! Schema names are snake_case (`user_id`, `2fa_required`) or camelCase
//! (`setOffline`). Generated code needs three flavours of each:
//!
//! | Input          | Function             | Output          |
//! |----------------|----------------------|-----------------|
//! | `user_id`      | [`exported_name`]    | `UserID`        |
//! | `2fa_required` | [`exported_name`]    | `X2FaRequired`  |
//! | `getById`      | [`method_type_name`] | `GetByID`       |
//! | `getById`      | [`method_fn_name`]   | `get_by_id`     |
//! | `type`         | [`field_ident`]      | `type_`         |
//!
//! Every function here is pure and total.

/// Capitalised spellings replaced by their acronym, applied in order.
const ACRONYMS: &[(&str, &str)] = &[
    ("Id", "ID"),
    ("Url", "URL"),
    ("Guid", "GUID"),
    ("Api", "API"),
    ("Uid", "UID"),
    ("Html", "HTML"),
    ("Ip", "IP"),
    ("Https", "HTTPS"),
];

/// Prefix for exported names that would otherwise start with a digit.
pub const DIGIT_ESCAPE: char = 'X';

const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "self", "Self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Transliterates a raw schema field name into an exported identifier.
///
/// Splits on `_`, title-cases each segment, joins them, normalises acronyms
/// and escapes a leading digit.
///
/// ## Examples
///
/// ```
/// use rpcbind_gen::naming::exported_name;
///
/// assert_eq!(exported_name("user_id"), "UserID");
/// assert_eq!(exported_name("photo_200"), "Photo200");
/// assert_eq!(exported_name("2fa_required"), "X2FaRequired");
/// assert_eq!(exported_name("can_see_all_posts"), "CanSeeAllPosts");
/// ```
pub fn exported_name(raw: &str) -> String {
    let joined: String = raw.split('_').map(title_case).collect();
    let name = normalize_acronyms(&joined);

    match name.chars().next() {
        None => DIGIT_ESCAPE.to_string(),
        Some(c) if c.is_ascii_digit() => format!("{}{}", DIGIT_ESCAPE, name),
        Some(_) => name,
    }
}

/// Title-cases a segment: a letter is upper-cased when it does not follow
/// another letter and lower-cased otherwise.
fn title_case(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut prev_alpha = false;
    for c in segment.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// Applies the fixed acronym replacements by literal substring.
pub fn normalize_acronyms(name: &str) -> String {
    ACRONYMS
        .iter()
        .fold(name.to_string(), |acc, (from, to)| acc.replace(from, to))
}

/// Upper-cases the first character.
pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Type name of a namespace receiver: `users` -> `Users`, `appWidgets` -> `AppWidgets`.
pub fn namespace_type_name(namespace: &str) -> String {
    type_ident(&upper_first(namespace))
}

/// Type-name form of a method: `getById` -> `GetByID`.
pub fn method_type_name(method_part: &str) -> String {
    type_ident(&normalize_acronyms(&upper_first(method_part)))
}

/// Function name of a method: `getById` -> `get_by_id`.
pub fn method_fn_name(method_part: &str) -> String {
    field_ident(method_part)
}

/// Module (and file) name of a namespace.
pub fn module_name(namespace: &str) -> String {
    field_ident(namespace)
}

/// A snake_case Rust identifier for a raw schema name.
///
/// ## Examples
///
/// ```
/// use rpcbind_gen::naming::field_ident;
///
/// assert_eq!(field_ident("user_id"), "user_id");
/// assert_eq!(field_ident("isClosed"), "is_closed");
/// assert_eq!(field_ident("2fa_required"), "x2fa_required");
/// assert_eq!(field_ident("type"), "type_");
/// ```
pub fn field_ident(raw: &str) -> String {
    let snake = to_snake_case(raw);
    if snake.is_empty() {
        return "field".to_string();
    }
    if snake.starts_with(|c: char| c.is_ascii_digit()) {
        return format!("x{}", snake);
    }
    if KEYWORDS.contains(&snake.as_str()) {
        return format!("{}_", snake);
    }
    snake
}

/// Converts camelCase or mixed input to snake_case, mapping every
/// non-alphanumeric run to a single `_`.
fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_ascii_alphanumeric() {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
            continue;
        }

        if c.is_ascii_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            let boundary = prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_lower);
            if boundary && !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
        }
        result.push(c.to_ascii_lowercase());
    }

    result.trim_end_matches('_').to_string()
}

/// Restricts a candidate type name to ASCII alphanumerics, escaping a
/// leading digit or a keyword.
pub fn type_ident(name: &str) -> String {
    let cleaned: String = name.chars().filter(char::is_ascii_alphanumeric).collect();
    match cleaned.chars().next() {
        None => DIGIT_ESCAPE.to_string(),
        Some(c) if c.is_ascii_digit() => format!("{}{}", DIGIT_ESCAPE, cleaned),
        Some(_) if KEYWORDS.contains(&cleaned.as_str()) => format!("{}_", cleaned),
        Some(_) => cleaned,
    }
}

/// Whether `name` can be used verbatim as a generated type name.
pub fn is_type_identifier(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
        && name.chars().all(|c| c.is_ascii_alphanumeric())
        && !KEYWORDS.contains(&name)
}

/// Whether `name` can be used verbatim as a module name.
pub fn is_module_identifier(name: &str) -> bool {
    name.chars()
        .next()
        .is_some_and(|c| c.is_ascii_lowercase() || c == '_')
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        && name != "_"
        && !KEYWORDS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exported_name_acronyms() {
        assert_eq!(exported_name("owner_id"), "OwnerID");
        assert_eq!(exported_name("photo_url"), "PhotoURL");
        assert_eq!(exported_name("api_id"), "APIID");
        assert_eq!(exported_name("guid"), "GUID");
        assert_eq!(exported_name("html"), "HTML");
        assert_eq!(exported_name("ip_address"), "IPAddress");
        assert_eq!(exported_name("https_required"), "HTTPSRequired");
    }

    #[test]
    fn exported_name_lowercases_inner_capitals() {
        // Title-casing lowers everything after the first letter of a word
        assert_eq!(exported_name("isClosed"), "Isclosed");
    }

    #[test]
    fn exported_name_leading_digit() {
        assert_eq!(exported_name("2fa_required"), "X2FaRequired");
        assert_eq!(exported_name("50"), "X50");
    }

    #[test]
    fn exported_name_digit_inside_segment() {
        assert_eq!(exported_name("photo_2560x"), "Photo2560X");
    }

    #[test]
    fn exported_name_empty_is_escape() {
        assert_eq!(exported_name(""), "X");
        assert_eq!(exported_name("_"), "X");
    }

    #[test]
    fn method_names() {
        assert_eq!(method_type_name("setOffline"), "SetOffline");
        assert_eq!(method_type_name("getById"), "GetByID");
        assert_eq!(method_fn_name("getById"), "get_by_id");
        assert_eq!(method_fn_name("setOffline"), "set_offline");
        assert_eq!(method_fn_name("move"), "move_");
    }

    #[test]
    fn namespace_names() {
        assert_eq!(namespace_type_name("users"), "Users");
        assert_eq!(namespace_type_name("appWidgets"), "AppWidgets");
        assert_eq!(module_name("appWidgets"), "app_widgets");
        assert_eq!(module_name("static"), "static_");
    }

    #[test]
    fn snake_case_acronym_boundaries() {
        assert_eq!(field_ident("getHTTPSUrl"), "get_https_url");
        assert_eq!(field_ident("photo_50"), "photo_50");
        assert_eq!(field_ident("first-name"), "first_name");
        assert_eq!(field_ident("---"), "field");
    }

    #[test]
    fn type_ident_sanitises() {
        assert_eq!(type_ident("Users.Get"), "UsersGet");
        assert_eq!(type_ident("200Ok"), "X200Ok");
        assert_eq!(type_ident(""), "X");
        assert_eq!(type_ident("Self"), "Self_");
    }

    #[test]
    fn type_identifier_checks() {
        assert!(is_type_identifier("User"));
        assert!(is_type_identifier("BaseObjectWithName"));
        assert!(!is_type_identifier("user"));
        assert!(!is_type_identifier("User Full"));
        assert!(!is_type_identifier(""));
        assert!(!is_type_identifier("Self"));
    }

    #[test]
    fn module_identifier_checks() {
        assert!(is_module_identifier("objects"));
        assert!(is_module_identifier("canonical_types2"));
        assert!(!is_module_identifier("Objects"));
        assert!(!is_module_identifier("mod"));
        assert!(!is_module_identifier("2objects"));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_exported_name_is_deterministic(raw in "\\PC*") {
                prop_assert_eq!(exported_name(&raw), exported_name(&raw));
            }

            #[test]
            fn prop_exported_name_never_starts_with_digit(raw in "[a-z0-9_]{0,24}") {
                let name = exported_name(&raw);
                prop_assert!(!name.is_empty());
                prop_assert!(!name.starts_with(|c: char| c.is_ascii_digit()));
            }

            #[test]
            fn prop_leading_digit_gets_escape(digit in "[0-9]", rest in "[a-z_]{0,12}") {
                let raw = format!("{}{}", digit, rest);
                prop_assert!(exported_name(&raw).starts_with(DIGIT_ESCAPE));
            }

            #[test]
            fn prop_field_ident_is_valid_identifier(raw in "\\PC*") {
                let ident = field_ident(&raw);
                prop_assert!(syn::parse_str::<syn::Ident>(&ident).is_ok(), "invalid ident {:?}", ident);
            }

            #[test]
            fn prop_type_ident_is_type_identifier(raw in "[A-Za-z0-9_.]{0,24}") {
                let ident = type_ident(&raw);
                prop_assert!(syn::parse_str::<syn::Ident>(&ident).is_ok(), "invalid ident {:?}", ident);
            }
        }
    }
}
