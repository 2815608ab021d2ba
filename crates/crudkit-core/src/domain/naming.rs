//! Identifier normalization and unique-name generation.
//!
//! User input arrives as free-form text ("my cool-name"); everything the
//! designer emits is one of three fixed casings. Splitting happens on
//! non-alphanumeric separators *and* on lower→upper boundaries, so both
//! "order item" and "orderItem" yield the words ["order", "item"].

/// Split free-form input into lowercase words.
fn words(input: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for ch in input.chars() {
        if ch.is_alphanumeric() {
            if ch.is_uppercase() && prev_lower && !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
            prev_lower = ch.is_lowercase() || ch.is_numeric();
            current.extend(ch.to_lowercase());
        } else {
            prev_lower = false;
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `"my cool-name"` → `"MyCoolName"`. Empty input yields an empty string.
pub fn to_pascal_case(input: &str) -> String {
    words(input).iter().map(|w| capitalize(w)).collect()
}

/// `"my cool-name"` → `"myCoolName"`.
pub fn to_camel_case(input: &str) -> String {
    let pascal = to_pascal_case(input);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `"my cool-name"` → `"MY_COOL_NAME"`.
pub fn to_constant_case(input: &str) -> String {
    words(input)
        .iter()
        .map(|w| w.to_uppercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// `"OrderItem"` → `"order_item"`. Default table names come from here.
pub fn to_snake_case(input: &str) -> String {
    words(input).join("_")
}

/// Append a trailing `s` unless one is already there.
pub fn pluralize(name: &str) -> String {
    if name.ends_with('s') {
        name.to_string()
    } else {
        format!("{name}s")
    }
}

/// First of `base`, `base2`, `base3`, … not rejected by `taken`.
///
/// Only auto-generated names go through here; user-typed duplicates are
/// a wizard validation concern, not silently rewritten.
pub fn unique_name(base: &str, mut taken: impl FnMut(&str) -> bool) -> String {
    if !taken(base) {
        return base.to_string();
    }
    let mut n: u32 = 2;
    loop {
        let candidate = format!("{base}{n}");
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// `true` when `name` matches `^[A-Z][A-Za-z0-9]*$`.
pub fn is_pascal_case(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => chars.all(|c| c.is_ascii_alphanumeric()),
        _ => false,
    }
}

/// `true` when `name` matches `^[a-z][A-Za-z0-9]*$`.
pub fn is_camel_case(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_lowercase() => chars.all(|c| c.is_ascii_alphanumeric()),
        _ => false,
    }
}

/// `true` when `name` matches `^[A-Za-z0-9_]+$` (table names).
pub fn is_table_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pascal_case_from_free_form() {
        assert_eq!(to_pascal_case("my cool-name"), "MyCoolName");
        assert_eq!(to_pascal_case("order_item"), "OrderItem");
        assert_eq!(to_pascal_case("alreadyCamel"), "AlreadyCamel");
        assert_eq!(to_pascal_case(""), "");
        assert_eq!(to_pascal_case("--"), "");
    }

    #[test]
    fn camel_case_from_free_form() {
        assert_eq!(to_camel_case("my cool-name"), "myCoolName");
        assert_eq!(to_camel_case("Product"), "product");
        assert_eq!(to_camel_case(""), "");
    }

    #[test]
    fn constant_case_from_free_form() {
        assert_eq!(to_constant_case("my cool-name"), "MY_COOL_NAME");
        assert_eq!(to_constant_case("inProgress"), "IN_PROGRESS");
    }

    #[test]
    fn snake_case_splits_camel_boundaries() {
        assert_eq!(to_snake_case("OrderItem"), "order_item");
        assert_eq!(to_snake_case("Person"), "person");
    }

    #[test]
    fn pluralize_appends_once() {
        assert_eq!(pluralize("product"), "products");
        assert_eq!(pluralize("address"), "address");
    }

    #[test]
    fn unique_name_suffixes_from_two() {
        let existing = ["products", "products2"];
        let got = unique_name("products", |n| existing.contains(&n));
        assert_eq!(got, "products3");
        assert_eq!(unique_name("free", |_| false), "free");
    }

    #[test]
    fn case_predicates() {
        assert!(is_pascal_case("OrderItem2"));
        assert!(!is_pascal_case("orderItem"));
        assert!(!is_pascal_case(""));
        assert!(is_camel_case("orderItem"));
        assert!(!is_camel_case("Order"));
        assert!(is_table_name("order_items_2"));
        assert!(!is_table_name("order items"));
    }
}
