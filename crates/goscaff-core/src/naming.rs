//! Identifier case conversion for generated Go code and file names

/// Split an identifier into words.
///
/// Separators are `_`, `-`, `.` and whitespace. A lower-to-upper transition
/// starts a new word, and an acronym run ends before its last capital when
/// that capital begins a lowercase word (`HTTPServer` -> `HTTP`, `Server`).
/// Digits stay with the word they follow.
pub fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let chars: Vec<char> = input.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == '-' || c == '.' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower) {
                words.push(std::mem::take(&mut current));
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }

    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `user_profile` -> `UserProfile`
pub fn to_camel(input: &str) -> String {
    split_words(input).iter().map(|w| capitalize(w)).collect()
}

/// `user_profile` -> `userProfile`
pub fn to_lower_camel(input: &str) -> String {
    let words = split_words(input);
    let mut out = String::new();
    for (i, word) in words.iter().enumerate() {
        if i == 0 {
            out.push_str(&word.to_lowercase());
        } else {
            out.push_str(&capitalize(word));
        }
    }
    out
}

/// `UserProfile` -> `user-profile`
pub fn to_kebab(input: &str) -> String {
    split_words(input)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

/// Turn a free-form name into a Go package identifier (`User-Profile` -> `userprofile`).
pub fn to_package(input: &str) -> String {
    let pkg: String = input
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect();

    if pkg.starts_with(|c: char| c.is_ascii_digit()) {
        format!("pkg{}", pkg)
    } else {
        pkg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_words_on_separators() {
        assert_eq!(split_words("user_profile"), vec!["user", "profile"]);
        assert_eq!(split_words("user-profile.v2"), vec!["user", "profile", "v2"]);
        assert_eq!(split_words("  order  item "), vec!["order", "item"]);
    }

    #[test]
    fn test_split_words_on_case_changes() {
        assert_eq!(split_words("userProfile"), vec!["user", "Profile"]);
        assert_eq!(split_words("HTTPServer"), vec!["HTTP", "Server"]);
        assert_eq!(split_words("order2Item"), vec!["order2", "Item"]);
    }

    #[test]
    fn test_to_camel() {
        assert_eq!(to_camel("user_profile"), "UserProfile");
        assert_eq!(to_camel("userProfile"), "UserProfile");
        assert_eq!(to_camel("payment"), "Payment");
        assert_eq!(to_camel("HTTPServer"), "HTTPServer");
    }

    #[test]
    fn test_to_lower_camel() {
        assert_eq!(to_lower_camel("user_profile"), "userProfile");
        assert_eq!(to_lower_camel("UserProfile"), "userProfile");
        assert_eq!(to_lower_camel("HTTPServer"), "httpServer");
    }

    #[test]
    fn test_to_kebab() {
        assert_eq!(to_kebab("UserProfile"), "user-profile");
        assert_eq!(to_kebab("user_profile"), "user-profile");
        assert_eq!(to_kebab("order"), "order");
    }

    #[test]
    fn test_to_package() {
        assert_eq!(to_package("User-Profile"), "userprofile");
        assert_eq!(to_package("order_item"), "orderitem");
        assert_eq!(to_package("3dmodel"), "pkg3dmodel");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(to_camel(""), "");
        assert_eq!(to_kebab(""), "");
        assert!(split_words("__").is_empty());
    }
}
