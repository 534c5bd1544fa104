/// Message catalog lookup with literal fallbacks
use crate::chrome;
use regex::Regex;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$(\d+)").unwrap());

/// Replace `$1`, `$2`, ... with the matching substitution; unknown indexes are kept
pub fn format_message(message: &str, substitutions: &[String]) -> String {
    if substitutions.is_empty() {
        return message.to_string();
    }
    PLACEHOLDER
        .replace_all(message, |caps: &regex::Captures| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| substitutions.get(i))
                .cloned()
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

pub fn t(key: &str, fallback: &str) -> String {
    t_with(key, fallback, &[])
}

/// Catalog message for `key`, else `fallback` with the substitutions applied
pub fn t_with(key: &str, fallback: &str, substitutions: &[String]) -> String {
    let message = chrome::catalog_message(key, substitutions);
    if message.is_empty() {
        format_message(fallback, substitutions)
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message_substitutes() {
        let subs = vec!["3".to_string()];
        assert_eq!(format_message("Copied $1 items.", &subs), "Copied 3 items.");
    }

    #[test]
    fn test_format_message_repeated_and_missing() {
        let subs = vec!["a".to_string(), "b".to_string()];
        assert_eq!(format_message("$1-$2-$1-$3", &subs), "a-b-a-$3");
    }

    #[test]
    fn test_format_message_without_substitutions() {
        assert_eq!(format_message("Cost $1", &[]), "Cost $1");
    }
}
