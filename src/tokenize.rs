use regex::Regex;
use std::sync::OnceLock;

use crate::stats::WordList;

fn capital_letter() -> &'static Regex {
    static CAPITAL: OnceLock<Regex> = OnceLock::new();
    CAPITAL.get_or_init(|| Regex::new(r"[A-Z]").expect("static regex"))
}

/// Splits a camel-case name in front of every ASCII capital letter.
///
/// Whitespace also separates words and empty fragments are dropped, so
/// `"ExampleClassName"` gives `["Example", "Class", "Name"]` and runs of
/// capitals such as `"HTTPServer"` split into single letters.
pub fn split_camel_case(name: &str) -> WordList {
    capital_letter()
        .replace_all(name, " $0")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn splits_before_each_capital() {
        assert_eq!(split_camel_case("ExampleClassName"), vec!["Example", "Class", "Name"]);
        assert_eq!(split_camel_case("RedHouseDoor"), vec!["Red", "House", "Door"]);
    }

    #[test]
    fn single_word_stays_whole() {
        assert_eq!(split_camel_case("Door"), vec!["Door"]);
    }

    #[test]
    fn rejoining_reproduces_input() {
        for name in ["AbstractSingletonProxyFactoryBean", "XmlParser", "Q", "UserDAOImpl"] {
            assert_eq!(split_camel_case(name).concat(), name);
        }
    }

    #[test]
    fn acronyms_split_per_letter() {
        assert_eq!(split_camel_case("HTTPServer"), vec!["H", "T", "T", "P", "Server"]);
    }

    #[test]
    fn leading_lowercase_is_kept() {
        assert_eq!(split_camel_case("fooBar"), vec!["foo", "Bar"]);
    }

    #[test]
    fn whitespace_and_empty_input() {
        assert!(split_camel_case("").is_empty());
        assert!(split_camel_case("   ").is_empty());
        assert_eq!(split_camel_case("  Red House\n"), vec!["Red", "House"]);
    }

    proptest! {
        #[test]
        fn splits_any_run_of_capitalized_words(words in prop::collection::vec("[A-Z][a-z]{0,8}", 0..12)) {
            let name = words.concat();
            let split = split_camel_case(&name);
            prop_assert_eq!(split.concat(), name);
            prop_assert_eq!(split, words);
        }
    }
}
