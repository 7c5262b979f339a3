//! Name variant derivation
//!
//! Every generator starts from a single entity name typed on the command line
//! (`post`, `UserProfile`, `blog_posts`, ...). [`NameVariants::derive`] turns
//! it into the fixed set of casing and pluralization variants that templates,
//! file paths and route declarations are built from.
//!
//! The singular form is canonical: `posts`, `Post` and `post` all normalize to
//! `Post` before the other variants are computed. Only the final word of a
//! compound name is inflected, so `UserProfiles` singularizes to `UserProfile`.

use inflector::Inflector;
use serde::Serialize;

/// Irregular nouns as `(singular, plural)` pairs, checked before the
/// rule-based inflector in both directions.
const IRREGULAR_NOUNS: &[(&str, &str)] = &[
    ("person", "people"),
    ("child", "children"),
    ("man", "men"),
    ("woman", "women"),
    ("mouse", "mice"),
    ("goose", "geese"),
    ("tooth", "teeth"),
    ("foot", "feet"),
    ("ox", "oxen"),
    ("leaf", "leaves"),
];

/// Nouns whose singular and plural forms are identical
const UNCOUNTABLE_NOUNS: &[&str] = &[
    "sheep",
    "fish",
    "series",
    "species",
    "news",
    "equipment",
    "information",
    "deer",
    "money",
    "rice",
];

/// Casing and pluralization variants of an entity name
///
/// Serializes with camelCase keys (`pascalName`, `pluralParamName`, ...) so it
/// can be merged directly into a template context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NameVariants {
    /// Input name as `PascalCase`, pluralization untouched
    pub pascal_name: String,
    /// Input name as `camelCase`, pluralization untouched
    pub camel_name: String,
    /// `UserProfile`
    pub singular_pascal_name: String,
    /// `UserProfiles`
    pub plural_pascal_name: String,
    /// `userProfile`
    pub singular_camel_name: String,
    /// `userProfiles`
    pub plural_camel_name: String,
    /// `user-profile`
    pub singular_param_name: String,
    /// `user-profiles`
    pub plural_param_name: String,
    /// `USER_PROFILE`
    pub singular_constant_name: String,
    /// `USER_PROFILES`
    pub plural_constant_name: String,
}

impl NameVariants {
    /// Derive all variants from `name`
    ///
    /// Input may be camel, pascal, snake or kebab case, singular or plural.
    /// Blank input yields empty strings for every variant.
    ///
    /// # Examples
    ///
    /// ```
    /// # use scaffolder::names::NameVariants;
    /// let names = NameVariants::derive("user_profiles");
    /// assert_eq!(names.singular_pascal_name, "UserProfile");
    /// assert_eq!(names.plural_param_name, "user-profiles");
    /// assert_eq!(names.singular_constant_name, "USER_PROFILE");
    /// ```
    #[must_use]
    pub fn derive(name: &str) -> Self {
        let words = split_words(name);
        if words.is_empty() {
            return Self::default();
        }

        let singular_words = inflect_last_word(&words, singularize);
        let normalized = singular_words.join("-").to_pascal_case();
        let plural = inflect_last_word(&split_words(&normalized), pluralize)
            .join("-")
            .to_pascal_case();

        Self {
            pascal_name: name.to_kebab_case().to_pascal_case(),
            camel_name: name.to_camel_case(),
            singular_camel_name: normalized.to_camel_case(),
            plural_camel_name: plural.to_camel_case(),
            singular_param_name: normalized.to_kebab_case(),
            plural_param_name: plural.to_kebab_case(),
            singular_constant_name: normalized.to_screaming_snake_case(),
            plural_constant_name: plural.to_screaming_snake_case(),
            singular_pascal_name: normalized,
            plural_pascal_name: plural,
        }
    }
}

/// Pluralize a single word, keeping a leading capital
///
/// # Examples
///
/// ```
/// # use scaffolder::names::pluralize;
/// assert_eq!(pluralize("post"), "posts");
/// assert_eq!(pluralize("category"), "categories");
/// assert_eq!(pluralize("Person"), "People");
/// ```
#[must_use]
pub fn pluralize(word: &str) -> String {
    inflect_preserving_capital(word, |lower| {
        if UNCOUNTABLE_NOUNS.contains(&lower) {
            return lower.to_string();
        }
        IRREGULAR_NOUNS
            .iter()
            .find(|(singular, plural)| *singular == lower || *plural == lower)
            .map_or_else(|| lower.to_plural(), |(_, plural)| (*plural).to_string())
    })
}

/// Singularize a single word, keeping a leading capital
///
/// # Examples
///
/// ```
/// # use scaffolder::names::singularize;
/// assert_eq!(singularize("posts"), "post");
/// assert_eq!(singularize("categories"), "category");
/// assert_eq!(singularize("people"), "person");
/// ```
#[must_use]
pub fn singularize(word: &str) -> String {
    inflect_preserving_capital(word, |lower| {
        if UNCOUNTABLE_NOUNS.contains(&lower) {
            return lower.to_string();
        }
        IRREGULAR_NOUNS
            .iter()
            .find(|(singular, plural)| *singular == lower || *plural == lower)
            .map_or_else(|| lower.to_singular(), |(singular, _)| (*singular).to_string())
    })
}

fn inflect_preserving_capital(word: &str, inflect: impl Fn(&str) -> String) -> String {
    if word.is_empty() {
        return String::new();
    }

    let inflected = inflect(&word.to_lowercase());
    if word.chars().next().is_some_and(char::is_uppercase) {
        let mut chars = inflected.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars).collect()
        })
    } else {
        inflected
    }
}

/// Lowercase words of `name`, whatever separators or casing it uses
fn split_words(name: &str) -> Vec<String> {
    name.to_kebab_case()
        .split('-')
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

fn inflect_last_word(words: &[String], inflect: fn(&str) -> String) -> Vec<String> {
    let mut inflected = words.to_vec();
    if let Some(last) = inflected.last_mut() {
        *last = inflect(last);
    }
    inflected
}
