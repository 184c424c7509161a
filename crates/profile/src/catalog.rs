//! # Built-in Base Profiles
//!
//! Profiles may only extend one of the documents compiled into this module.
//! Ancestors are never looked up on the filesystem.

const DEFAULT: &str = include_str!("../profiles/default.json");
const APTRUST: &str = include_str!("../profiles/aptrust.json");
const BEYOND_THE_REPOSITORY: &str = include_str!("../profiles/beyondtherepository.json");

const CATALOG: &[(&str, &str)] = &[
    ("default", DEFAULT),
    ("aptrust", APTRUST),
    ("beyondtherepository", BEYOND_THE_REPOSITORY),
];

/// Returns the JSON document of the built-in profile with the given name.
pub fn get(name: &str) -> Option<&'static str> {
    CATALOG
        .iter()
        .find_map(|(n, doc)| (*n == name).then_some(*doc))
}

/// The names of every built-in profile.
pub fn names() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().map(|(n, _)| *n)
}
