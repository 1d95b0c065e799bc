//! Personalized greeting.

use chrono::{Local, Timelike};

use crate::error::StoreError;
use crate::storage::{keys, KeyValueStore};

/// Salutation for an hour of the day (0-23).
pub fn salutation(hour: u32) -> &'static str {
    match hour {
        0..=11 => "Good morning",
        12..=17 => "Good afternoon",
        _ => "Good evening",
    }
}

/// Uppercase the first character of every whitespace-separated word,
/// collapsing runs of whitespace.
pub fn title_case_name(raw: &str) -> String {
    raw.split_whitespace()
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn greeting_for(hour: u32, name: Option<&str>) -> String {
    let salutation = salutation(hour);
    match name {
        Some(name) if !name.is_empty() => format!("{salutation}, {name} 👋"),
        _ => format!("{salutation} 👋"),
    }
}

/// Greeting for the current local time.
pub fn greeting_now(name: Option<&str>) -> String {
    greeting_for(Local::now().hour(), name)
}

pub fn load_name(store: &dyn KeyValueStore) -> Option<String> {
    match store.get(keys::USER_NAME) {
        Ok(name) => name.filter(|n| !n.trim().is_empty()),
        Err(e) => {
            tracing::warn!(error = %e, "saved name unreadable");
            None
        }
    }
}

/// Title-case and persist `raw`. Blank input is ignored and returns `None`.
pub fn save_name(store: &mut dyn KeyValueStore, raw: &str) -> Result<Option<String>, StoreError> {
    let pretty = title_case_name(raw);
    if pretty.is_empty() {
        return Ok(None);
    }
    store.set(keys::USER_NAME, &pretty)?;
    Ok(Some(pretty))
}

pub fn clear_name(store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
    store.remove(keys::USER_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn salutation_boundaries() {
        assert_eq!(salutation(0), "Good morning");
        assert_eq!(salutation(11), "Good morning");
        assert_eq!(salutation(12), "Good afternoon");
        assert_eq!(salutation(17), "Good afternoon");
        assert_eq!(salutation(18), "Good evening");
        assert_eq!(salutation(23), "Good evening");
    }

    #[test]
    fn title_cases_each_word() {
        assert_eq!(title_case_name("  ada   lovelace "), "Ada Lovelace");
        assert_eq!(title_case_name("élodie"), "Élodie");
        assert_eq!(title_case_name("McDonald"), "McDonald");
        assert_eq!(title_case_name("   "), "");
    }

    #[test]
    fn greeting_with_and_without_name() {
        assert_eq!(greeting_for(9, Some("Ada")), "Good morning, Ada 👋");
        assert_eq!(greeting_for(20, None), "Good evening 👋");
        assert_eq!(greeting_for(13, Some("")), "Good afternoon 👋");
    }

    #[test]
    fn save_load_clear_name() {
        let mut store = MemoryStore::new();
        assert_eq!(save_name(&mut store, "   ").unwrap(), None);
        assert_eq!(load_name(&store), None);

        assert_eq!(save_name(&mut store, "grace hopper").unwrap().as_deref(), Some("Grace Hopper"));
        assert_eq!(load_name(&store).as_deref(), Some("Grace Hopper"));

        clear_name(&mut store).unwrap();
        assert_eq!(load_name(&store), None);
    }
}
