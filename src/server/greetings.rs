//! Greeting operations.
//!
//! Each operation is a self-contained transaction against the store: load
//! the full collection, transform it in memory, save it back (for
//! mutations), and return the affected record. Nothing is cached between
//! calls. Two concurrent mutations can both load the same snapshot and save
//! sequentially; the later save wins the whole document.

use crate::models::{Greeting, GreetingDraft};
use crate::server::storage::{GreetingStore, StorageError};

/// Errors produced by the greeting operations.
#[derive(Debug)]
pub enum GreetingError {
    /// `language` or `greeting` is missing, or empty after trimming.
    MissingFields,
    /// Another record already uses this language, ignoring case.
    DuplicateLanguage(String),
    /// No record with the given id.
    NotFound(u64),
    /// The store failed to read or write the data file.
    Storage(StorageError),
}

impl std::fmt::Display for GreetingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GreetingError::MissingFields => {
                write!(f, "language and greeting are required fields")
            }
            GreetingError::DuplicateLanguage(lang) => {
                write!(f, "a greeting for language '{}' already exists", lang)
            }
            GreetingError::NotFound(id) => write!(f, "no greeting with id {}", id),
            GreetingError::Storage(e) => write!(f, "storage error: {}", e),
        }
    }
}

impl std::error::Error for GreetingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GreetingError::Storage(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StorageError> for GreetingError {
    fn from(e: StorageError) -> Self {
        GreetingError::Storage(e)
    }
}

/// Filters accepted by [`list`].
#[derive(Debug, Clone, Default)]
pub struct GreetingFilter {
    /// Case-insensitive substring match against `language`.
    pub language: Option<String>,
    /// Exact match against `formal`.
    pub formal: Option<bool>,
}

/// True when two language names are equal ignoring case.
fn same_language(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Validates a draft's required fields, returning trimmed copies.
fn required_fields(draft: &GreetingDraft) -> Result<(String, String), GreetingError> {
    let language = draft.language.as_deref().map(str::trim).unwrap_or("");
    let greeting = draft.greeting.as_deref().map(str::trim).unwrap_or("");

    if language.is_empty() || greeting.is_empty() {
        return Err(GreetingError::MissingFields);
    }

    Ok((language.to_string(), greeting.to_string()))
}

/// Lists greetings, applying any supplied filters in collection order.
pub fn list(
    store: &GreetingStore,
    filter: &GreetingFilter,
) -> Result<Vec<Greeting>, GreetingError> {
    let mut greetings = store.load()?;

    if let Some(language) = &filter.language {
        let needle = language.to_lowercase();
        greetings.retain(|g| g.language.to_lowercase().contains(&needle));
    }

    if let Some(formal) = filter.formal {
        greetings.retain(|g| g.formal == formal);
    }

    Ok(greetings)
}

/// Returns the greeting with the given id.
pub fn get(store: &GreetingStore, id: u64) -> Result<Greeting, GreetingError> {
    let greetings = store.load()?;

    greetings
        .into_iter()
        .find(|g| g.id == id)
        .ok_or(GreetingError::NotFound(id))
}

/// Creates a new greeting.
///
/// The id is `max(existing ids) + 1`, or 1 for an empty collection. String
/// fields are stored trimmed; `formal` defaults to false when omitted.
pub fn create(store: &GreetingStore, draft: &GreetingDraft) -> Result<Greeting, GreetingError> {
    let mut greetings = store.load()?;

    let (language, greeting) = required_fields(draft)?;

    if greetings.iter().any(|g| same_language(&g.language, &language)) {
        return Err(GreetingError::DuplicateLanguage(language));
    }

    let id = greetings.iter().map(|g| g.id).max().map_or(1, |max| max + 1);
    let created = Greeting {
        id,
        language,
        greeting,
        formal: draft.formal.unwrap_or(false),
    };

    greetings.push(created.clone());
    store.save(&greetings)?;

    Ok(created)
}

/// Replaces the greeting with the given id.
///
/// `language` and `greeting` are required as in [`create`]. `formal` keeps
/// its stored value when the draft omits it. The language uniqueness check
/// skips the record being updated, so re-casing a record's own language is
/// allowed.
pub fn update(
    store: &GreetingStore,
    id: u64,
    draft: &GreetingDraft,
) -> Result<Greeting, GreetingError> {
    let mut greetings = store.load()?;

    let index = greetings
        .iter()
        .position(|g| g.id == id)
        .ok_or(GreetingError::NotFound(id))?;

    let (language, greeting) = required_fields(draft)?;

    if greetings
        .iter()
        .any(|g| g.id != id && same_language(&g.language, &language))
    {
        return Err(GreetingError::DuplicateLanguage(language));
    }

    let updated = Greeting {
        id,
        language,
        greeting,
        formal: draft.formal.unwrap_or(greetings[index].formal),
    };
    greetings[index] = updated.clone();
    store.save(&greetings)?;

    Ok(updated)
}

/// Removes the greeting with the given id and returns it.
pub fn delete(store: &GreetingStore, id: u64) -> Result<Greeting, GreetingError> {
    let mut greetings = store.load()?;

    let index = greetings
        .iter()
        .position(|g| g.id == id)
        .ok_or(GreetingError::NotFound(id))?;

    let removed = greetings.remove(index);
    store.save(&greetings)?;

    Ok(removed)
}
