use serde::{Deserialize, Serialize};

/// A greeting for a single language.
///
/// One element of the top-level JSON array in the data file. The `id` is
/// assigned by the store, never by clients, and `language` is unique across
/// the collection ignoring case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Greeting {
    pub id: u64,
    pub language: String,
    pub greeting: String,
    pub formal: bool,
}

/// Request body for creating or updating a greeting.
///
/// All fields are optional so that presence validation happens in the
/// greetings module (and maps to the API's own 400 message) instead of
/// failing body deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GreetingDraft {
    pub language: Option<String>,
    pub greeting: Option<String>,
    pub formal: Option<bool>,
}
