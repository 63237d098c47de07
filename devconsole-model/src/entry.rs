use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// A record with a unique natural key, managed as part of a collection.
///
/// Entries travel through the edit pipeline as JSON objects, so the type
/// must round-trip through serde. `KEY_FIELD` names the object field that
/// holds the key (e.g. `"username"`).
pub trait Entry: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Object field holding the natural key.
    const KEY_FIELD: &'static str;

    /// The natural key. Compared case-sensitively.
    fn key(&self) -> &str;
}

/// An object loaded from and saved to a remote resource that carries one
/// collection of entries alongside other settings.
pub trait HasEntries<E: Entry> {
    /// The entries as stored in the object.
    fn entries(&self) -> &[E];

    /// Replaces the stored entries wholesale.
    fn set_entries(&mut self, entries: Vec<E>);
}

/// Extracts an entry's key from its JSON object form.
pub fn key_of<E: Entry>(object: &Map<String, Value>) -> Option<&str> {
    object.get(E::KEY_FIELD).and_then(Value::as_str)
}
