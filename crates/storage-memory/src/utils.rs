use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::db::DocumentData;
use crate::errors::StorageError;
use instep_core::errors::Result;

/// Decodes a stored document into a domain model, injecting the document
/// id under `id` when the document body does not carry one.
pub(crate) fn decode<T: DeserializeOwned>(id: &str, mut doc: DocumentData) -> Result<T> {
    doc.entry("id")
        .or_insert_with(|| Value::String(id.to_string()));
    serde_json::from_value(Value::Object(doc)).map_err(|err| StorageError::from(err).into())
}

/// Decodes the first row of a query result, if any.
pub(crate) fn decode_first<T: DeserializeOwned>(
    mut rows: Vec<(String, DocumentData)>,
) -> Result<Option<T>> {
    if rows.is_empty() {
        return Ok(None);
    }
    let (id, doc) = rows.swap_remove(0);
    decode(&id, doc).map(Some)
}

/// Decodes every row of a query result.
pub(crate) fn decode_all<T: DeserializeOwned>(rows: Vec<(String, DocumentData)>) -> Result<Vec<T>> {
    rows.into_iter().map(|(id, doc)| decode(&id, doc)).collect()
}
