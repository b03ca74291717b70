use mongodb::bson::{self, Bson, Document};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::Result;

/// The six blog fields replaced by an update.
///
/// Absent fields deserialize to `None` and are written as `null`; any other
/// fields in the request body are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlogFields {
    pub url: Option<Value>,
    #[serde(rename = "blogName")]
    pub blog_name: Option<Value>,
    pub email: Option<Value>,
    pub category: Option<Value>,
    pub long_description: Option<Value>,
    pub short_description: Option<Value>,
}

impl BlogFields {
    pub fn to_document(&self) -> Result<Document> {
        Ok(bson::to_document(self)?)
    }
}

/// Outcome of inserting one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertResult {
    pub acknowledged: bool,
    #[serde(serialize_with = "serialize_bson")]
    pub inserted_id: Bson,
}

impl InsertResult {
    pub fn new(inserted_id: Bson) -> Self {
        Self {
            acknowledged: true,
            inserted_id,
        }
    }
}

/// Outcome of an upsert.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResult {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    #[serde(serialize_with = "serialize_optional_bson")]
    pub upserted_id: Option<Bson>,
}

impl UpdateResult {
    pub fn new(matched_count: u64, modified_count: u64, upserted_id: Option<Bson>) -> Self {
        Self {
            acknowledged: true,
            matched_count,
            modified_count,
            upserted_count: u64::from(upserted_id.is_some()),
            upserted_id,
        }
    }
}

/// Outcome of deleting at most one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl DeleteResult {
    pub fn new(deleted_count: u64) -> Self {
        Self {
            acknowledged: true,
            deleted_count,
        }
    }
}

/// Convert a request body into a storable document.
pub fn json_to_document(body: &Map<String, Value>) -> Result<Document> {
    Ok(bson::to_document(body)?)
}

/// Render a stored document as plain JSON. ObjectIds become hex strings.
pub fn document_to_json(document: Document) -> Value {
    Value::Object(
        document
            .into_iter()
            .map(|(key, value)| (key, bson_to_json(value)))
            .collect(),
    )
}

pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(id) => Value::String(id.to_hex()),
        Bson::Document(document) => document_to_json(document),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

fn serialize_bson<S: Serializer>(value: &Bson, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    bson_to_json(value.clone()).serialize(serializer)
}

fn serialize_optional_bson<S: Serializer>(
    value: &Option<Bson>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    value.clone().map(bson_to_json).serialize(serializer)
}
