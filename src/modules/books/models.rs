use serde::Deserialize;
use serde_json::{Map, Value};
use trove_db::{CollectionSchema, FieldRule};

/// Collection book documents are stored in.
pub const COLLECTION: &str = "books";

/// Request model for creating a new book. Every body field is forwarded.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct NewBook(pub Map<String, Value>);

/// Store schema for books. Open: undeclared fields are kept.
pub fn schema() -> CollectionSchema {
    CollectionSchema::new(COLLECTION, "Book")
        .field(FieldRule::string("title").required())
        .field(FieldRule::string("author").required())
        .field(FieldRule::string("isbn"))
        .field(FieldRule::integer("publishedYear").min(0.0))
}
