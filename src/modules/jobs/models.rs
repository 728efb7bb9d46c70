use serde::Deserialize;
use serde_json::{Map, Value};
use trove_db::{CollectionSchema, FieldRule};

/// Collection job documents are stored in.
pub const COLLECTION: &str = "jobs";

/// Request model for creating a new job posting. Every body field is forwarded.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct NewJob(pub Map<String, Value>);

/// Store schema for jobs. Open: undeclared fields are kept.
pub fn schema() -> CollectionSchema {
    CollectionSchema::new(COLLECTION, "Job")
        .field(FieldRule::string("title").required())
        .field(FieldRule::string("type").required())
        .field(FieldRule::string("description").required())
        // name, contactEmail, contactPhone
        .field(FieldRule::object("company"))
        .field(FieldRule::string("location"))
        .field(FieldRule::number("salary").min(0.0))
}
