//! Helpers shared by the resource modules.

use serde_json::{json, Map, Value};
use trove_db::{CollectionSchema, FieldKind, ID_FIELD};

/// OpenAPI component describing a stored document of `schema`.
pub fn document_component(schema: &CollectionSchema) -> Value {
    let mut properties = Map::new();
    properties.insert(
        ID_FIELD.to_string(),
        json!({ "type": "string", "description": "Server-assigned identifier" }),
    );

    let mut required = vec![json!(ID_FIELD)];

    for rule in &schema.fields {
        let mut property = json!({ "type": openapi_type(rule.kind) });
        if let Some(min) = rule.min {
            property["minimum"] = json!(min);
        }
        if let Some(default) = &rule.default {
            property["default"] = default.clone();
        }
        properties.insert(rule.name.to_string(), property);

        if rule.required {
            required.push(json!(rule.name));
        }
    }

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": !schema.strict
    })
}

/// OpenAPI component for a create failure body.
pub fn failure_component(labelled: bool) -> Value {
    if labelled {
        json!({
            "type": "object",
            "properties": {
                "message": { "type": "string" },
                "error": { "type": "string" }
            },
            "required": ["message", "error"]
        })
    } else {
        json!({
            "type": "object",
            "properties": {
                "error": { "type": "string" }
            },
            "required": ["error"]
        })
    }
}

/// OpenAPI paths for a resource: create plus the four placeholder routes.
pub fn resource_paths(tag: &str, document: &str, create_body: &str, failure: &str) -> Value {
    let placeholder = |summary: &str| {
        json!({
            "summary": summary,
            "tags": [tag],
            "responses": {
                "200": {
                    "description": "Not yet implemented; echoes a fixed label",
                    "content": { "text/plain": { "schema": { "type": "string" } } }
                }
            }
        })
    };
    let id_parameter = json!([{
        "name": "id",
        "in": "path",
        "required": true,
        "schema": { "type": "string" }
    }]);

    json!({
        "/": {
            "get": placeholder(&format!("List {}", tag.to_lowercase())),
            "post": {
                "summary": format!("Create {}", document.to_lowercase()),
                "tags": [tag],
                "requestBody": {
                    "required": true,
                    "content": {
                        "application/json": {
                            "schema": { "$ref": format!("#/components/schemas/{}", create_body) }
                        }
                    }
                },
                "responses": {
                    "201": {
                        "description": "Created",
                        "content": {
                            "application/json": {
                                "schema": { "$ref": format!("#/components/schemas/{}", document) }
                            }
                        }
                    },
                    "400": {
                        "description": "Rejected by the store",
                        "content": {
                            "application/json": {
                                "schema": { "$ref": format!("#/components/schemas/{}", failure) }
                            }
                        }
                    }
                }
            }
        },
        "/{id}": {
            "parameters": id_parameter,
            "get": placeholder(&format!("Get {} by id", document.to_lowercase())),
            "put": placeholder(&format!("Update {}", document.to_lowercase())),
            "delete": placeholder(&format!("Delete {}", document.to_lowercase()))
        }
    })
}

fn openapi_type(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::String => "string",
        FieldKind::Number => "number",
        FieldKind::Integer => "integer",
        FieldKind::Boolean => "boolean",
        FieldKind::Object => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trove_db::FieldRule;

    #[test]
    fn document_component_reflects_schema() {
        let schema = CollectionSchema::new("products", "Product")
            .field(FieldRule::number("price").required().min(0.0))
            .field(FieldRule::integer("stockQuantity").default_value(0))
            .strict();

        let component = document_component(&schema);

        assert_eq!(component["properties"]["price"]["type"], "number");
        assert_eq!(component["properties"]["price"]["minimum"], json!(0.0));
        assert_eq!(component["properties"]["stockQuantity"]["default"], json!(0));
        assert_eq!(component["required"], json!(["_id", "price"]));
        assert_eq!(component["additionalProperties"], json!(false));
    }

    #[test]
    fn failure_component_shapes_differ() {
        assert_eq!(failure_component(true)["required"], json!(["message", "error"]));
        assert_eq!(failure_component(false)["required"], json!(["error"]));
    }

    #[test]
    fn resource_paths_cover_five_routes() {
        let paths = resource_paths("Books", "Book", "NewBook", "BookCreateFailure");

        assert!(paths["/"]["get"].is_object());
        assert!(paths["/"]["post"].is_object());
        for method in ["get", "put", "delete"] {
            assert!(paths["/{id}"][method].is_object());
        }
    }
}
