//! Collection schemas enforced by the store at write time.
//!
//! A schema lists the known fields of a collection. Validation casts each
//! known field to its declared kind, applies defaults and bounds, and either
//! keeps or drops unknown fields depending on `strict`.

use std::fmt;

use serde_json::{Map, Number, Value};

/// Value kind a field is cast to before it is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Number,
    Integer,
    Boolean,
    Object,
}

impl FieldKind {
    pub fn label(self) -> &'static str {
        match self {
            FieldKind::String => "String",
            FieldKind::Number => "Number",
            FieldKind::Integer => "Integer",
            FieldKind::Boolean => "Boolean",
            FieldKind::Object => "Object",
        }
    }

    /// Cast `value` into this kind. The original value is handed back on failure.
    fn cast(self, value: Value) -> Result<Value, Value> {
        match (self, value) {
            (FieldKind::String, Value::String(s)) => Ok(Value::String(s)),
            (FieldKind::String, Value::Number(n)) => Ok(Value::String(n.to_string())),
            (FieldKind::String, Value::Bool(b)) => Ok(Value::String(b.to_string())),

            (FieldKind::Number, Value::Number(n)) => Ok(Value::Number(n)),
            (FieldKind::Number, Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .ok_or(Value::String(s)),

            (FieldKind::Integer, Value::Number(n)) => {
                if n.is_i64() || n.is_u64() {
                    Ok(Value::Number(n))
                } else {
                    match n.as_f64() {
                        Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                            Ok(Value::from(f as i64))
                        }
                        _ => Err(Value::Number(n)),
                    }
                }
            }
            (FieldKind::Integer, Value::String(s)) => s
                .trim()
                .parse::<i64>()
                .map(Value::from)
                .map_err(|_| Value::String(s)),

            (FieldKind::Boolean, Value::Bool(b)) => Ok(Value::Bool(b)),
            (FieldKind::Boolean, Value::String(s)) => match s.as_str() {
                "true" | "1" => Ok(Value::Bool(true)),
                "false" | "0" => Ok(Value::Bool(false)),
                _ => Err(Value::String(s)),
            },
            (FieldKind::Boolean, Value::Number(n)) => match n.as_i64() {
                Some(1) => Ok(Value::Bool(true)),
                Some(0) => Ok(Value::Bool(false)),
                _ => Err(Value::Number(n)),
            },

            (FieldKind::Object, Value::Object(o)) => Ok(Value::Object(o)),

            (_, other) => Err(other),
        }
    }
}

/// A single declared field of a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRule {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub min: Option<f64>,
    pub default: Option<Value>,
}

impl FieldRule {
    pub fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            min: None,
            default: None,
        }
    }

    pub fn string(name: &'static str) -> Self {
        Self::new(name, FieldKind::String)
    }

    pub fn number(name: &'static str) -> Self {
        Self::new(name, FieldKind::Number)
    }

    pub fn integer(name: &'static str) -> Self {
        Self::new(name, FieldKind::Integer)
    }

    pub fn object(name: &'static str) -> Self {
        Self::new(name, FieldKind::Object)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    fn required_violation(&self) -> FieldViolation {
        FieldViolation::new(self.name, format!("Path `{}` is required.", self.name))
    }

    fn check(&self, value: Value) -> Result<Value, FieldViolation> {
        let value = self.kind.cast(value).map_err(|original| {
            FieldViolation::new(
                self.name,
                format!(
                    "Cast to {} failed for value {} (type {}) at path \"{}\"",
                    self.kind.label(),
                    original,
                    type_name(&original),
                    self.name
                ),
            )
        })?;

        if self.required && value.as_str() == Some("") {
            return Err(self.required_violation());
        }

        if let (Some(min), Some(actual)) = (self.min, value.as_f64()) {
            if actual < min {
                return Err(FieldViolation::new(
                    self.name,
                    format!(
                        "Path `{}` ({}) is less than minimum allowed value ({}).",
                        self.name, value, min
                    ),
                ));
            }
        }

        Ok(value)
    }
}

/// Why a field was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub path: String,
    pub reason: String,
}

impl FieldViolation {
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.reason)
    }
}

/// Declared shape of one collection.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionSchema {
    /// Collection name documents are stored under
    pub collection: &'static str,
    /// Model name used in validation messages
    pub model: &'static str,
    pub fields: Vec<FieldRule>,
    /// Drop fields not declared in `fields`
    pub strict: bool,
}

impl CollectionSchema {
    pub fn new(collection: &'static str, model: &'static str) -> Self {
        Self {
            collection,
            model,
            fields: Vec::new(),
            strict: false,
        }
    }

    pub fn field(mut self, rule: FieldRule) -> Self {
        self.fields.push(rule);
        self
    }

    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Validate and normalise `input`. Violations are reported in field declaration order.
    pub fn validate(
        &self,
        mut input: Map<String, Value>,
    ) -> Result<Map<String, Value>, Vec<FieldViolation>> {
        let mut output = Map::new();
        let mut violations = Vec::new();

        for rule in &self.fields {
            match input.remove(rule.name) {
                None => {
                    if let Some(default) = &rule.default {
                        output.insert(rule.name.to_string(), default.clone());
                    } else if rule.required {
                        violations.push(rule.required_violation());
                    }
                }
                Some(Value::Null) => {
                    if rule.required {
                        violations.push(rule.required_violation());
                    } else {
                        output.insert(rule.name.to_string(), Value::Null);
                    }
                }
                Some(value) => match rule.check(value) {
                    Ok(value) => {
                        output.insert(rule.name.to_string(), value);
                    }
                    Err(violation) => violations.push(violation),
                },
            }
        }

        if !violations.is_empty() {
            return Err(violations);
        }

        if !self.strict {
            output.extend(input);
        }

        Ok(output)
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn product_schema() -> CollectionSchema {
        CollectionSchema::new("products", "Product")
            .field(FieldRule::string("title").required())
            .field(FieldRule::number("price").required().min(0.0))
            .field(FieldRule::integer("stockQuantity").min(0.0).default_value(0))
            .strict()
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected a JSON object"),
        }
    }

    #[test]
    fn applies_defaults_and_drops_unknown_fields_when_strict() {
        let out = product_schema()
            .validate(object(json!({"title": "Pen", "price": 1.5, "extra": "x"})))
            .unwrap();

        assert_eq!(out.get("stockQuantity"), Some(&json!(0)));
        assert_eq!(out.get("price"), Some(&json!(1.5)));
        assert!(!out.contains_key("extra"));
    }

    #[test]
    fn keeps_unknown_fields_when_open() {
        let schema =
            CollectionSchema::new("books", "Book").field(FieldRule::string("title").required());
        let out = schema
            .validate(object(json!({"title": "Dune", "author": "Herbert"})))
            .unwrap();

        assert_eq!(out.get("author"), Some(&json!("Herbert")));
    }

    #[test]
    fn reports_missing_required_fields_in_order() {
        let violations = product_schema().validate(Map::new()).unwrap_err();

        assert_eq!(
            violations,
            vec![
                FieldViolation::new("title", "Path `title` is required."),
                FieldViolation::new("price", "Path `price` is required."),
            ]
        );
    }

    #[test]
    fn empty_string_does_not_satisfy_required() {
        let violations = product_schema()
            .validate(object(json!({"title": "", "price": 2})))
            .unwrap_err();

        assert_eq!(violations[0].path, "title");
    }

    #[test]
    fn null_is_treated_as_missing_for_required_fields() {
        let violations = product_schema()
            .validate(object(json!({"title": null, "price": 2})))
            .unwrap_err();

        assert_eq!(violations[0].reason, "Path `title` is required.");
    }

    #[test]
    fn casts_numeric_strings() {
        let out = product_schema()
            .validate(object(json!({"title": 42, "price": "3.25", "stockQuantity": "7"})))
            .unwrap();

        assert_eq!(out.get("title"), Some(&json!("42")));
        assert_eq!(out.get("price"), Some(&json!(3.25)));
        assert_eq!(out.get("stockQuantity"), Some(&json!(7)));
    }

    #[test]
    fn reports_cast_failures() {
        let violations = product_schema()
            .validate(object(json!({"title": "Pen", "price": "abc"})))
            .unwrap_err();

        assert_eq!(
            violations[0].reason,
            "Cast to Number failed for value \"abc\" (type string) at path \"price\""
        );
    }

    #[test]
    fn rejects_fractional_integers() {
        let violations = product_schema()
            .validate(object(json!({"title": "Pen", "price": 1, "stockQuantity": 2.5})))
            .unwrap_err();

        assert_eq!(violations[0].path, "stockQuantity");
    }

    #[test]
    fn enforces_minimum() {
        let violations = product_schema()
            .validate(object(json!({"title": "Pen", "price": -1})))
            .unwrap_err();

        assert_eq!(
            violations[0].to_string(),
            "price: Path `price` (-1) is less than minimum allowed value (0)."
        );
    }
}
