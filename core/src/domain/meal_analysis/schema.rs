use serde_json::json;

/// Returns the JSON schema for the food extraction answer
pub fn get_extraction_schema() -> serde_json::Value {
    json!({
        "type": "array",
        "items": {
            "type": "object",
            "properties": {
                "name": { "type": "string" },
                "quantity": { "type": "number" }
            },
            "required": ["name", "quantity"]
        }
    })
}

/// Returns the JSON schema for the basic/processed classification answer
pub fn get_classification_schema() -> serde_json::Value {
    json!({
        "type": "array",
        "items": {
            "type": "object",
            "properties": {
                "name": { "type": "string" },
                "is_basic": { "type": "boolean" }
            },
            "required": ["name", "is_basic"]
        }
    })
}
