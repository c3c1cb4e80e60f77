use schemock::{Generator, Schema};
use serde_json::{json, Value};

fn parse(value: Value) -> Schema {
    Schema::from_value(value).expect("schema should parse")
}

#[test]
fn test_user_object_example() {
    let schema = parse(json!({
        "type": "object",
        "properties": {
            "id": { "type": "uuid" },
            "age": { "type": "number", "min": 18, "max": 80 }
        }
    }));

    let mut generator = Generator::seeded(2024);
    for _ in 0..100 {
        let value = generator.generate(&schema).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 2);

        let id = object["id"].as_str().unwrap();
        assert!(uuid::Uuid::parse_str(id).is_ok(), "not a uuid: {}", id);

        let age = object["age"].as_i64().unwrap();
        assert!((18..=80).contains(&age));
    }
}

#[test]
fn test_two_booleans_example() {
    let schema = parse(json!({
        "type": "array",
        "items": { "type": "boolean" },
        "min": 2,
        "max": 2
    }));

    let mut generator = Generator::seeded(7);
    for _ in 0..20 {
        let value = generator.generate(&schema).unwrap();
        let items = value.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(Value::is_boolean));
    }
}

#[test]
fn test_options_example_ignores_pattern() {
    let schema = parse(json!({
        "type": "string",
        "options": ["red", "green", "blue"],
        "pattern": "uuid"
    }));

    let values = Generator::seeded(3).generate_multiple(&schema, 200);
    for value in values {
        let value = value.unwrap();
        assert!(["red", "green", "blue"].contains(&value.as_str().unwrap()));
    }
}

#[test]
fn test_nested_document_shapes() {
    let schema = parse(json!({
        "type": "object",
        "properties": {
            "customer": {
                "type": "object",
                "properties": {
                    "name": { "type": "name" },
                    "email": { "type": "string", "pattern": "email" },
                    "phone": { "type": "phone", "nullable": true }
                }
            },
            "lines": {
                "type": "array",
                "min": 1,
                "max": 3,
                "items": {
                    "type": "object",
                    "properties": {
                        "product": { "type": "string", "pattern": "productName" },
                        "price": { "type": "string", "pattern": "price" },
                        "quantity": { "type": "number", "min": 1, "max": 9 },
                        "note": { "type": "string", "pattern": "sentence", "optional": true }
                    }
                }
            },
            "placedAt": { "type": "date" },
            "currency": { "type": "currency" }
        }
    }));

    let mut generator = Generator::seeded(11);
    for value in generator.generate_multiple(&schema, 25) {
        let order = value.unwrap();
        let customer = order["customer"].as_object().unwrap();
        assert!(customer["name"].is_string());
        assert!(customer["email"].as_str().unwrap().contains('@'));
        assert!(customer.contains_key("phone"));

        let lines = order["lines"].as_array().unwrap();
        assert!((1..=3).contains(&lines.len()));
        for line in lines {
            let line = line.as_object().unwrap();
            let quantity = line["quantity"].as_i64().unwrap();
            assert!((1..=9).contains(&quantity));
            assert!(line["price"].as_str().unwrap().parse::<f64>().is_ok());
            if let Some(note) = line.get("note") {
                assert!(note.is_string());
            }
        }

        assert!(chrono::DateTime::parse_from_rfc3339(order["placedAt"].as_str().unwrap()).is_ok());
        assert_eq!(order["currency"].as_str().unwrap().len(), 3);
    }
}

#[test]
fn test_malformed_schemas_degrade_without_errors() {
    let mut generator = Generator::seeded(5);

    let cases = [
        (json!({ "type": "object" }), json!({})),
        (json!({ "type": "array" }), json!([null, null, null])),
        (json!({ "type": "spreadsheet" }), Value::Null),
        (
            json!({ "type": "object", "properties": { "x": { "type": "nope" } } }),
            json!({ "x": null }),
        ),
    ];

    for (document, expected) in cases {
        let schema = parse(document);
        assert_eq!(generator.generate(&schema), Some(expected));
    }
}

#[test]
fn test_optional_root_can_be_absent() {
    let schema = Schema::boolean().optional();
    let values = Generator::seeded(8).generate_multiple(&schema, 300);
    assert!(values.iter().any(Option::is_none));
    assert!(values.iter().any(Option::is_some));
}
