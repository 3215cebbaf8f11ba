use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tagpack::format::{Format, Serializer, TextCodec};
use tagpack::{
    from_str, from_value, shape, to_string, to_value, Complex, Decoder, Encoder, Error, Packer,
    Separators, Shape, Value,
};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct User {
    id: u32,
    name: String,
    active: bool,
    tags: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Product {
    sku: String,
    price: f64,
    quantity: u32,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Order {
    order_id: u64,
    customer: User,
    items: Vec<Product>,
    notes: Option<String>,
    attributes: BTreeMap<String, String>,
}

fn all_kinds() -> Value {
    Value::dict([
        (Value::from("none"), Value::None),
        (Value::from("flag"), Value::Bool(false)),
        (
            Value::from("big"),
            Value::Int("98765432109876543210987654321".parse::<BigInt>().unwrap()),
        ),
        (Value::from("float"), Value::from(-0.000123)),
        (Value::from("complex"), Value::Complex(Complex::new(3.0, 1.4))),
        (Value::from("text"), Value::from("line\nbreak \"quoted\" \\ \u{7f} \u{e9}")),
        (Value::from("bytes"), Value::Bytes(b"\x00binary\xff".to_vec())),
        (Value::from("bytearray"), Value::ByteArray(b"mutable".to_vec())),
        (Value::from("list"), Value::List(vec![Value::from(1), Value::from("2")])),
        (Value::from("tuple"), Value::tuple([Value::None, Value::Bool(true)])),
        (Value::from("set"), Value::Set(vec![Value::from(3)])),
        (Value::from("frozenset"), Value::FrozenSet(vec![Value::from("f")])),
        (Value::tuple([Value::from(1), Value::from(2)]), Value::from("tuple key")),
        (Value::from("range"), Value::range(-5, 100, 7)),
        (Value::from("cell"), Value::Cell(Box::new(Value::List(vec![])))),
    ])
}

#[test]
fn test_simple_struct() {
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        active: true,
        tags: vec!["admin".to_string(), "developer".to_string()],
    };

    let text = to_string(&user).unwrap();
    println!("User envelope: {}", text);

    let user_back: User = from_str(&text).unwrap();
    assert_eq!(user, user_back);
}

#[test]
fn test_nested_struct() {
    let order = Order {
        order_id: 12345,
        customer: User {
            id: 123,
            name: "Bob".to_string(),
            active: false,
            tags: vec![],
        },
        items: vec![
            Product {
                sku: "A-1".to_string(),
                price: 9.99,
                quantity: 2,
            },
            Product {
                sku: "B-2".to_string(),
                price: 0.1,
                quantity: 10,
            },
        ],
        notes: None,
        attributes: [("gift".to_string(), "yes".to_string())].into_iter().collect(),
    };

    let text = to_string(&order).unwrap();
    let order_back: Order = from_str(&text).unwrap();
    assert_eq!(order, order_back);

    let value = to_value(&order).unwrap();
    assert_eq!(value.get("order_id"), Some(&Value::from(12345u64)));
    assert_eq!(from_value::<Order>(value).unwrap(), order);
}

#[test]
fn test_all_kinds_round_trip_every_format() {
    let value = all_kinds();
    for format in Format::ALL {
        let serializer = format.serializer();
        let text = serializer.dumps(&value).unwrap();
        let back = serializer.loads(&text).unwrap();
        assert_eq!(back, value, "format {}", format);
    }
}

#[test]
fn test_round_trip_with_unusual_separators() {
    let value = all_kinds();
    for (item, key) in [(";", "="), ("|", "#"), (" \t ", "\u{e9}"), ("a", "b")] {
        let separators = Separators::new(item, key).unwrap();
        let serializer = Serializer::new(TextCodec::new(separators));
        let text = serializer.dumps(&value).unwrap();
        assert_eq!(serializer.loads(&text).unwrap(), value, "{:?} {:?}", item, key);
    }
}

#[test]
fn test_dict_insertion_order_survives() {
    let value = Value::dict([("zeta", 1), ("alpha", 2), ("mid", 3), ("beta", 4)]);
    let serializer = Serializer::text();
    let back = serializer.loads(&serializer.dumps(&value).unwrap()).unwrap();
    match back {
        Value::Dict(pairs) => {
            let keys: Vec<_> = pairs.iter().filter_map(|(k, _)| k.as_str()).collect();
            assert_eq!(keys, ["zeta", "alpha", "mid", "beta"]);
        }
        other => panic!("expected dict, got {:?}", other),
    }
}

#[test]
fn test_encode_mapping_example() {
    let text = Encoder::default().encode(&shape!({"a": "1", "b": "2"}));
    assert_eq!(text, r#"{"a":"1","b":"2"}"#);
    let decoded = Decoder::default().decode_str(&text).unwrap();
    assert_eq!(decoded, shape!({"a": "1", "b": "2"}));
    assert_ne!(decoded, shape!({"b": "2", "a": "1"}));

    let reversed = Decoder::default()
        .decode_str(r#"{"b":"2","a":"1"}"#)
        .unwrap();
    let keys: Vec<_> = reversed.as_map().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, ["b", "a"]);
}

#[test]
fn test_decode_with_whitespace_example() {
    let shape = Decoder::default().decode_str(r#"["x", "y"]"#).unwrap();
    assert_eq!(shape, shape!(["x", "y"]));
    assert_eq!(Encoder::default().encode(&shape), r#"["x","y"]"#);
}

#[test]
fn test_whitespace_only_separators_rejected() {
    assert!(matches!(Separators::new(" ", "    "), Err(Error::Config(_))));
}

#[test]
fn test_truncated_mapping() {
    let err = Decoder::default().decode_str(r#"{"a":"b""#).unwrap_err();
    assert!(matches!(err, Error::UnexpectedEnd { .. }), "{:?}", err);
}

#[test]
fn test_duplicate_keys_first_wins() {
    let shape = Decoder::default().decode_str(r#"{"k":"1","k":"2"}"#).unwrap();
    assert_eq!(shape, shape!({"k": "1"}));
}

#[test]
fn test_decoder_reads_from_stream() {
    let text = Serializer::text().dumps(&all_kinds()).unwrap();
    let reader = std::io::Cursor::new(text.into_bytes());
    let shape = Decoder::default().decode_reader(reader).unwrap();
    assert_eq!(Packer::new().unpack_envelope(&shape).unwrap(), all_kinds());
}

#[test]
fn test_pretty_json_input_is_accepted() {
    let text = "{\r\n  \"type\" : \"list\",\n  \"value\" : [\n    {\"type\": \"int\", \"value\": \"1\"} ,\n    {\"type\": \"None\"}\n  ]\n}\n";
    let value = Serializer::text().loads(text).unwrap();
    assert_eq!(value, Value::List(vec![Value::from(1), Value::None]));
}

#[test]
fn test_serde_json_compatibility() {
    let json = serde_json::json!({
        "type": "dict",
        "value": [
            {"type": "tuple", "value": [{"type": "str", "value": "k\u{1}"}, {"type": "float", "value": "1.5"}]}
        ]
    });
    let text = serde_json::to_string_pretty(&json).unwrap();
    let value = Serializer::text().loads(&text).unwrap();
    assert_eq!(value, Value::dict([(Value::from("k\u{1}"), Value::from(1.5))]));

    let ours = Serializer::text().dumps(&value).unwrap();
    let reparsed: serde_json::Value = serde_json::from_str(&ours).unwrap();
    assert_eq!(reparsed, json);
}

#[test]
fn test_unknown_kind_on_load() {
    for tag in ["function", "module", "code", "frozendict"] {
        let text = format!(r#"{{"type":"{}","value":"x"}}"#, tag);
        let err = Serializer::text().loads(&text).unwrap_err();
        assert!(matches!(err, Error::UnsupportedKind(_)), "{}", tag);
    }
}

#[test]
fn test_malformed_node_on_load() {
    let err = Serializer::text()
        .loads(r#"{"type":"range","start":{"type":"int","value":"0"},"stop":{"type":"int","value":"3"}}"#)
        .unwrap_err();
    assert!(matches!(err, Error::MalformedNode(_)));

    let err = Serializer::text().loads(r#"["not", "an", "envelope"]"#).unwrap_err();
    assert!(matches!(err, Error::MalformedNode(_)));
}

#[test]
fn test_malformed_input_position() {
    let err = Decoder::default()
        .decode_str("{\n  \"a\": \"1\";\n}")
        .unwrap_err();
    match err {
        Error::MalformedInput { line, .. } => assert_eq!(line, 2),
        other => panic!("expected malformed input, got {:?}", other),
    }
}

#[test]
fn test_yaml_and_toml_documents() {
    let yaml = Format::Yaml.serializer().dumps(&Value::from(42)).unwrap();
    assert!(yaml.contains("type: int"));

    let toml = Format::Toml.serializer().dumps(&Value::from("s")).unwrap();
    let parsed: Shape = ::toml::from_str(&toml).unwrap();
    assert_eq!(parsed, shape!({"type": "str", "value": "s"}));
}

#[test]
fn test_cross_format_conversion() {
    let value = all_kinds();
    let json = Format::Json.serializer().dumps(&value).unwrap();
    let loaded = Format::Json.serializer().loads(&json).unwrap();
    let yaml = Format::Yaml.serializer().dumps(&loaded).unwrap();
    let from_yaml = Format::Yaml.serializer().loads(&yaml).unwrap();
    let toml = Format::Toml.serializer().dumps(&from_yaml).unwrap();
    assert_eq!(Format::Toml.serializer().loads(&toml).unwrap(), value);
}
