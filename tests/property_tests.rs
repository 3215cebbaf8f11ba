//! Property-based tests for the codec and the tagged model.
//!
//! Shapes and values are generated recursively; the separator pairs are drawn
//! from every printable ASCII character the grammar leaves free.

use num_bigint::BigInt;
use proptest::prelude::*;
use tagpack::format::{Serializer, TextCodec};
use tagpack::{Complex, Decoder, Encoder, Packer, Separators, Shape, ShapeMap, Value};

const STRUCTURAL: &str = "[]{}\"\\";

fn separator_char() -> impl Strategy<Value = char> {
    (0x21u8..0x7f)
        .prop_map(char::from)
        .prop_filter("structural character", |c| !STRUCTURAL.contains(*c))
}

fn separators() -> impl Strategy<Value = Separators> {
    (separator_char(), separator_char())
        .prop_filter("separators must differ", |(item, key)| item != key)
        .prop_map(|(item, key)| {
            Separators::new(&item.to_string(), &key.to_string()).expect("valid separators")
        })
}

fn shape() -> impl Strategy<Value = Shape> {
    let leaf = any::<String>().prop_map(Shape::Str);
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Shape::List),
            prop::collection::vec((any::<String>(), inner), 0..6).prop_map(|pairs| {
                let mut map = ShapeMap::new();
                for (k, v) in pairs {
                    map.insert_first(k, v);
                }
                Shape::Map(map)
            }),
        ]
    })
}

fn value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::None),
        any::<bool>().prop_map(Value::Bool),
        any::<i128>().prop_map(|i| Value::Int(BigInt::from(i) * BigInt::from(i))),
        any::<i64>().prop_map(Value::from),
        any::<f64>()
            .prop_filter("NaN is never equal to itself", |f| !f.is_nan())
            .prop_map(Value::Float),
        (any::<f64>(), any::<f64>())
            .prop_filter("NaN is never equal to itself", |(re, im)| {
                !re.is_nan() && !im.is_nan()
            })
            .prop_map(|(re, im)| Value::Complex(Complex::new(re, im))),
        any::<String>().prop_map(Value::Str),
        prop::collection::vec(any::<u8>(), 0..16).prop_map(Value::Bytes),
        prop::collection::vec(any::<u8>(), 0..16).prop_map(Value::ByteArray),
        (any::<i32>(), any::<i32>(), any::<i32>())
            .prop_filter("step must be non-zero", |(_, _, step)| *step != 0)
            .prop_map(|(start, stop, step)| Value::range(start, stop, step)),
    ];
    leaf.prop_recursive(4, 48, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::List),
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Tuple),
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Set),
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::FrozenSet),
            // Unique string keys, so unpacking has no duplicates to merge.
            prop::collection::btree_map(any::<String>(), inner.clone(), 0..5)
                .prop_map(|m| Value::dict(m)),
            inner.prop_map(|v| Value::Cell(Box::new(v))),
        ]
    })
}

proptest! {
    #[test]
    fn prop_shape_round_trip_default(s in shape()) {
        let text = Encoder::default().encode(&s);
        prop_assert_eq!(Decoder::default().decode_str(&text).unwrap(), s);
    }

    #[test]
    fn prop_separator_independence(s in shape(), seps in separators()) {
        let text = Encoder::new(seps).encode(&s);
        prop_assert_eq!(Decoder::new(seps).decode_str(&text).unwrap(), s);
    }

    #[test]
    fn prop_streaming_matches_borrowed(s in shape()) {
        let text = Encoder::default().encode(&s);
        let decoder = Decoder::default();
        prop_assert_eq!(
            decoder.decode_reader(text.as_bytes()).unwrap(),
            decoder.decode_str(&text).unwrap()
        );
    }

    #[test]
    fn prop_escaping_symmetry(text in "[\\x00-\\x7f]*") {
        let encoded = Encoder::default().encode(&Shape::Str(text.clone()));
        prop_assert_eq!(Decoder::default().decode_str(&encoded).unwrap(), Shape::Str(text));
    }

    #[test]
    fn prop_encoded_ascii_has_no_raw_controls(text in "[\\x00-\\x7f]*") {
        let encoded = Encoder::default().encode(&Shape::Str(text));
        prop_assert!(!encoded.chars().any(|c| (c as u32) < 0x20 || c == '\x7f'));
    }

    #[test]
    fn prop_default_output_is_json(s in shape()) {
        let text = Encoder::default().encode(&s);
        prop_assert!(serde_json::from_str::<serde_json::Value>(&text).is_ok());
    }

    #[test]
    fn prop_pack_unpack(v in value()) {
        let packer = Packer::new();
        prop_assert_eq!(packer.unpack(&packer.pack(&v)).unwrap(), v);
    }

    #[test]
    fn prop_full_round_trip(v in value(), seps in separators()) {
        let serializer = Serializer::new(TextCodec::new(seps));
        let text = serializer.dumps(&v).unwrap();
        prop_assert_eq!(serializer.loads(&text).unwrap(), v);
    }
}
