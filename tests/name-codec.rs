// Round trips through all the formats of a name.

use domain_name::base::name::{
    CompressionContext, FromWireConfig, Name, NameError, NameRelation,
    NoCompression, ToTextConfig, TreeCompressor,
};
use rstest::rstest;
use std::cmp::Ordering;

fn text(s: &str) -> Name<Vec<u8>> {
    Name::from_text(s, None, false).unwrap()
}

#[test]
fn www_example_com_wire() {
    let name = text("www.example.com.");
    assert_eq!(
        name.as_slice(),
        &[
            0x03, 0x77, 0x77, 0x77, 0x07, 0x65, 0x78, 0x61, 0x6d, 0x70, 0x6c,
            0x65, 0x03, 0x63, 0x6f, 0x6d, 0x00
        ]
    );
    assert_eq!(name.to_string(), "www.example.com.");
}

#[test]
fn relative_with_origin() {
    let origin = text("example.com.");
    let name = Name::from_text("foo", Some(origin.clone_ref()), false)
        .unwrap();
    assert_eq!(name, text("foo.example.com."));
    assert!(name.case_equal(&text("foo.example.com.")));
}

#[test]
fn subdomain_relation() {
    let (relation, order, common) =
        text("a.example.com.").full_compare(&text("example.com."));
    assert_eq!(relation, NameRelation::Subdomain);
    assert_eq!(order, Ordering::Greater);
    assert_eq!(common, 3);
}

#[test]
fn repeated_name_is_compressed() {
    let mut ctx = TreeCompressor::new();
    let mut msg = vec![0u8; 12];
    let name = text("www.example.com.");
    assert_eq!(name.to_wire(&mut ctx, &mut msg), Ok(17));
    assert_eq!(name.to_wire(&mut ctx, &mut msg), Ok(2));
    assert_eq!(&msg[29..], &[0xc0, 0x0c]);

    let config = FromWireConfig::default();
    let (first, len) = Name::from_wire(&msg, 12, &config).unwrap();
    assert_eq!(len, 17);
    let (second, len) = Name::from_wire(&msg, 29, &config).unwrap();
    assert_eq!(len, 2);
    assert!(first.case_equal(&second));
}

#[test]
fn escaped_dot() {
    let name = text("a\\.b.example.com.");
    assert_eq!(name.label_count(), 4);
    assert_eq!(name.label(0).as_slice(), b"a.b");
    assert_eq!(name.to_string(), "a\\.b.example.com.");
}

#[test]
fn root() {
    let name = text(".");
    assert!(name.is_absolute());
    assert!(name.is_root());
    assert_eq!(name.label_count(), 1);
    assert!(name.label(0).is_empty());
    assert_eq!(name.to_string(), ".");
}

#[rstest]
#[case("www.example.com.")]
#[case("example.com")]
#[case(".")]
#[case("@")]
#[case("a\\.b.c\\\\d.")]
#[case("\\000\\255\\032x.")]
#[case("\\\"\\(\\)\\;.")]
#[case("*.example.")]
fn text_round_trip(#[case] input: &str) {
    let name = text(input);
    assert!(name.is_valid());
    assert_eq!(name.to_string(), input);
    assert!(text(&name.to_string()).case_equal(&name));
}

#[rstest]
#[case("\\065\\066c.", "ABc.")]
#[case("\\@\\$.", "@$.")]
#[case("x\\y.", "xy.")]
fn text_canonical_escapes(#[case] input: &str, #[case] output: &str) {
    assert_eq!(text(input).to_string(), output);
}

#[rstest]
#[case("", NameError::UnexpectedEnd)]
#[case("..", NameError::EmptyLabel)]
#[case("a..", NameError::EmptyLabel)]
#[case("\\25x.", NameError::BadEscape)]
#[case("\\300.", NameError::BadEscape)]
#[case("\\[b1].", NameError::BadLabelType)]
#[case("a\\", NameError::UnexpectedEnd)]
fn text_errors(#[case] input: &str, #[case] err: NameError) {
    assert_eq!(Name::from_text(input, None, false), Err(err));
}

#[rstest]
#[case(&["www.example.com.", "mail.example.com.", "example.com."])]
#[case(&["a.b.c.", "x.b.c.", "a.b.c.", "b.c.", "c.", "."])]
#[case(&["WWW.Example.COM.", "www.example.com.", "ftp.EXAMPLE.com."])]
fn wire_round_trip(#[case] names: &[&str]) {
    let names = names.iter().map(|s| text(s)).collect::<Vec<_>>();
    let config = FromWireConfig::default();

    for compress in [false, true] {
        let mut ctx = TreeCompressor::new();
        ctx.set_enabled(compress);
        let mut msg = Vec::new();
        let mut positions = Vec::new();
        for name in &names {
            positions.push(msg.len());
            name.to_wire(&mut ctx, &mut msg).unwrap();
        }
        for (name, pos) in names.iter().zip(positions) {
            let (decoded, _) = Name::from_wire(&msg, pos, &config).unwrap();
            assert!(decoded.is_valid());
            assert_eq!(&decoded, name);
        }
    }
}

#[test]
fn compression_saves_space() {
    let names = ["www.example.com.", "mail.example.com.", "example.com."];
    let mut plain = Vec::new();
    let mut compressed = Vec::new();
    let mut ctx = TreeCompressor::new();
    for name in names.iter().map(|s| text(s)) {
        name.to_wire(&mut NoCompression, &mut plain).unwrap();
        name.to_wire(&mut ctx, &mut compressed).unwrap();
    }
    assert_eq!(plain.len(), 17 + 18 + 13);
    assert_eq!(compressed.len(), 17 + 7 + 2);
}

#[test]
fn pointer_loop_is_rejected() {
    let config = FromWireConfig::default();
    let msg = b"\x03www\xc0\x06\x03com\xc0\x00";
    assert_eq!(
        Name::from_wire(msg, 6, &config),
        Err(NameError::BadPointer)
    );
    assert_eq!(
        Name::from_wire(b"\xc0\x00", 0, &config),
        Err(NameError::BadPointer)
    );
}

#[test]
fn downcase_is_idempotent() {
    let name = Name::from_text("WwW.ExAmPlE.", None, true).unwrap();
    let again = Name::from_text(&name.to_string(), None, true).unwrap();
    assert!(name.case_equal(&again));
    assert_eq!(name.as_slice(), b"\x03www\x07example\0");

    let mut config = FromWireConfig::new();
    config.set_downcase(true);
    let mixed = text("WwW.ExAmPlE.");
    let (decoded, _) = Name::from_wire(mixed.as_slice(), 0, &config).unwrap();
    assert!(decoded.case_equal(&name));
}

#[test]
fn ordering_is_transitive() {
    let mut names = [
        "z.example.",
        "a.example.",
        "example.",
        "\\001.z.example.",
        "Z.a.example.",
        "*.z.example.",
        "zABC.a.EXAMPLE.",
        "yljkjljk.a.example.",
        "\\200.z.example.",
        "a.",
        ".",
    ]
    .iter()
    .map(|s| text(s))
    .collect::<Vec<_>>();
    names.sort();
    for i in 0..names.len() {
        for j in i..names.len() {
            for k in j..names.len() {
                assert_ne!(names[i].compare(&names[j]), Ordering::Greater);
                assert_ne!(names[j].compare(&names[k]), Ordering::Greater);
                assert_ne!(names[i].compare(&names[k]), Ordering::Greater);
            }
        }
    }
    assert!(names[0].is_root());
}

#[test]
fn hash_is_consistent_with_eq() {
    let pairs = [
        ("www.example.com.", "WWW.EXAMPLE.COM."),
        ("a\\.b.", "A\\.B."),
        (".", "."),
    ];
    for (left, right) in pairs {
        let (left, right) = (text(left), text(right));
        assert_eq!(left, right);
        assert_eq!(left.full_hash(false), right.full_hash(false));
        assert_eq!(left.short_hash(false), right.short_hash(false));
    }
}

#[test]
fn text_in_buffer() {
    let name = text("www.example.com.");
    let mut config = ToTextConfig::new();
    config.set_omit_final_dot(true);
    let mut buf = Vec::new();
    assert_eq!(name.to_text_in(&config, None, &mut buf), Ok(15));
    assert_eq!(buf, b"www.example.com");
}

#[test]
fn label_sequences() {
    let name = text("www.example.com.");
    let (prefix, suffix) = name.split(2);
    assert_eq!(prefix.to_string(), "www.example");
    assert_eq!(suffix.to_string(), "com.");
    let joined = prefix.concatenate_vec(&suffix).unwrap();
    assert_eq!(joined, name);
    assert!(name.label_sequence(3, 0).is_empty());
    assert_eq!(
        name.iter_suffixes().map(|s| s.to_string()).collect::<Vec<_>>(),
        ["www.example.com.", "example.com.", "com.", "."]
    );
}

#[test]
fn context_through_reference() {
    let mut ctx = TreeCompressor::new();
    let mut msg = Vec::new();
    {
        let ctx_ref: &mut dyn CompressionContext = &mut ctx;
        text("example.com.").to_wire(ctx_ref, &mut msg).unwrap();
    }
    assert_eq!(text("www.example.com.").to_wire(&mut ctx, &mut msg), Ok(6));
}
