use std::io::{Cursor, Read};

use crate::{
    error::{Error, ErrorKind, Result},
    from_bytes, from_bytes_with_opts, from_reader, to_bytes,
    test::builder::Builder,
    Compound, DeOpts, List, StringEncoding, Tag, Value,
};

/// Decode through both entry points, check they agree, and unwrap the root
/// compound.
fn from_all(payload: &[u8]) -> Compound {
    let v_bytes = from_bytes(payload).unwrap();
    let v_read = from_reader(Cursor::new(payload)).unwrap();
    assert_eq!(v_bytes, v_read);

    let (_, root) = v_bytes.into_compound().unwrap().into_iter().next().unwrap();
    root.into_compound().unwrap()
}

fn kind_of(payload: &[u8]) -> ErrorKind {
    from_bytes(payload).unwrap_err().kind().clone()
}

#[test]
fn error_impls_sync_send() {
    fn i<T: Clone + Send + Sync + std::error::Error>(_: T) {}
    i(Error::invalid_tag(1));
}

#[test]
fn tree_impls_sync_send() {
    fn i<T: Clone + Send + Sync>() {}
    i::<Value>();
    i::<List>();
    i::<Compound>();
}

#[test]
fn descriptive_error_on_gzip_magic() {
    let r = from_bytes(&[0x1f, 0x8b]);
    assert!(matches!(r, Result::Err(_)));
    let e = r.unwrap_err();
    assert!(e.to_string().to_lowercase().contains("gzip"));
    assert_eq!(e.kind(), &ErrorKind::InvalidTag(0x1f));
}

#[test]
fn descriptive_error_on_zlib_magic() {
    for second in [0x01, 0x9c, 0xda] {
        let e = from_bytes(&[0x78, second]).unwrap_err();
        assert!(e.to_string().to_lowercase().contains("zlib"));
        assert_eq!(e.kind(), &ErrorKind::InvalidTag(0x78));
    }
}

#[test]
fn compression_needs_both_magic_bytes() {
    let inputs: [&[u8]; 4] = [&[0x1f, 0x00], &[0x1f], &[0x78, 0x8b], &[0x78]];
    for input in inputs {
        let e = from_bytes(input).unwrap_err();
        let msg = e.to_string().to_lowercase();
        assert!(!msg.contains("gzip") && !msg.contains("zlib"), "{}", msg);
        assert_eq!(e.kind(), &ErrorKind::InvalidTag(input[0]));
    }
}

#[test]
fn empty_input_is_eof() {
    assert!(from_bytes(&[]).unwrap_err().is_eof());
}

#[test]
fn root_name_is_wrapper_key() {
    let payload = Builder::new()
        .start_compound("hello world")
        .end_compound()
        .build();

    let v = from_bytes(&payload).unwrap();
    let wrapper = v.as_compound().unwrap();
    assert_eq!(wrapper.len(), 1);
    assert!(wrapper.get_as::<Compound>("hello world").unwrap().is_empty());
}

#[test]
fn simple_scalars() {
    let payload = Builder::new()
        .start_compound("object")
        .byte("b", -123)
        .short("s", 1000)
        .int("i", i32::MIN)
        .long("l", i64::MAX)
        .float("f", 1.23)
        .double("d", 2.34)
        .string("str", "hello")
        .end_compound()
        .build();

    let v = from_all(&payload);

    assert_eq!(v.get("b"), Some(&Value::Byte(-123)));
    assert_eq!(v.get("s"), Some(&Value::Short(1000)));
    assert_eq!(v.get("i"), Some(&Value::Int(i32::MIN)));
    assert_eq!(v.get("l"), Some(&Value::Long(i64::MAX)));
    assert_eq!(v["f"].as_float().unwrap(), 1.23);
    assert_eq!(v["d"].as_double().unwrap(), 2.34);
    assert_eq!(v["str"].as_str().unwrap(), "hello");
}

#[test]
fn arrays() {
    let payload = Builder::new()
        .start_compound("")
        .byte_array("bytes", &[1, -2, 3])
        .int_array("ints", &[1, 2, i32::MAX])
        .long_array("longs", &[i64::MIN, 0])
        .int_array("empty", &[])
        .end_compound()
        .build();

    let v = from_all(&payload);

    assert_eq!(v["bytes"].as_byte_array().unwrap(), &[1, -2, 3]);
    assert_eq!(v["ints"].as_int_array().unwrap(), &[1, 2, i32::MAX]);
    assert_eq!(v["longs"].as_long_array().unwrap(), &[i64::MIN, 0]);
    assert!(v["empty"].as_int_array().unwrap().is_empty());
}

#[test]
fn compound_keeps_wire_order() {
    let payload = Builder::new()
        .start_compound("")
        .int("zebra", 1)
        .int("apple", 2)
        .int("mango", 3)
        .end_compound()
        .build();

    let v = from_all(&payload);
    let keys: Vec<&str> = v.keys().collect();
    assert_eq!(keys, ["zebra", "apple", "mango"]);
}

#[test]
fn nested_compound() {
    let payload = Builder::new()
        .start_compound("")
        .start_compound("inner")
        .start_compound("deeper")
        .string("name", "Hampus")
        .end_compound()
        .end_compound()
        .byte("after", 1)
        .end_compound()
        .build();

    let v = from_all(&payload);
    let deeper = v
        .get_as::<Compound>("inner")
        .unwrap()
        .get_as::<Compound>("deeper")
        .unwrap();
    assert_eq!(deeper.get_as::<String>("name").unwrap(), "Hampus");
    assert_eq!(v["after"], Value::Byte(1));
}

#[test]
fn list_of_compounds() {
    let payload = Builder::new()
        .start_compound("")
        .start_list("list", Tag::Compound, 2)
        .start_anon_compound()
        .string("name", "first")
        .long("created-on", 1)
        .end_compound()
        .start_anon_compound()
        .string("name", "second")
        .long("created-on", 2)
        .end_compound()
        .end_compound()
        .build();

    let v = from_all(&payload);
    let list = v.get_as::<List>("list").unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list.element_tag(), Tag::Compound);

    let created: Vec<i64> = list
        .iter_as::<Compound>()
        .unwrap()
        .map(|c| *c.get_as::<i64>("created-on").unwrap())
        .collect();
    assert_eq!(created, [1, 2]);
}

#[test]
fn list_of_lists() {
    let payload = Builder::new()
        .start_compound("")
        .start_list("outer", Tag::List, 2)
        .start_anon_list(Tag::Int, 1)
        .int_payload(7)
        .start_anon_list(Tag::String, 1)
        .string_payload("x")
        .end_compound()
        .build();

    let v = from_all(&payload);
    let outer = v.get_as::<List>("outer").unwrap();
    assert_eq!(outer.get_as::<List>(0).unwrap().element_tag(), Tag::Int);
    assert_eq!(outer.get_as::<List>(1).unwrap().element_tag(), Tag::String);
}

#[test]
fn empty_list_of_end_valid() {
    let payload = Builder::new()
        .start_compound("")
        .start_list("list", Tag::End, 0)
        .end_compound()
        .build();

    let v = from_all(&payload);
    let list = v.get_as::<List>("list").unwrap();
    assert!(list.is_empty());
    assert_eq!(list.element_tag(), Tag::End);
}

#[test]
fn empty_list_keeps_declared_tag() {
    let payload = Builder::new()
        .start_compound("")
        .start_list("list", Tag::Int, 0)
        .end_compound()
        .build();

    let v = from_all(&payload);
    let list = v.get_as::<List>("list").unwrap();
    assert!(list.is_empty());
    assert_eq!(list.element_tag(), Tag::Int);
}

#[test]
fn nonempty_list_of_end_invalid() {
    let payload = Builder::new()
        .start_compound("")
        .start_list("list", Tag::End, 1)
        .tag(Tag::End)
        .end_compound()
        .build();

    assert_eq!(kind_of(&payload), ErrorKind::InvalidListType(Tag::End));
}

#[test]
fn negative_lengths_rejected() {
    let list = Builder::new()
        .start_compound("")
        .start_list("list", Tag::Byte, -1)
        .end_compound()
        .build();
    assert_eq!(kind_of(&list), ErrorKind::NegativeLength(-1));

    for tag in [Tag::ByteArray, Tag::IntArray, Tag::LongArray] {
        let array = Builder::new()
            .start_compound("")
            .tag(tag)
            .name("arr")
            .int_payload(i32::MIN)
            .end_compound()
            .build();
        assert_eq!(kind_of(&array), ErrorKind::NegativeLength(i32::MIN));
    }
}

#[test]
fn max_length_string_accepted() {
    let long = "a".repeat(u16::MAX as usize);
    let payload = Builder::new()
        .start_compound("")
        .string("s", &long)
        .end_compound()
        .build();

    let v = from_all(&payload);
    assert_eq!(v["s"].as_str().unwrap().len(), 0xFFFF);
}

#[test]
fn invalid_tag_in_compound() {
    let payload = Builder::new()
        .start_compound("")
        .raw_bytes(&[13])
        .name("bad")
        .end_compound()
        .build();

    assert_eq!(kind_of(&payload), ErrorKind::InvalidTag(13));
}

#[test]
fn invalid_tag_in_list() {
    let payload = Builder::new()
        .start_compound("")
        .tag(Tag::List)
        .name("list")
        .raw_bytes(&[200])
        .int_payload(1)
        .end_compound()
        .build();

    assert_eq!(kind_of(&payload), ErrorKind::InvalidTag(200));
}

#[test]
fn root_must_be_compound() {
    let payload = Builder::new().int("", 1).build();
    assert_eq!(kind_of(&payload), ErrorKind::NoRootCompound);

    assert_eq!(kind_of(&[0xff]), ErrorKind::InvalidTag(0xff));
}

#[test]
fn truncated_input_is_eof() {
    let payload = Builder::new()
        .start_compound("root")
        .short("s", 1)
        .string("str", "text")
        .int_array("ints", &[1, 2])
        .start_list("list", Tag::Long, 1)
        .long_payload(3)
        .end_compound()
        .build();

    assert!(from_bytes(&payload).is_ok());
    for end in 0..payload.len() {
        let e = from_bytes(&payload[..end]).unwrap_err();
        assert!(e.is_eof(), "prefix of {} bytes gave {:?}", end, e);
    }
}

#[test]
fn huge_declared_lengths_do_not_allocate() {
    for tag in [Tag::ByteArray, Tag::IntArray, Tag::LongArray] {
        let payload = Builder::new()
            .start_compound("")
            .tag(tag)
            .name("arr")
            .int_payload(i32::MAX)
            .build();
        assert!(from_bytes(&payload).unwrap_err().is_eof());
    }

    let payload = Builder::new()
        .start_compound("")
        .start_list("list", Tag::Long, i32::MAX)
        .build();
    assert!(from_bytes(&payload).unwrap_err().is_eof());
}

#[test]
fn long_list_invalid_with_option() {
    let payload = Builder::new()
        .start_compound("")
        .start_list("list", Tag::Byte, 100)
        .byte_array_payload(&[0; 100])
        .end_compound()
        .build();

    assert!(from_bytes(&payload).is_ok());

    let opts = DeOpts::new().max_seq_len(10);
    let e = from_bytes_with_opts(&payload, opts).unwrap_err();
    assert_eq!(e.kind(), &ErrorKind::SeqTooLong(100));
}

#[test]
fn depth_limit() {
    // compound, list, list, list: four levels.
    let payload = Builder::new()
        .start_compound("")
        .start_list("l", Tag::List, 1)
        .start_anon_list(Tag::List, 1)
        .start_anon_list(Tag::Int, 0)
        .end_compound()
        .build();

    assert!(from_bytes_with_opts(&payload, DeOpts::new().max_depth(4)).is_ok());

    let e = from_bytes_with_opts(&payload, DeOpts::new().max_depth(3)).unwrap_err();
    assert_eq!(e.kind(), &ErrorKind::TooDeep(3));
}

/// A root compound with lists nested under it, `depth` levels in all.
fn nested_lists(depth: usize) -> Vec<u8> {
    let mut builder = Builder::new()
        .start_compound("")
        .start_list("l", Tag::List, 1);
    for _ in 3..depth {
        builder = builder.start_anon_list(Tag::List, 1);
    }
    builder.start_anon_list(Tag::Int, 0).end_compound().build()
}

#[test]
fn default_depth_limit_allows_512_levels() -> Result<()> {
    let payload = nested_lists(512);
    let v = from_bytes(&payload)?;
    assert_eq!(to_bytes(&v)?, payload);
    Ok(())
}

#[test]
fn default_depth_limit_stops_deep_nesting() {
    let e = from_bytes(&nested_lists(513)).unwrap_err();
    assert_eq!(e.kind(), &ErrorKind::TooDeep(512));

    let mut builder = Builder::new()
        .start_compound("")
        .start_list("l", Tag::List, 1);
    for _ in 0..1000 {
        builder = builder.start_anon_list(Tag::List, 1);
    }
    let e = from_bytes(&builder.build()).unwrap_err();
    assert_eq!(e.kind(), &ErrorKind::TooDeep(512));
}

#[test]
fn unlimited_depth_does_not_use_the_stack() {
    let mut builder = Builder::new()
        .start_compound("")
        .start_list("l", Tag::List, 1);
    for _ in 0..100_000 {
        builder = builder.start_anon_list(Tag::List, 1);
    }
    let payload = builder.build();

    let opts = DeOpts::new().max_depth(usize::MAX);
    let e = from_bytes_with_opts(&payload, opts).unwrap_err();
    assert!(e.is_eof());
}

#[test]
fn invalid_utf8_is_error() {
    let payload = Builder::new()
        .start_compound("")
        .tag(Tag::String)
        .name("s")
        .raw_str_len(2)
        .raw_bytes(&[0xc3, 0x28])
        .end_compound()
        .build();

    assert_eq!(kind_of(&payload), ErrorKind::Nonunicode(vec![0xc3, 0x28]));
}

#[test]
fn cesu8_strings_when_asked() {
    // Java writes NUL as two bytes and astral characters as surrogate pairs.
    let java = cesu8::to_java_cesu8("a\0b😀");
    let payload = Builder::new()
        .start_compound("")
        .tag(Tag::String)
        .name("s")
        .raw_str_len(java.len())
        .raw_bytes(&java)
        .end_compound()
        .build();

    assert!(matches!(kind_of(&payload), ErrorKind::Nonunicode(_)));

    let opts = DeOpts::new().string_encoding(StringEncoding::Cesu8);
    let v = from_bytes_with_opts(&payload, opts).unwrap();
    let root = v.as_compound().unwrap().get_as::<Compound>("").unwrap();
    assert_eq!(root.get_as::<String>("s").unwrap(), "a\0b😀");
}

#[test]
fn duplicate_keys_later_wins_in_place() {
    let payload = Builder::new()
        .start_compound("")
        .int("a", 1)
        .int("b", 2)
        .string("a", "replaced")
        .end_compound()
        .build();

    let v = from_all(&payload);
    assert_eq!(v.len(), 2);
    let keys: Vec<&str> = v.keys().collect();
    assert_eq!(keys, ["a", "b"]);
    assert_eq!(v["a"].as_str().unwrap(), "replaced");
}

#[test]
fn trailing_bytes_left_in_reader() {
    let payload = Builder::new()
        .start_compound("")
        .byte("a", 1)
        .end_compound()
        .raw_bytes(&[1, 2, 3])
        .build();

    let mut cursor = Cursor::new(&payload);
    from_reader(&mut cursor).unwrap();

    let mut rest = vec![];
    cursor.read_to_end(&mut rest).unwrap();
    assert_eq!(rest, [1, 2, 3]);
}

#[test]
fn type_mismatch_reports_both_tags() -> Result<()> {
    let payload = Builder::new()
        .start_compound("")
        .short("s", 1)
        .end_compound()
        .build();

    let v = from_all(&payload);
    let e = v.get_as::<i32>("s").unwrap_err();
    assert_eq!(
        e.kind(),
        &ErrorKind::TypeMismatch {
            expected: Tag::Int,
            found: Tag::Short
        }
    );
    assert_eq!(*v.get_as::<i16>("s")?, 1);
    Ok(())
}
