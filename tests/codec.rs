//! Persistence round trips through files and in-memory buffers.

mod test_utils;

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};

use anyhow::Result;
use pretty_assertions::assert_eq;
use tabfn::codec::{binary, json, snapshot, text};
use tabfn::{
    ArrayTabulatedFunctionFactory, BackendKind, CodecError, LinkedListTabulatedFunctionFactory, MathFunction,
    Policy, TabulatedFunction, TabulatedFunctionFactory,
};
use test_utils::{BACKENDS, init_logging};

fn create_irregular(kind: BackendKind) -> Box<dyn TabulatedFunction> {
    kind.factory()
        .create(
            vec![-3.5, -0.1, 0.0, 1.0 / 3.0, 2.0, 1e6],
            vec![0.25, -7.0, 1e-300, std::f64::consts::E, -0.0, 42.0],
        )
        .expect("valid samples")
}

fn assert_bit_identical(a: &dyn TabulatedFunction, b: &dyn TabulatedFunction) {
    assert_eq!(a.count(), b.count());
    for (pa, pb) in a.points().zip(b.points()) {
        assert_eq!(pa.x.to_bits(), pb.x.to_bits());
        assert_eq!(pa.y.to_bits(), pb.y.to_bits());
    }
}

#[test]
fn test_text_file_round_trip() -> Result<()> {
    init_logging();
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("function.txt");

    let original = create_irregular(BackendKind::LinkedList);
    text::write_text(original.as_ref(), BufWriter::new(File::create(&path)?))?;

    let restored = text::read_text(BufReader::new(File::open(&path)?), &ArrayTabulatedFunctionFactory)?;
    assert_eq!(restored.kind(), BackendKind::Array);
    assert_bit_identical(original.as_ref(), restored.as_ref());
    Ok(())
}

#[test]
fn test_binary_file_round_trip() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("function.bin");

    for kind in BACKENDS {
        let original = create_irregular(kind);
        binary::write_binary(original.as_ref(), File::create(&path)?)?;

        let bytes = std::fs::read(&path)?;
        assert_eq!(bytes.len(), 4 + 16 * original.count());
        assert_eq!(bytes, binary::to_bytes(original.as_ref())?);

        let restored = binary::read_binary(File::open(&path)?, kind.factory().as_ref())?;
        assert_eq!(restored.kind(), kind);
        assert_bit_identical(original.as_ref(), restored.as_ref());
    }
    Ok(())
}

#[test]
fn test_binary_is_identical_across_backends() -> Result<()> {
    let array = binary::to_bytes(create_irregular(BackendKind::Array).as_ref())?;
    let list = binary::to_bytes(create_irregular(BackendKind::LinkedList).as_ref())?;
    assert_eq!(array, list);
    Ok(())
}

#[cfg(feature = "xml")]
#[test]
fn test_xml_file_round_trip() -> Result<()> {
    use tabfn::codec::xml;

    let mut file = tempfile::NamedTempFile::new()?;
    let original = create_irregular(BackendKind::Array);
    xml::write_xml(original.as_ref(), file.as_file_mut())?;
    file.as_file_mut().flush()?;

    let restored = xml::read_xml(BufReader::new(file.reopen()?), &LinkedListTabulatedFunctionFactory)?;
    assert_bit_identical(original.as_ref(), restored.as_ref());
    Ok(())
}

#[test]
fn test_json_round_trip() -> Result<()> {
    let original = create_irregular(BackendKind::LinkedList);
    let mut buf = Vec::new();
    json::write_json(original.as_ref(), &mut buf)?;

    let restored = json::read_json(buf.as_slice(), &LinkedListTabulatedFunctionFactory)?;
    assert_bit_identical(original.as_ref(), restored.as_ref());
    Ok(())
}

#[test]
fn test_snapshot_reproduces_structure() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("function.json");

    for kind in BACKENDS {
        let factory = kind.factory();
        let originals = [
            factory.create(vec![0.0, 1.0], vec![1.0, 2.0])?,
            factory.create_strict(vec![0.0, 1.0], vec![1.0, 2.0])?,
            factory.create_unmodifiable(vec![0.0, 1.0], vec![1.0, 2.0])?,
            factory.create_strict_unmodifiable(vec![0.0, 1.0], vec![1.0, 2.0])?,
        ];
        for original in originals {
            snapshot::write_snapshot(original.as_ref(), File::create(&path)?)?;
            let restored = snapshot::read_snapshot(File::open(&path)?)?;

            assert_eq!(restored.kind(), kind);
            assert_eq!(restored.policies(), original.policies());
            assert_eq!(restored.to_points(), original.to_points());
        }
    }
    Ok(())
}

#[test]
fn test_snapshot_is_not_binary_compatible() {
    let f = create_irregular(BackendKind::Array);
    let bytes = binary::to_bytes(f.as_ref()).expect("encodes");
    assert!(snapshot::read_snapshot(bytes.as_slice()).is_err());
}

#[test]
fn test_malformed_inputs_are_recoverable() {
    let factory = ArrayTabulatedFunctionFactory;

    let err = text::read_text("2\n0 0\n1 oops\n".as_bytes(), &factory).unwrap_err();
    assert!(err.to_string().contains("at line 3"), "{}", err);

    let err = binary::read_binary([0u8, 0, 0, 5, 1, 2].as_slice(), &factory).unwrap_err();
    assert!(matches!(err, CodecError::Format { .. }));

    let err = json::read_json("[1, 2]".as_bytes(), &factory).unwrap_err();
    assert!(matches!(err, CodecError::Json(_)));

    let snapshot = r#"{"format_version": 1, "backend": "array", "policies": ["sealed"], "points": []}"#;
    let err = snapshot::read_snapshot(snapshot.as_bytes()).unwrap_err();
    assert!(matches!(err, CodecError::ClassResolution(ref name) if name == "sealed"));
}

#[test]
fn test_policies_survive_snapshot_behaviour() -> Result<()> {
    let original = LinkedListTabulatedFunctionFactory.create_strict(vec![0.0, 2.0], vec![0.0, 4.0])?;
    let mut buf = Vec::new();
    snapshot::write_snapshot(original.as_ref(), &mut buf)?;

    let mut restored = snapshot::read_snapshot(buf.as_slice())?;
    assert_eq!(restored.policies(), vec![Policy::Strict]);
    assert!(restored.apply(1.0).is_err());
    restored.insert(1.0, 2.0)?;
    assert_eq!(restored.apply(1.0)?, 2.0);
    Ok(())
}
