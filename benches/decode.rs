use criterion::{black_box, criterion_group, criterion_main, Criterion};
use imagemeta::decode::decode_entry;
use imagemeta::encoding::resolve_character_set;
use imagemeta::{MetadataEntry, Rational, RawContainer, RawValue, TypeTag};

fn sample_container() -> RawContainer {
    let mut container = RawContainer::default();
    container.push(MetadataEntry::new(
        "Iptc.Envelope.CharacterSet",
        TypeTag::IptcString,
        RawValue::Text(vec![b"\x1b%G".to_vec()]),
    ));
    container.push(MetadataEntry::new(
        "Iptc.Application2.Keywords",
        TypeTag::IptcString,
        RawValue::Text(vec![b"sunset".to_vec()]),
    ));
    container.push(MetadataEntry::new(
        "Exif.Image.Orientation",
        TypeTag::UnsignedShort,
        RawValue::Unsigned(vec![6]),
    ));
    container.push(MetadataEntry::new(
        "Exif.Photo.FNumber",
        TypeTag::UnsignedRational,
        RawValue::Rationals(vec![Rational::new(28, 10)]),
    ));
    container.push(MetadataEntry::new(
        "Iptc.Application2.DateCreated",
        TypeTag::Date,
        RawValue::Text(vec![b"2024-01-15".to_vec()]),
    ));
    container.push(MetadataEntry::new(
        "Xmp.dc.subject",
        TypeTag::XmpBag,
        RawValue::Text(vec![
            b"alps".to_vec(),
            b"snow".to_vec(),
            b"winter".to_vec(),
        ]),
    ));
    container
}

fn bench_decode(c: &mut Criterion) {
    let container = sample_container();

    c.bench_function("resolve character set", |b| {
        b.iter(|| resolve_character_set(black_box(&container)))
    });

    c.bench_function("decode pass", |b| {
        b.iter(|| {
            let charset = resolve_character_set(black_box(&container));
            container
                .iter()
                .filter_map(|entry| decode_entry(entry, charset).ok().flatten())
                .count()
        })
    });
}

criterion_group!(benches, bench_decode);
criterion_main!(benches);
