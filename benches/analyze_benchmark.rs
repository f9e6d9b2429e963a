//! Benchmarks for presentation analysis throughput.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use slideaudit::{analyze_bytes, FontCatalog};
use std::io::{Cursor, Write};

/// Creates a synthetic presentation with the given number of slides.
fn create_test_pptx(slide_count: usize) -> Vec<u8> {
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    let mut buffer = Vec::new();
    let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);

    zip.start_file("[Content_Types].xml", options).unwrap();
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
</Types>"#,
    )
    .unwrap();

    zip.start_file("_rels/.rels", options).unwrap();
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/>
</Relationships>"#,
    )
    .unwrap();

    let mut sld_ids = String::new();
    let mut rels = String::from(
        r#"<Relationship Id="rIdTheme" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="theme/theme1.xml"/>"#,
    );
    for i in 0..slide_count {
        sld_ids.push_str(&format!(
            r#"<p:sldId id="{}" r:id="rId{}"/>"#,
            256 + i,
            i + 2
        ));
        rels.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide{}.xml"/>"#,
            i + 2,
            i + 1
        ));
    }

    zip.start_file("ppt/presentation.xml", options).unwrap();
    zip.write_all(
        format!(
            r#"<?xml version="1.0"?><p:presentation xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><p:sldIdLst>{}</p:sldIdLst></p:presentation>"#,
            sld_ids
        )
        .as_bytes(),
    )
    .unwrap();

    zip.start_file("ppt/_rels/presentation.xml.rels", options)
        .unwrap();
    zip.write_all(
        format!(
            r#"<?xml version="1.0"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{}</Relationships>"#,
            rels
        )
        .as_bytes(),
    )
    .unwrap();

    zip.start_file("ppt/theme/theme1.xml", options).unwrap();
    zip.write_all(
        br#"<?xml version="1.0"?><a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office"><a:themeElements><a:fontScheme name="Office"><a:majorFont><a:latin typeface="Calibri Light"/></a:majorFont><a:minorFont><a:latin typeface="Calibri"/></a:minorFont></a:fontScheme></a:themeElements></a:theme>"#,
    )
    .unwrap();

    for i in 0..slide_count {
        zip.start_file(format!("ppt/slides/slide{}.xml", i + 1), options)
            .unwrap();
        let mut body = String::new();
        for p in 0..10 {
            body.push_str(&format!(
                r#"<a:p><a:r><a:rPr lang="en-US"><a:latin typeface="{}"/></a:rPr><a:t>Paragraph {} on slide {}</a:t></a:r></a:p>"#,
                if p % 2 == 0 { "Arial" } else { "+mn-lt" },
                p,
                i + 1
            ));
        }
        zip.write_all(
            format!(
                r#"<?xml version="1.0"?><p:sld xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main"><p:cSld><p:spTree>{}</p:spTree></p:cSld><p:transition><p:fade/></p:transition></p:sld>"#,
                body
            )
            .as_bytes(),
        )
        .unwrap();
    }

    zip.finish().unwrap();
    buffer
}

fn bench_analyze(c: &mut Criterion) {
    let catalog = FontCatalog::from_names(["Arial", "Calibri", "Calibri Light"]);
    let mut group = c.benchmark_group("analyze");

    for slide_count in [1, 10, 50, 200] {
        let deck = create_test_pptx(slide_count);
        group.throughput(Throughput::Bytes(deck.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(slide_count),
            &deck,
            |b, deck| {
                b.iter(|| analyze_bytes(black_box(deck), &catalog).unwrap());
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_analyze);
criterion_main!(benches);
