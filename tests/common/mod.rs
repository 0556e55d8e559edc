//! Shared fixtures: programmatically built PDFs and office containers.

#![allow(dead_code)]

use std::io::Write;

use lopdf::{dictionary, Document, Object, Stream};

/// A fillable one-page PDF with a text field `name`, a checkbox `subscribe`,
/// and a radio group `color` with options Red and Green.
pub fn fillable_form_pdf() -> Vec<u8> {
    let mut doc = Document::with_version("1.5");

    let pages_id = doc.new_object_id();
    let page_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => Object::Name(b"Font".to_vec()),
        "Subtype" => Object::Name(b"Type1".to_vec()),
        "BaseFont" => Object::Name(b"Helvetica".to_vec()),
        "Encoding" => Object::Name(b"WinAnsiEncoding".to_vec()),
    });

    let blank_ap = |doc: &mut Document| {
        doc.add_object(Object::Stream(Stream::new(
            dictionary! {
                "Type" => Object::Name(b"XObject".to_vec()),
                "Subtype" => Object::Name(b"Form".to_vec()),
                "BBox" => Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(15),
                    Object::Integer(15),
                ]),
            },
            Vec::new(),
        )))
    };

    // Text field, merged with its widget annotation.
    let name_field = doc.add_object(dictionary! {
        "Type" => Object::Name(b"Annot".to_vec()),
        "Subtype" => Object::Name(b"Widget".to_vec()),
        "FT" => Object::Name(b"Tx".to_vec()),
        "T" => Object::string_literal("name"),
        "Rect" => Object::Array(vec![
            Object::Integer(100),
            Object::Integer(600),
            Object::Integer(300),
            Object::Integer(620),
        ]),
        "P" => Object::Reference(page_id),
    });

    // Checkbox with a "Yes" on-state.
    let check_on = blank_ap(&mut doc);
    let check_off = blank_ap(&mut doc);
    let subscribe_field = doc.add_object(dictionary! {
        "Type" => Object::Name(b"Annot".to_vec()),
        "Subtype" => Object::Name(b"Widget".to_vec()),
        "FT" => Object::Name(b"Btn".to_vec()),
        "T" => Object::string_literal("subscribe"),
        "V" => Object::Name(b"Off".to_vec()),
        "Rect" => Object::Array(vec![
            Object::Integer(100),
            Object::Integer(560),
            Object::Integer(115),
            Object::Integer(575),
        ]),
        "AP" => dictionary! {
            "N" => dictionary! {
                "Yes" => Object::Reference(check_on),
                "Off" => Object::Reference(check_off),
            },
        },
        "P" => Object::Reference(page_id),
    });

    // Radio group: parent field with two widget kids.
    let color_field_id = doc.new_object_id();
    let mut kid_ids = Vec::new();
    for (state, y) in [(&b"Red"[..], 520), (&b"Green"[..], 490)] {
        let on = blank_ap(&mut doc);
        let off = blank_ap(&mut doc);
        let kid = doc.add_object(dictionary! {
            "Type" => Object::Name(b"Annot".to_vec()),
            "Subtype" => Object::Name(b"Widget".to_vec()),
            "Parent" => Object::Reference(color_field_id),
            "AS" => Object::Name(b"Off".to_vec()),
            "Rect" => Object::Array(vec![
                Object::Integer(100),
                Object::Integer(y),
                Object::Integer(115),
                Object::Integer(y + 15),
            ]),
            "AP" => dictionary! {
                "N" => dictionary! {
                    state => Object::Reference(on),
                    "Off" => Object::Reference(off),
                },
            },
            "P" => Object::Reference(page_id),
        });
        kid_ids.push(kid);
    }
    doc.objects.insert(
        color_field_id,
        Object::Dictionary(dictionary! {
            "FT" => Object::Name(b"Btn".to_vec()),
            "T" => Object::string_literal("color"),
            "Ff" => Object::Integer(1 << 15),
            "V" => Object::Name(b"Off".to_vec()),
            "Kids" => Object::Array(kid_ids.iter().map(|id| Object::Reference(*id)).collect()),
        }),
    );

    let mut annots: Vec<Object> = vec![
        Object::Reference(name_field),
        Object::Reference(subscribe_field),
    ];
    annots.extend(kid_ids.iter().map(|id| Object::Reference(*id)));

    doc.objects.insert(
        page_id,
        Object::Dictionary(dictionary! {
            "Type" => Object::Name(b"Page".to_vec()),
            "Parent" => Object::Reference(pages_id),
            "MediaBox" => Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(612),
                Object::Integer(792),
            ]),
            "Annots" => Object::Array(annots),
            "Resources" => dictionary! {
                "Font" => dictionary! { "Helv" => Object::Reference(font_id) },
            },
        }),
    );
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => Object::Name(b"Pages".to_vec()),
            "Kids" => Object::Array(vec![Object::Reference(page_id)]),
            "Count" => Object::Integer(1),
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => Object::Name(b"Catalog".to_vec()),
        "Pages" => Object::Reference(pages_id),
        "AcroForm" => dictionary! {
            "Fields" => Object::Array(vec![
                Object::Reference(name_field),
                Object::Reference(subscribe_field),
                Object::Reference(color_field_id),
            ]),
            "DA" => Object::string_literal("/Helv 0 Tf 0 g"),
        },
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    save(doc)
}

/// A plain one-page PDF whose text layer contains `text`.
pub fn text_layer_pdf(text: &str) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");

    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => Object::Name(b"Font".to_vec()),
        "Subtype" => Object::Name(b"Type1".to_vec()),
        "BaseFont" => Object::Name(b"Helvetica".to_vec()),
        "Encoding" => Object::Name(b"WinAnsiEncoding".to_vec()),
    });

    let escaped = text.replace('\\', "\\\\").replace('(', "\\(").replace(')', "\\)");
    let content = format!("BT\n/F1 12 Tf\n72 700 Td\n({escaped}) Tj\nET");
    let content_id = doc.add_object(Object::Stream(Stream::new(
        dictionary! {},
        content.into_bytes(),
    )));

    let page_id = doc.add_object(dictionary! {
        "Type" => Object::Name(b"Page".to_vec()),
        "Parent" => Object::Reference(pages_id),
        "MediaBox" => Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(612),
            Object::Integer(792),
        ]),
        "Contents" => Object::Reference(content_id),
        "Resources" => dictionary! {
            "Font" => dictionary! { "F1" => Object::Reference(font_id) },
        },
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => Object::Name(b"Pages".to_vec()),
            "Kids" => Object::Array(vec![Object::Reference(page_id)]),
            "Count" => Object::Integer(1),
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => Object::Name(b"Catalog".to_vec()),
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    save(doc)
}

/// A one-page PDF with no content stream at all (a stand-in for a scan).
pub fn empty_page_pdf() -> Vec<u8> {
    let mut doc = Document::with_version("1.5");

    let pages_id = doc.new_object_id();
    let page_id = doc.add_object(dictionary! {
        "Type" => Object::Name(b"Page".to_vec()),
        "Parent" => Object::Reference(pages_id),
        "MediaBox" => Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(612),
            Object::Integer(792),
        ]),
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => Object::Name(b"Pages".to_vec()),
            "Kids" => Object::Array(vec![Object::Reference(page_id)]),
            "Count" => Object::Integer(1),
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => Object::Name(b"Catalog".to_vec()),
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    save(doc)
}

/// A minimal OOXML Word container holding the given paragraphs.
pub fn docx_bytes(paragraphs: &[&str]) -> Vec<u8> {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t>{p}</w:t></w:r></w:p>"))
        .collect();
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
    );

    let mut cursor = std::io::Cursor::new(Vec::new());
    {
        let mut writer = zip::ZipWriter::new(&mut cursor);
        let options = zip::write::SimpleFileOptions::default();
        writer.start_file("word/document.xml", options).unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        writer.finish().unwrap();
    }
    cursor.into_inner()
}

fn save(mut doc: Document) -> Vec<u8> {
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}
