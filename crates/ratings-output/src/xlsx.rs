//! Minimal single-sheet XLSX workbooks.
//!
//! The workbook is an OOXML zip package with one worksheet named `Ratings`.
//! Text cells are written as inline strings so no shared-string table is
//! needed; the rating column is numeric when a rating is present. Characters
//! XML cannot carry use the OOXML `_xHHHH_` escape, so text reads back
//! unchanged.

use std::borrow::Cow;
use std::io::{Cursor, Read, Write};

use chrono::{SecondsFormat, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use ratings_model::Column;

use crate::document::ExportRow;
use crate::error::{ExportError, Result};
use crate::format::ExportFormat;

pub(crate) const SHEET_NAME: &str = "Ratings";
const SHEET_PATH: &str = "xl/worksheets/sheet1.xml";

const NS_MAIN: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const NS_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_PKG_REL: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const NS_CONTENT_TYPES: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_CORE_PROPERTIES: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
const REL_WORKSHEET: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet";

const COLUMN_LETTERS: [&str; 5] = ["A", "B", "C", "D", "E"];

type XmlWriter = Writer<Vec<u8>>;

fn encode_err(err: impl std::fmt::Display) -> ExportError {
    ExportError::encode(ExportFormat::Xlsx, err)
}

fn import_err(err: impl std::fmt::Display) -> ExportError {
    ExportError::import(ExportFormat::Xlsx, err)
}

/// Characters written as `_xHHHH_`. Tab and newline stay literal; `\r`
/// is escaped so readers cannot fold it into a line break.
fn needs_escape(c: char) -> bool {
    (c < ' ' && c != '\t' && c != '\n') || c == '\u{FFFE}' || c == '\u{FFFF}'
}

/// Apply the OOXML string escape. A literal `_x` becomes `_x005F_x` so it
/// is not mistaken for an escape when read back.
fn encode_cell_text(value: &str) -> Cow<'_, str> {
    if !value.contains("_x") && !value.chars().any(needs_escape) {
        return Cow::Borrowed(value);
    }
    let mut out = String::with_capacity(value.len() + 8);
    for (index, c) in value.char_indices() {
        if c == '_' && value[index + 1..].starts_with('x') {
            out.push_str("_x005F_");
        } else if needs_escape(c) {
            out.push_str(&format!("_x{:04X}_", u32::from(c)));
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}

/// Reverse [`encode_cell_text`]. Anything that is not a well-formed
/// `_xHHHH_` sequence is kept as written.
fn decode_cell_text(value: &str) -> Cow<'_, str> {
    if !value.contains("_x") {
        return Cow::Borrowed(value);
    }
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(start) = rest.find("_x") {
        out.push_str(&rest[..start]);
        let candidate = &rest[start..];
        let decoded = candidate
            .get(2..6)
            .filter(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
            .filter(|_| candidate.as_bytes().get(6) == Some(&b'_'))
            .and_then(|hex| u32::from_str_radix(hex, 16).ok())
            .and_then(char::from_u32);
        match decoded {
            Some(c) => {
                out.push(c);
                rest = &candidate[7..];
            }
            None => {
                out.push_str("_x");
                rest = &candidate[2..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

fn xml_part(build: impl FnOnce(&mut XmlWriter) -> std::io::Result<()>) -> Result<Vec<u8>> {
    let mut xml = Writer::new(Vec::new());
    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
        .map_err(encode_err)?;
    build(&mut xml).map_err(encode_err)?;
    Ok(xml.into_inner())
}

fn empty_element(
    xml: &mut XmlWriter,
    name: &str,
    attrs: &[(&str, &str)],
) -> std::io::Result<()> {
    let mut element = BytesStart::new(name);
    for &attr in attrs {
        element.push_attribute(attr);
    }
    xml.write_event(Event::Empty(element))
}

fn text_element(
    xml: &mut XmlWriter,
    start: BytesStart<'_>,
    text: &str,
) -> std::io::Result<()> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    xml.write_event(Event::Start(start))?;
    xml.write_event(Event::Text(BytesText::new(text)))?;
    xml.write_event(Event::End(BytesEnd::new(name)))
}

fn content_types() -> Result<Vec<u8>> {
    xml_part(|xml| {
        let mut root = BytesStart::new("Types");
        root.push_attribute(("xmlns", NS_CONTENT_TYPES));
        xml.write_event(Event::Start(root))?;
        empty_element(
            xml,
            "Default",
            &[
                ("Extension", "rels"),
                ("ContentType", "application/vnd.openxmlformats-package.relationships+xml"),
            ],
        )?;
        empty_element(
            xml,
            "Default",
            &[("Extension", "xml"), ("ContentType", "application/xml")],
        )?;
        empty_element(
            xml,
            "Override",
            &[
                ("PartName", "/xl/workbook.xml"),
                (
                    "ContentType",
                    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml",
                ),
            ],
        )?;
        empty_element(
            xml,
            "Override",
            &[
                ("PartName", "/xl/worksheets/sheet1.xml"),
                (
                    "ContentType",
                    "application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml",
                ),
            ],
        )?;
        empty_element(
            xml,
            "Override",
            &[
                ("PartName", "/docProps/core.xml"),
                ("ContentType", "application/vnd.openxmlformats-package.core-properties+xml"),
            ],
        )?;
        xml.write_event(Event::End(BytesEnd::new("Types")))
    })
}

fn package_rels() -> Result<Vec<u8>> {
    xml_part(|xml| {
        let mut root = BytesStart::new("Relationships");
        root.push_attribute(("xmlns", NS_PKG_REL));
        xml.write_event(Event::Start(root))?;
        empty_element(
            xml,
            "Relationship",
            &[("Id", "rId1"), ("Type", REL_OFFICE_DOCUMENT), ("Target", "xl/workbook.xml")],
        )?;
        empty_element(
            xml,
            "Relationship",
            &[("Id", "rId2"), ("Type", REL_CORE_PROPERTIES), ("Target", "docProps/core.xml")],
        )?;
        xml.write_event(Event::End(BytesEnd::new("Relationships")))
    })
}

fn core_properties(created: &str) -> Result<Vec<u8>> {
    xml_part(|xml| {
        let mut root = BytesStart::new("cp:coreProperties");
        root.push_attribute((
            "xmlns:cp",
            "http://schemas.openxmlformats.org/package/2006/metadata/core-properties",
        ));
        root.push_attribute(("xmlns:dc", "http://purl.org/dc/elements/1.1/"));
        root.push_attribute(("xmlns:dcterms", "http://purl.org/dc/terms/"));
        root.push_attribute(("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"));
        xml.write_event(Event::Start(root))?;
        text_element(xml, BytesStart::new("dc:title"), "Disability Ratings")?;
        for name in ["dcterms:created", "dcterms:modified"] {
            let mut stamp = BytesStart::new(name);
            stamp.push_attribute(("xsi:type", "dcterms:W3CDTF"));
            text_element(xml, stamp, created)?;
        }
        xml.write_event(Event::End(BytesEnd::new("cp:coreProperties")))
    })
}

fn workbook() -> Result<Vec<u8>> {
    xml_part(|xml| {
        let mut root = BytesStart::new("workbook");
        root.push_attribute(("xmlns", NS_MAIN));
        root.push_attribute(("xmlns:r", NS_REL));
        xml.write_event(Event::Start(root))?;
        xml.write_event(Event::Start(BytesStart::new("sheets")))?;
        empty_element(
            xml,
            "sheet",
            &[("name", SHEET_NAME), ("sheetId", "1"), ("r:id", "rId1")],
        )?;
        xml.write_event(Event::End(BytesEnd::new("sheets")))?;
        xml.write_event(Event::End(BytesEnd::new("workbook")))
    })
}

fn workbook_rels() -> Result<Vec<u8>> {
    xml_part(|xml| {
        let mut root = BytesStart::new("Relationships");
        root.push_attribute(("xmlns", NS_PKG_REL));
        xml.write_event(Event::Start(root))?;
        empty_element(
            xml,
            "Relationship",
            &[("Id", "rId1"), ("Type", REL_WORKSHEET), ("Target", "worksheets/sheet1.xml")],
        )?;
        xml.write_event(Event::End(BytesEnd::new("Relationships")))
    })
}

fn write_cell(
    xml: &mut XmlWriter,
    reference: &str,
    column: Column,
    value: &str,
) -> std::io::Result<()> {
    let mut cell = BytesStart::new("c");
    cell.push_attribute(("r", reference));

    if column == Column::Rating && value.parse::<u32>().is_ok() {
        xml.write_event(Event::Start(cell))?;
        text_element(xml, BytesStart::new("v"), value)?;
        return xml.write_event(Event::End(BytesEnd::new("c")));
    }

    cell.push_attribute(("t", "inlineStr"));
    xml.write_event(Event::Start(cell))?;
    xml.write_event(Event::Start(BytesStart::new("is")))?;
    let mut text = BytesStart::new("t");
    text.push_attribute(("xml:space", "preserve"));
    text_element(xml, text, &encode_cell_text(value))?;
    xml.write_event(Event::End(BytesEnd::new("is")))?;
    xml.write_event(Event::End(BytesEnd::new("c")))
}

fn write_row(xml: &mut XmlWriter, number: usize, cells: [&str; 5]) -> std::io::Result<()> {
    let number = number.to_string();
    let mut row = BytesStart::new("row");
    row.push_attribute(("r", number.as_str()));
    xml.write_event(Event::Start(row))?;
    for ((column, letter), value) in Column::ALL.into_iter().zip(COLUMN_LETTERS).zip(cells) {
        write_cell(xml, &format!("{letter}{number}"), column, value)?;
    }
    xml.write_event(Event::End(BytesEnd::new("row")))
}

fn worksheet(rows: &[ExportRow]) -> Result<Vec<u8>> {
    xml_part(|xml| {
        let mut root = BytesStart::new("worksheet");
        root.push_attribute(("xmlns", NS_MAIN));
        root.push_attribute(("xmlns:r", NS_REL));
        xml.write_event(Event::Start(root))?;
        xml.write_event(Event::Start(BytesStart::new("sheetData")))?;
        write_row(xml, 1, Column::headers())?;
        for (index, row) in rows.iter().enumerate() {
            write_row(xml, index + 2, row.cells())?;
        }
        xml.write_event(Event::End(BytesEnd::new("sheetData")))?;
        xml.write_event(Event::End(BytesEnd::new("worksheet")))
    })
}

pub(crate) fn render(rows: &[ExportRow]) -> Result<Vec<u8>> {
    let created = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    let parts = [
        ("[Content_Types].xml", content_types()?),
        ("_rels/.rels", package_rels()?),
        ("docProps/core.xml", core_properties(&created)?),
        ("xl/workbook.xml", workbook()?),
        ("xl/_rels/workbook.xml.rels", workbook_rels()?),
        (SHEET_PATH, worksheet(rows)?),
    ];

    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);
    let mut archive = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, bytes) in parts {
        archive.start_file(name, options).map_err(encode_err)?;
        archive.write_all(&bytes).map_err(encode_err)?;
    }
    let cursor = archive.finish().map_err(encode_err)?;
    Ok(cursor.into_inner())
}

fn column_index(reference: &str) -> Option<usize> {
    let letters: String = reference
        .chars()
        .take_while(char::is_ascii_alphabetic)
        .collect();
    COLUMN_LETTERS.iter().position(|&letter| letter == letters)
}

/// Column of a `<c>` element from its `r` reference, if present.
fn cell_column(cell: &BytesStart<'_>) -> Option<usize> {
    cell.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == b"r")
        .and_then(|attr| column_index(&String::from_utf8_lossy(&attr.value)))
}

fn unescape_raw(raw: &[u8]) -> Result<String> {
    let text = String::from_utf8_lossy(raw);
    quick_xml::escape::unescape(&text)
        .map(Cow::into_owned)
        .map_err(import_err)
}

fn parse_sheet(xml: &str) -> Result<Vec<[String; 5]>> {
    let mut reader = Reader::from_str(xml);
    let mut rows = Vec::new();
    let mut row: Option<[String; 5]> = None;
    let mut position = 0;
    let mut column: Option<usize> = None;
    let mut in_value = false;
    let mut value = String::new();

    loop {
        match reader.read_event().map_err(import_err)? {
            Event::Start(element) => match element.name().as_ref() {
                b"row" => {
                    row = Some(Default::default());
                    position = 0;
                }
                b"c" => {
                    column = Some(cell_column(&element).unwrap_or(position));
                    position += 1;
                    value.clear();
                }
                b"v" | b"t" if column.is_some() => in_value = true,
                _ => {}
            },
            Event::Empty(element) => match element.name().as_ref() {
                b"row" => rows.push(Default::default()),
                b"c" => position += 1,
                _ => {}
            },
            Event::Text(text) if in_value => value.push_str(&unescape_raw(&text)?),
            Event::GeneralRef(entity) if in_value => {
                let reference = format!("&{};", String::from_utf8_lossy(&entity));
                value.push_str(&unescape_raw(reference.as_bytes())?);
            }
            Event::End(element) => match element.name().as_ref() {
                b"v" | b"t" => in_value = false,
                b"c" => {
                    let slot = column
                        .take()
                        .zip(row.as_mut())
                        .and_then(|(index, cells)| cells.get_mut(index));
                    if let Some(slot) = slot {
                        *slot = decode_cell_text(&value).into_owned();
                    }
                }
                b"row" => rows.extend(row.take()),
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(rows)
}

pub(crate) fn parse(bytes: &[u8]) -> Result<Vec<ExportRow>> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(import_err)?;
    let mut sheet = String::new();
    archive
        .by_name(SHEET_PATH)
        .map_err(import_err)?
        .read_to_string(&mut sheet)
        .map_err(import_err)?;

    let mut rows = parse_sheet(&sheet)?.into_iter();
    let header = rows.next().ok_or_else(|| import_err("worksheet has no header row"))?;
    if header.iter().map(String::as_str).ne(Column::headers()) {
        return Err(import_err(format!("unexpected header row: {}", header.join(", "))));
    }
    Ok(rows.map(ExportRow::from_cells).collect())
}
