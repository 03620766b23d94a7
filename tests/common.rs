#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::Path;
use zip::write::FileOptions;
use zip::ZipWriter;

/// A cell value in a fixture workbook
#[derive(Debug, Clone)]
pub enum Cell {
    Str(String),
    Num(f64),
    Bool(bool),
    Empty,
}

pub fn s(value: &str) -> Cell {
    Cell::Str(value.to_string())
}

pub const HEADER: [&str; 9] = [
    "version",
    "tool",
    "table",
    "linetype",
    "name",
    "multi_column",
    "description",
    "supported",
    "datatype",
];

pub fn title_row() -> Vec<Cell> {
    vec![s("MET output column definitions")]
}

pub fn header_row() -> Vec<Cell> {
    HEADER.iter().map(|h| s(h)).collect()
}

/// version=5.0, tool=Point, table=T1, linetype=MPR, name=OBS_LVL,
/// multi_column=FALSE, description=x, supported=TRUE, datatype=numeric
pub fn obs_lvl_row() -> Vec<Cell> {
    vec![
        Cell::Num(5.0),
        s("Point"),
        s("T1"),
        s("MPR"),
        s("OBS_LVL"),
        Cell::Bool(false),
        s("x"),
        Cell::Bool(true),
        s("numeric"),
    ]
}

/// Title row, header row, then `data`
pub fn standard_rows(data: Vec<Vec<Cell>>) -> Vec<Vec<Cell>> {
    let mut rows = vec![title_row(), header_row()];
    rows.extend(data);
    rows
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn column_letter(col: usize) -> char {
    (b'A' + col as u8) as char
}

fn sheet_xml(rows: &[Vec<Cell>], strings: &mut Vec<String>) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );

    for (row_idx, row) in rows.iter().enumerate() {
        let r = row_idx + 1;
        xml.push_str(&format!(r#"<row r="{r}">"#));
        for (col_idx, cell) in row.iter().enumerate() {
            let reference = format!("{}{r}", column_letter(col_idx));
            match cell {
                Cell::Str(text) => {
                    let index = match strings.iter().position(|s| s == text) {
                        Some(i) => i,
                        None => {
                            strings.push(text.clone());
                            strings.len() - 1
                        }
                    };
                    xml.push_str(&format!(r#"<c r="{reference}" t="s"><v>{index}</v></c>"#));
                }
                Cell::Num(n) => {
                    xml.push_str(&format!(r#"<c r="{reference}"><v>{n}</v></c>"#));
                }
                Cell::Bool(b) => {
                    let v = if *b { 1 } else { 0 };
                    xml.push_str(&format!(r#"<c r="{reference}" t="b"><v>{v}</v></c>"#));
                }
                Cell::Empty => {}
            }
        }
        xml.push_str("</row>");
    }

    xml.push_str("</sheetData></worksheet>");
    xml
}

fn shared_strings_xml(strings: &[String]) -> String {
    let mut xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="{0}" uniqueCount="{0}">"#,
        strings.len()
    );
    for text in strings {
        xml.push_str(&format!("<si><t>{}</t></si>", escape(text)));
    }
    xml.push_str("</sst>");
    xml
}

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/><Override PartName="/xl/sharedStrings.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml"/><Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings" Target="sharedStrings.xml"/><Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><cellXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/></cellXfs></styleSheet>"#;

fn workbook_xml(sheet_name: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
        escape(sheet_name)
    )
}

/// Write a single-sheet xlsx workbook
pub fn write_workbook(path: &Path, sheet_name: &str, rows: &[Vec<Cell>]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create fixture directory");
    }

    let mut strings = Vec::new();
    let sheet = sheet_xml(rows, &mut strings);

    let file = File::create(path).expect("Failed to create fixture workbook");
    let mut zip = ZipWriter::new(file);
    let options = FileOptions::default();

    let parts: [(&str, String); 7] = [
        ("[Content_Types].xml", CONTENT_TYPES.to_string()),
        ("_rels/.rels", ROOT_RELS.to_string()),
        ("xl/workbook.xml", workbook_xml(sheet_name)),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS.to_string()),
        ("xl/styles.xml", STYLES.to_string()),
        ("xl/sharedStrings.xml", shared_strings_xml(&strings)),
        ("xl/worksheets/sheet1.xml", sheet),
    ];

    for (name, body) in parts {
        zip.start_file(name, options)
            .expect("Failed to start zip entry");
        zip.write_all(body.as_bytes())
            .expect("Failed to write zip entry");
    }

    zip.finish().expect("Failed to finish fixture workbook");
}
