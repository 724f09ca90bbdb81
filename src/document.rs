//! In-memory tree for an ods document and the package I/O around it
//!
//! # Reference
//! OASIS Open Document Format for Office Application 1.2 (ODF 1.2)
//! http://docs.oasis-open.org/office/v1.2/OpenDocument-v1.2.pdf

use std::io::{BufReader, Read, Seek, Write};

use log::debug;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::reader::Reader as XmlReader;
use quick_xml::writer::Writer as XmlWriter;
use zip::read::{ZipArchive, ZipFile};
use zip::result::ZipError;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::converter::ValueType;
use crate::errors::{OdsError, Result};

const MIMETYPE: &[u8] = b"application/vnd.oasis.opendocument.spreadsheet";

const OFFICE_NS: &str = "urn:oasis:names:tc:opendocument:xmlns:office:1.0";
const TABLE_NS: &str = "urn:oasis:names:tc:opendocument:xmlns:table:1.0";
const TEXT_NS: &str = "urn:oasis:names:tc:opendocument:xmlns:text:1.0";

const STYLES_XML: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
    <office:document-styles \
    xmlns:office=\"urn:oasis:names:tc:opendocument:xmlns:office:1.0\" \
    office:version=\"1.2\"/>";

const MANIFEST_XML: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
    <manifest:manifest \
    xmlns:manifest=\"urn:oasis:names:tc:opendocument:xmlns:manifest:1.0\" \
    manifest:version=\"1.2\">\
    <manifest:file-entry manifest:full-path=\"/\" \
    manifest:media-type=\"application/vnd.oasis.opendocument.spreadsheet\"/>\
    <manifest:file-entry manifest:full-path=\"content.xml\" \
    manifest:media-type=\"text/xml\"/>\
    <manifest:file-entry manifest:full-path=\"styles.xml\" \
    manifest:media-type=\"text/xml\"/>\
    </manifest:manifest>";

type OdsXmlReader<'a> = XmlReader<BufReader<ZipFile<'a>>>;

/// A table cell element, values kept as raw literals until decoded
#[derive(Debug, Clone)]
pub(crate) struct TableCell {
    /// `office:value-type` attribute, untouched
    pub value_type: Option<String>,
    /// Literal value attribute for non-string types
    pub value: Option<String>,
    /// Child `text:p` contents, one entry per paragraph
    pub paragraphs: Vec<String>,
    /// `table:number-columns-repeated`
    pub columns_repeated: usize,
}

impl Default for TableCell {
    fn default() -> TableCell {
        TableCell {
            value_type: None,
            value: None,
            paragraphs: Vec::new(),
            columns_repeated: 1,
        }
    }
}

impl TableCell {
    /// A cell with no type, no value and no content
    pub fn is_blank(&self) -> bool {
        self.value_type.is_none() && self.value.is_none() && self.paragraphs.is_empty()
    }
}

/// A table row element
#[derive(Debug, Clone)]
pub(crate) struct TableRow {
    pub cells: Vec<TableCell>,
    /// `table:number-rows-repeated`
    pub rows_repeated: usize,
}

impl Default for TableRow {
    fn default() -> TableRow {
        TableRow {
            cells: Vec::new(),
            rows_repeated: 1,
        }
    }
}

impl TableRow {
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(TableCell::is_blank)
    }
}

/// A table element with its declared name
#[derive(Debug, Clone, Default)]
pub(crate) struct Table {
    pub name: String,
    pub rows: Vec<TableRow>,
}

/// The spreadsheet content of an ods package, tables in document order
#[derive(Debug, Default)]
pub(crate) struct SpreadsheetDocument {
    pub tables: Vec<Table>,
}

impl SpreadsheetDocument {
    /// Parses an ods package from a reader
    pub fn load<RS: Read + Seek>(reader: RS) -> Result<SpreadsheetDocument> {
        let mut zip = ZipArchive::new(reader)?;

        // check mimetype
        match zip.by_name("mimetype") {
            Ok(mut f) => {
                let mut buf = [0u8; 46];
                f.read_exact(&mut buf)?;
                if &buf[..] != MIMETYPE {
                    return Err(OdsError::InvalidMime(buf.to_vec()));
                }
            }
            Err(ZipError::FileNotFound) => return Err(OdsError::FileNotFound("mimetype")),
            Err(e) => return Err(OdsError::Zip(e)),
        }

        let mut reader = match zip.by_name("content.xml") {
            Ok(f) => {
                // No text trimming: whitespace inside `text:p` is cell
                // content; text between elements is skipped by the
                // paragraph guard in `read_cell_content`.
                let mut r = XmlReader::from_reader(BufReader::new(f));
                r.check_end_names(false);
                r.expand_empty_elements(true);
                r
            }
            Err(ZipError::FileNotFound) => return Err(OdsError::FileNotFound("content.xml")),
            Err(e) => return Err(OdsError::Zip(e)),
        };

        let mut tables = Vec::new();
        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) if e.name().as_ref() == b"table:table" => {
                    let mut name = String::new();
                    for a in e.attributes() {
                        let a = a?;
                        if a.key.as_ref() == b"table:name" {
                            name = a.unescape_value()?.into_owned();
                        }
                    }
                    let table = read_table(&mut reader, name)?;
                    debug!("table '{}' with {} rows", table.name, table.rows.len());
                    tables.push(table);
                }
                Event::Eof => break,
                _ => (),
            }
            buf.clear();
        }
        Ok(SpreadsheetDocument { tables })
    }

    /// Serializes the document as a complete ods package
    pub fn write<W: Write + Seek>(&self, writer: W) -> Result<()> {
        let mut zip = ZipWriter::new(writer);
        let stored = FileOptions::default().compression_method(CompressionMethod::Stored);
        let deflated = FileOptions::default().compression_method(CompressionMethod::Deflated);

        // mimetype must come first and uncompressed
        zip.start_file("mimetype", stored)?;
        zip.write_all(MIMETYPE)?;
        zip.start_file("content.xml", deflated)?;
        zip.write_all(&self.content_xml()?)?;
        zip.start_file("styles.xml", deflated)?;
        zip.write_all(STYLES_XML.as_bytes())?;
        zip.start_file("META-INF/manifest.xml", deflated)?;
        zip.write_all(MANIFEST_XML.as_bytes())?;
        zip.finish()?;
        Ok(())
    }

    fn content_xml(&self) -> Result<Vec<u8>> {
        let mut xml = XmlWriter::new(Vec::new());
        xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut root = BytesStart::new("office:document-content");
        root.push_attribute(("xmlns:office", OFFICE_NS));
        root.push_attribute(("xmlns:table", TABLE_NS));
        root.push_attribute(("xmlns:text", TEXT_NS));
        root.push_attribute(("office:version", "1.2"));
        xml.write_event(Event::Start(root))?;
        xml.write_event(Event::Start(BytesStart::new("office:body")))?;
        xml.write_event(Event::Start(BytesStart::new("office:spreadsheet")))?;
        for table in &self.tables {
            write_table(&mut xml, table)?;
        }
        xml.write_event(Event::End(BytesEnd::new("office:spreadsheet")))?;
        xml.write_event(Event::End(BytesEnd::new("office:body")))?;
        xml.write_event(Event::End(BytesEnd::new("office:document-content")))?;
        Ok(xml.into_inner())
    }
}

fn read_table(reader: &mut OdsXmlReader, name: String) -> Result<Table> {
    let mut table = Table {
        name,
        rows: Vec::new(),
    };
    let mut buf = Vec::new();
    let mut row_buf = Vec::new();
    let mut cell_buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) if e.name().as_ref() == b"table:table-row" => {
                let mut row = TableRow::default();
                for a in e.attributes() {
                    let a = a?;
                    if a.key.as_ref() == b"table:number-rows-repeated" {
                        row.rows_repeated = a.unescape_value()?.parse()?;
                    }
                }
                read_row(reader, &mut row_buf, &mut cell_buf, &mut row)?;
                table.rows.push(row);
            }
            Event::End(ref e) if e.name().as_ref() == b"table:table" => break,
            Event::Eof => return Err(OdsError::Unexpected("expecting 'table:table' end, got EOF")),
            _ => (),
        }
        buf.clear();
    }
    Ok(table)
}

fn read_row(
    reader: &mut OdsXmlReader,
    row_buf: &mut Vec<u8>,
    cell_buf: &mut Vec<u8>,
    row: &mut TableRow,
) -> Result<()> {
    loop {
        row_buf.clear();
        match reader.read_event_into(row_buf)? {
            Event::Start(ref e)
                if e.name().as_ref() == b"table:table-cell"
                    || e.name().as_ref() == b"table:covered-table-cell" =>
            {
                let mut cell = TableCell::default();
                for a in e.attributes() {
                    let a = a?;
                    match a.key.as_ref() {
                        b"office:value-type" => {
                            cell.value_type = Some(a.unescape_value()?.into_owned());
                        }
                        b"office:value"
                        | b"office:boolean-value"
                        | b"office:date-value"
                        | b"office:time-value"
                        | b"office:string-value" => {
                            cell.value = Some(a.unescape_value()?.into_owned());
                        }
                        b"table:number-columns-repeated" => {
                            cell.columns_repeated = a.unescape_value()?.parse()?;
                        }
                        _ => (),
                    }
                }
                read_cell_content(reader, cell_buf, &mut cell)?;
                row.cells.push(cell);
            }
            Event::End(ref e) if e.name().as_ref() == b"table:table-row" => break,
            Event::Eof => {
                return Err(OdsError::Unexpected(
                    "expecting 'table:table-row' end, got EOF",
                ))
            }
            _ => (),
        }
    }
    Ok(())
}

/// Collects the `text:p` children of a cell, one paragraph per element.
///
/// `text:s` and `text:line-break` elements inside a paragraph expand to
/// the spaces and line break they stand for. Text outside an open
/// paragraph is structural whitespace and is skipped.
fn read_cell_content(
    reader: &mut OdsXmlReader,
    buf: &mut Vec<u8>,
    cell: &mut TableCell,
) -> Result<()> {
    let mut paragraph: Option<String> = None;
    loop {
        buf.clear();
        match reader.read_event_into(buf)? {
            Event::Start(ref e) if e.name().as_ref() == b"text:p" => {
                paragraph = Some(String::new());
            }
            Event::Text(ref t) => {
                if let Some(p) = paragraph.as_mut() {
                    p.push_str(&t.unescape()?);
                }
            }
            Event::Start(ref e) if e.name().as_ref() == b"text:s" => {
                if let Some(p) = paragraph.as_mut() {
                    let mut count = 1;
                    for a in e.attributes() {
                        let a = a?;
                        if a.key.as_ref() == b"text:c" {
                            count = a.unescape_value()?.parse()?;
                        }
                    }
                    p.extend(std::iter::repeat(' ').take(count));
                }
            }
            Event::Start(ref e) if e.name().as_ref() == b"text:line-break" => {
                if let Some(p) = paragraph.as_mut() {
                    p.push('\n');
                }
            }
            Event::End(ref e) if e.name().as_ref() == b"text:p" => {
                cell.paragraphs.push(paragraph.take().unwrap_or_default());
            }
            Event::End(ref e)
                if e.name().as_ref() == b"table:table-cell"
                    || e.name().as_ref() == b"table:covered-table-cell" =>
            {
                break
            }
            Event::Eof => {
                return Err(OdsError::Unexpected(
                    "expecting 'table:table-cell' end, got EOF",
                ))
            }
            _ => (),
        }
    }
    Ok(())
}

fn write_table(xml: &mut XmlWriter<Vec<u8>>, table: &Table) -> Result<()> {
    let mut elem = BytesStart::new("table:table");
    elem.push_attribute(("table:name", table.name.as_str()));
    xml.write_event(Event::Start(elem))?;
    for row in &table.rows {
        let mut elem = BytesStart::new("table:table-row");
        if row.rows_repeated > 1 {
            elem.push_attribute((
                "table:number-rows-repeated",
                row.rows_repeated.to_string().as_str(),
            ));
        }
        xml.write_event(Event::Start(elem))?;
        for cell in &row.cells {
            write_cell(xml, cell)?;
        }
        xml.write_event(Event::End(BytesEnd::new("table:table-row")))?;
    }
    xml.write_event(Event::End(BytesEnd::new("table:table")))?;
    Ok(())
}

fn write_cell(xml: &mut XmlWriter<Vec<u8>>, cell: &TableCell) -> Result<()> {
    let mut elem = BytesStart::new("table:table-cell");
    if let Some(tag) = &cell.value_type {
        elem.push_attribute(("office:value-type", tag.as_str()));
        if let Some(value) = &cell.value {
            let token = ValueType::from_tag(Some(tag.as_str())).value_token();
            elem.push_attribute((token, value.as_str()));
        }
    }
    if cell.columns_repeated > 1 {
        elem.push_attribute((
            "table:number-columns-repeated",
            cell.columns_repeated.to_string().as_str(),
        ));
    }
    if cell.paragraphs.is_empty() {
        xml.write_event(Event::Empty(elem))?;
        return Ok(());
    }
    xml.write_event(Event::Start(elem))?;
    for paragraph in &cell.paragraphs {
        if paragraph.is_empty() {
            xml.write_event(Event::Empty(BytesStart::new("text:p")))?;
        } else {
            xml.write_event(Event::Start(BytesStart::new("text:p")))?;
            xml.write_event(Event::Text(BytesText::new(paragraph)))?;
            xml.write_event(Event::End(BytesEnd::new("text:p")))?;
        }
    }
    xml.write_event(Event::End(BytesEnd::new("table:table-cell")))?;
    Ok(())
}
