use std::io::{Cursor, Write as _};

use fractic_sales_journal::{
    entities::{InvoiceId, Movement, SalesInput, SalesJournal, SchemaKind},
    util::SalesJournalUtil,
};
use rust_decimal_macros::dec;
use zip::write::SimpleFileOptions;

enum Cell<'a> {
    Text(&'a str),
    Number(f64),
}

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
</Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

const WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<sheets><sheet name="Ventes" sheetId="1" r:id="rId1"/></sheets>
</workbook>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
</Relationships>"#;

/// Single-sheet xlsx. Each row lists its cells by column letter, in column
/// order; row numbers start at 1.
fn xlsx(rows: &[&[(&str, Cell)]]) -> Vec<u8> {
    let mut sheet = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );
    for (i, row) in rows.iter().enumerate() {
        let r = i + 1;
        sheet.push_str(&format!(r#"<row r="{}">"#, r));
        for (column, cell) in row.iter() {
            match cell {
                Cell::Text(s) => sheet.push_str(&format!(
                    r#"<c r="{}{}" t="inlineStr"><is><t>{}</t></is></c>"#,
                    column, r, s
                )),
                Cell::Number(n) => {
                    sheet.push_str(&format!(r#"<c r="{}{}"><v>{}</v></c>"#, column, r, n))
                }
            }
        }
        sheet.push_str("</row>");
    }
    sheet.push_str("</sheetData></worksheet>");

    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let stored = zip::CompressionMethod::Stored;
    let options = SimpleFileOptions::default().compression_method(stored);
    for (name, content) in [
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", ROOT_RELS),
        ("xl/workbook.xml", WORKBOOK),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS),
        ("xl/worksheets/sheet1.xml", sheet.as_str()),
    ] {
        zip.start_file(name, options)
            .unwrap_or_else(|err| panic!("failed to start {name}: {err}"));
        zip.write_all(content.as_bytes())
            .unwrap_or_else(|err| panic!("failed to write {name}: {err}"));
    }
    zip.finish()
        .unwrap_or_else(|err| panic!("failed to finalize workbook: {err}"))
        .into_inner()
}

async fn generate(bytes: Vec<u8>) -> SalesJournal {
    SalesJournalUtil::default()
        .from_input(SalesInput::Workbook(bytes))
        .await
        .unwrap_or_else(|err| panic!("workbook should convert: {err:?}"))
}

fn postings(journal: &SalesJournal) -> Vec<(&str, &str, Movement)> {
    journal
        .lines
        .iter()
        .map(|l| (l.piece_number.0.as_str(), l.account.as_str(), l.movement))
        .collect()
}

#[tokio::test]
async fn headerless_sheet_with_empty_leading_columns() {
    let journal = generate(xlsx(&[
        &[
            ("C", Cell::Text("02/01/2024")),
            ("D", Cell::Text("F001")),
            ("E", Cell::Text("Dupont")),
            ("I", Cell::Number(120.0)),
            ("J", Cell::Number(100.0)),
        ],
        &[
            ("C", Cell::Text("03/01/2024")),
            ("D", Cell::Text("F002")),
            ("E", Cell::Text("Martin")),
            ("I", Cell::Number(55.0)),
            ("J", Cell::Number(50.0)),
        ],
    ]))
    .await;

    assert_eq!(journal.summary.schema, SchemaKind::Positional);
    assert_eq!(journal.summary.source_rows, 2);
    assert_eq!(journal.summary.parse_warnings, 0);
    assert_eq!(
        postings(&journal),
        vec![
            ("F001", "4110D0000", Movement::Debit(dec!(120))),
            ("F001", "704200000", Movement::Credit(dec!(100))),
            ("F001", "445740000", Movement::Credit(dec!(20))),
            ("F002", "4110M0000", Movement::Debit(dec!(55))),
            ("F002", "704100000", Movement::Credit(dec!(50))),
            ("F002", "445740000", Movement::Credit(dec!(5))),
        ]
    );
    assert_eq!(journal.lines[0].date, chrono::NaiveDate::from_ymd_opt(2024, 1, 2));
    assert!(journal.balances.is_balanced());
}

#[tokio::test]
async fn positional_sheet_with_header_row() {
    let journal = generate(xlsx(&[
        &[
            ("C", Cell::Text("Jour")),
            ("D", Cell::Text("Numéro")),
            ("E", Cell::Text("Nom")),
            ("I", Cell::Text("Montant TTC")),
            ("J", Cell::Text("Montant HT")),
        ],
        &[
            ("C", Cell::Text("02/01/2024")),
            ("D", Cell::Text("F001")),
            ("E", Cell::Text("Dupont")),
            ("I", Cell::Number(105.5)),
            ("J", Cell::Number(100.0)),
        ],
    ]))
    .await;

    assert_eq!(journal.summary.schema, SchemaKind::Positional);
    assert_eq!(journal.summary.source_rows, 1);
    assert_eq!(
        postings(&journal),
        vec![
            ("F001", "4110D0000", Movement::Debit(dec!(105.5))),
            ("F001", "704000000", Movement::Credit(dec!(100))),
            ("F001", "445740000", Movement::Credit(dec!(5.5))),
        ]
    );
}

#[tokio::test]
async fn named_header_sheet() {
    let journal = generate(xlsx(&[
        &[
            ("A", Cell::Text("Date")),
            ("B", Cell::Text("Facture")),
            ("C", Cell::Text("Client")),
            ("D", Cell::Text("TTC")),
            ("E", Cell::Text("HT")),
        ],
        &[
            ("A", Cell::Text("02/01/2024")),
            ("B", Cell::Text("F001")),
            ("C", Cell::Text("Dupont")),
            ("D", Cell::Number(120.0)),
            ("E", Cell::Number(100.0)),
        ],
        &[
            ("A", Cell::Text("02/01/2024")),
            ("B", Cell::Text("F001")),
            ("C", Cell::Text("Dupont")),
            ("D", Cell::Number(110.0)),
            ("E", Cell::Number(100.0)),
        ],
    ]))
    .await;

    assert_eq!(journal.summary.schema, SchemaKind::Named);
    assert_eq!(journal.summary.source_rows, 2);
    assert_eq!(journal.lines[0].piece_number, InvoiceId("F001".to_string()));
    assert_eq!(
        postings(&journal),
        vec![
            ("F001", "4110D0000", Movement::Debit(dec!(230))),
            ("F001", "704200000", Movement::Credit(dec!(100))),
            ("F001", "445740000", Movement::Credit(dec!(20))),
            ("F001", "704100000", Movement::Credit(dec!(100))),
            ("F001", "445740000", Movement::Credit(dec!(10))),
        ]
    );
}

#[tokio::test]
async fn out_of_range_amount_does_not_abort_the_batch() {
    let journal = generate(xlsx(&[
        &[
            ("A", Cell::Text("Date")),
            ("B", Cell::Text("Facture")),
            ("C", Cell::Text("Client")),
            ("D", Cell::Text("TTC")),
            ("E", Cell::Text("HT")),
        ],
        &[
            ("A", Cell::Text("02/01/2024")),
            ("B", Cell::Text("F001")),
            ("C", Cell::Text("Dupont")),
            ("D", Cell::Text("70000000000000000000000000000")),
            ("E", Cell::Text("0,01")),
        ],
        &[
            ("A", Cell::Text("03/01/2024")),
            ("B", Cell::Text("F002")),
            ("C", Cell::Text("Martin")),
            ("D", Cell::Number(120.0)),
            ("E", Cell::Number(100.0)),
        ],
    ]))
    .await;

    assert_eq!(journal.summary.parse_warnings, 1);
    assert!(journal
        .lines
        .iter()
        .any(|l| l.piece_number == InvoiceId("F002".to_string())));
}
