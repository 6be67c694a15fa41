//! Contact-list fixtures shared by the CSV Sync test suites.

use csv_sync_csvs::{parse, serialize, Table};

/// Header row of a well-formed upload
pub const CONTACT_HEADERS: [&str; 3] = ["phone", "template_title", "reply_message_text"];

/// Build upload text with the canonical headers and `(phone, template, message)` rows
pub fn contacts_csv(rows: &[(&str, &str, &str)]) -> String {
    let headers: Vec<String> = CONTACT_HEADERS.iter().map(|h| h.to_string()).collect();
    let rows: Vec<Vec<String>> = rows
        .iter()
        .map(|(phone, template, message)| {
            vec![phone.to_string(), template.to_string(), message.to_string()]
        })
        .collect();

    serialize(&headers, &rows, b',').expect("fixture rows always serialize")
}

/// Parse [`contacts_csv`] output into a table
pub fn contacts_table(rows: &[(&str, &str, &str)]) -> Table {
    parse(&contacts_csv(rows)).expect("fixture text always parses")
}

/// Table with arbitrary headers and rows, bypassing the codec
pub fn raw_table(headers: &[&str], rows: &[&[&str]]) -> Table {
    Table::new(
        headers.iter().map(|h| h.to_string()).collect(),
        rows.iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect(),
        String::new(),
    )
}

/// A realistic upload: formatting noise, a trunk-prefixed duplicate, blank and
/// whitespace-only messages, and one row with no phone at all
pub fn campaign_table() -> Table {
    contacts_table(&[
        ("(11) 98765-4321", "promo_junho", "Oi Ana, sua oferta chegou"),
        ("011987654321", "promo_junho", "Oi Ana, sua oferta chegou"),
        ("21 99999-0000", "boas_vindas", ""),
        ("5531988887777", "promo_junho", "   "),
        ("", "boas_vindas", "Bem-vindo"),
        ("12345", "lembrete", "Lembrete de pagamento"),
    ])
}
