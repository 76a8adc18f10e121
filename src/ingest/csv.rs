//! Parses the bank's CSV export into normalized transactions.

use csv::StringRecord;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    Error,
    transaction::{Transaction, TransactionKind},
};

/// Dates are encoded as a bare 8-digit token, e.g. `20240315`.
const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year][month][day]");

/// Parses CSV text from the bank export into transactions.
///
/// Expects a header row. The description, payment-method, and
/// additional-description columns may appear under their accented display
/// spelling or an ASCII alias; the accented spelling wins when both are
/// present.
///
/// Any malformed row aborts the parse with the 1-based data row index and the
/// offending value, rather than producing a partial result.
pub fn parse_transactions(text: &str) -> Result<Vec<Transaction>, Error> {
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let headers = reader.headers()?.clone();

    let columns = Columns::resolve(&headers)?;
    let mut transactions = Vec::new();

    for (index, record) in reader.records().enumerate() {
        let row = index + 1;
        let record = record?;
        transactions.push(parse_row(&record, &columns, row)?);
    }

    Ok(transactions)
}

/// The resolved header index of each column.
struct Columns {
    date: usize,
    time: usize,
    description: usize,
    payment_method: usize,
    place: Option<usize>,
    amount: usize,
    balance: usize,
    title: usize,
    category: Option<usize>,
    additional_description: Option<usize>,
    responsible: Option<usize>,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self, Error> {
        let required = |canonical, aliases: &[&str]| {
            find_column(headers, aliases).ok_or(Error::MissingColumn(canonical))
        };

        Ok(Self {
            date: required("Fecha", &["Fecha"])?,
            time: required("Hora", &["Hora"])?,
            description: required("Descripcion", &["Descripción", "Descripcion"])?,
            payment_method: required(
                "MedioDeAtencion",
                &["Medio de Atención", "MedioDeAtencion"],
            )?,
            place: find_column(headers, &["Lugar"]),
            amount: required("Monto", &["Monto"])?,
            balance: required("Saldo", &["Saldo"])?,
            title: required("Titulo", &["Titulo"])?,
            category: find_column(headers, &["Categoria"]),
            additional_description: find_column(
                headers,
                &["Descripcion Adicional", "DescripcionAdicional"],
            ),
            responsible: find_column(headers, &["Responsable"]),
        })
    }
}

/// Returns the index of the first alias present in the header row, so earlier
/// aliases take precedence.
fn find_column(headers: &StringRecord, aliases: &[&str]) -> Option<usize> {
    aliases
        .iter()
        .find_map(|alias| headers.iter().position(|header| header == *alias))
}

fn parse_row(record: &StringRecord, columns: &Columns, row: usize) -> Result<Transaction, Error> {
    let field = |index: usize| record.get(index).unwrap_or_default().trim();
    let optional_field = |index: Option<usize>| index.map(field).unwrap_or_default();

    let date_text = field(columns.date);
    let date = Date::parse(date_text, DATE_FORMAT).map_err(|_| Error::InvalidDate {
        row,
        value: date_text.to_owned(),
    })?;

    let title = field(columns.title);
    let kind = TransactionKind::from_title(title).ok_or_else(|| Error::UnknownTransactionType {
        row,
        value: title.to_owned(),
    })?;

    Ok(Transaction {
        date,
        time: field(columns.time).to_owned(),
        description: field(columns.description).to_owned(),
        payment_method: field(columns.payment_method).to_owned(),
        place: optional_field(columns.place).to_owned(),
        amount: parse_money(field(columns.amount), "Monto", row)?,
        balance: parse_money(field(columns.balance), "Saldo", row)?,
        kind,
        category: optional_field(columns.category).to_owned(),
        additional_description: optional_field(columns.additional_description).to_owned(),
        responsible: optional_field(columns.responsible).to_owned(),
    })
}

/// Parses a decimal amount that may use commas as thousands separators,
/// e.g. `1,234.50`.
fn parse_money(text: &str, column: &'static str, row: usize) -> Result<f64, Error> {
    text.replace(',', "")
        .parse()
        .map_err(|_| Error::InvalidNumber {
            row,
            column,
            value: text.to_owned(),
        })
}

#[cfg(test)]
mod parse_transactions_tests {
    use time::macros::date;

    use crate::{Error, transaction::TransactionKind};

    use super::parse_transactions;

    const HEADER: &str = "Fecha,Hora,Descripción,Medio de Atención,Lugar,Monto,Saldo,Titulo,Tipo,Categoria,Descripcion Adicional,Responsable";

    #[test]
    fn parses_a_full_row() {
        let text = format!(
            "{HEADER}\n\
             20240315,14:32,Supermercado Disco,QR,Montevideo,\"-1,234.50\",\"10,000.00\",Gasto,Compra,Comida,Compra semanal,Ana"
        );

        let transactions = parse_transactions(&text).expect("should parse valid CSV");

        assert_eq!(transactions.len(), 1);
        let transaction = &transactions[0];
        assert_eq!(transaction.date, date!(2024 - 03 - 15));
        assert_eq!(transaction.time, "14:32");
        assert_eq!(transaction.description, "Supermercado Disco");
        assert_eq!(transaction.payment_method, "QR");
        assert_eq!(transaction.place, "Montevideo");
        assert_eq!(transaction.amount, -1234.50);
        assert_eq!(transaction.balance, 10000.00);
        assert_eq!(transaction.kind, TransactionKind::Expense);
        assert_eq!(transaction.category, "Comida");
        assert_eq!(transaction.additional_description, "Compra semanal");
        assert_eq!(transaction.responsible, "Ana");
    }

    #[test]
    fn accepts_ascii_header_aliases() {
        let text = "Fecha,Hora,Descripcion,MedioDeAtencion,Lugar,Monto,Saldo,Titulo,Tipo,Categoria,DescripcionAdicional,Responsable\n\
                    20240315,14:32,Farmacia,Tarjeta,,-300.00,700.00,Gasto,Compra,Salud,,";

        let transactions = parse_transactions(text).expect("should parse ASCII headers");

        assert_eq!(transactions[0].description, "Farmacia");
        assert_eq!(transactions[0].payment_method, "Tarjeta");
    }

    #[test]
    fn accented_header_wins_when_both_spellings_are_present() {
        let text = "Fecha,Hora,Descripcion,Descripción,Medio de Atención,Monto,Saldo,Titulo\n\
                    20240315,14:32,ascii column,accented column,QR,-300.00,700.00,Gasto";

        let transactions = parse_transactions(text).expect("should parse");

        assert_eq!(transactions[0].description, "accented column");
    }

    #[test]
    fn discriminator_comes_from_the_title_column() {
        // Tipo carries an unrelated sub-type label and must be ignored.
        let text = format!(
            "{HEADER}\n\
             20240315,14:32,Sueldo,Transferencia,,50000.00,60000.00,Ingreso,Gasto,,,"
        );

        let transactions = parse_transactions(&text).expect("should parse");

        assert_eq!(transactions[0].kind, TransactionKind::Income);
    }

    #[test]
    fn blank_optional_fields_become_empty_strings() {
        let text = format!(
            "{HEADER}\n\
             20240315,14:32,Cena,QR,,-800.00,200.00,Gasto,,,,"
        );

        let transactions = parse_transactions(&text).expect("should parse");

        assert_eq!(transactions[0].category, "");
        assert_eq!(transactions[0].additional_description, "");
        assert_eq!(transactions[0].responsible, "");
    }

    #[test]
    fn malformed_date_aborts_with_row_context() {
        let text = format!(
            "{HEADER}\n\
             20240315,14:32,Cena,QR,,-800.00,200.00,Gasto,,,,\n\
             2024-03-16,14:32,Cena,QR,,-800.00,200.00,Gasto,,,,"
        );

        let error = parse_transactions(&text).expect_err("should reject malformed date");

        assert!(
            matches!(&error, Error::InvalidDate { row: 2, value } if value == "2024-03-16"),
            "got {error:?}"
        );
    }

    #[test]
    fn non_numeric_amount_aborts_with_row_context() {
        let text = format!(
            "{HEADER}\n\
             20240315,14:32,Cena,QR,,ochocientos,200.00,Gasto,,,,"
        );

        let error = parse_transactions(&text).expect_err("should reject non-numeric amount");

        assert!(
            matches!(
                &error,
                Error::InvalidNumber { row: 1, column: "Monto", value } if value == "ochocientos"
            ),
            "got {error:?}"
        );
    }

    #[test]
    fn unknown_title_aborts_with_row_context() {
        let text = format!(
            "{HEADER}\n\
             20240315,14:32,Cena,QR,,-800.00,200.00,Transferencia,,,,"
        );

        let error = parse_transactions(&text).expect_err("should reject unknown title");

        assert!(
            matches!(
                &error,
                Error::UnknownTransactionType { row: 1, value } if value == "Transferencia"
            ),
            "got {error:?}"
        );
    }

    #[test]
    fn missing_required_column_is_reported_by_name() {
        let text = "Fecha,Hora,Descripción,Medio de Atención,Saldo,Titulo\n\
                    20240315,14:32,Cena,QR,200.00,Gasto";

        let error = parse_transactions(text).expect_err("should reject missing column");

        assert!(matches!(error, Error::MissingColumn("Monto")), "got {error:?}");
    }

    #[test]
    fn empty_input_after_the_header_yields_an_empty_set() {
        let transactions = parse_transactions(&format!("{HEADER}\n")).expect("should parse");

        assert!(transactions.is_empty());
    }
}
