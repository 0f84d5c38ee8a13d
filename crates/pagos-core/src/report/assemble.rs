//! Row assembly and ordering.

use crate::models::report::{InvoiceBlock, Row, compare_invoice_ids};

use super::rules::convert_date;

/// Flatten classified blocks into rows sorted by invoice id.
///
/// Entries without a payment method and blocks without entries produce no rows.
pub fn assemble(blocks: &[InvoiceBlock]) -> Vec<Row> {
    let mut rows: Vec<Row> = blocks
        .iter()
        .flat_map(|block| {
            let date = block.date.as_deref().map(convert_date).unwrap_or_default();
            let beneficiary = block.beneficiary.clone().unwrap_or_default();

            block.entries.iter().filter_map(move |entry| {
                Some(Row {
                    invoice_id: block.invoice_id.clone(),
                    beneficiary: beneficiary.clone(),
                    date: date.clone(),
                    payment_method: entry.method?,
                    bank: entry.bank.clone(),
                    amount: entry.amount.clone(),
                })
            })
        })
        .collect();

    sort_rows(&mut rows);
    rows
}

/// Stable sort by numeric invoice id; equal ids keep their relative order.
pub fn sort_rows(rows: &mut [Row]) {
    rows.sort_by(|a, b| compare_invoice_ids(&a.invoice_id, &b.invoice_id));
}
