//! # CSV Export
//!
//! Renders a filtered transaction list as the `laporan-penjualan` CSV
//! download: one row per transaction, followed by summary rows.

use std::fmt::Write;

use crate::report::compute_summary;
use crate::transaction::StoredTransaction;

/// Column headers, in the fixed export order.
const CSV_HEADERS: [&str; 5] = ["Tanggal", "No. Order", "Items", "Total", "Pembayaran"];

/// Renders the transaction list as CSV text.
///
/// Every data cell is double-quoted (embedded quotes doubled per RFC
/// 4180). The `Total` column is the raw rupiah integer so spreadsheet
/// tools can sum it, and `Pembayaran` is the wire identifier (`cash`,
/// `qris`, ...). After the rows, a blank line separates the computed
/// summary: transaction count and total revenue.
pub fn export_csv(transactions: &[StoredTransaction]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", CSV_HEADERS.join(","));

    for tx in transactions {
        let items = tx
            .items
            .iter()
            .map(|l| format!("{} ({}) x{}", l.name, l.variant, l.quantity))
            .collect::<Vec<_>>()
            .join("; ");

        let _ = writeln!(
            out,
            "{},{},{},{},{}",
            quote(&tx.created_at.format("%d/%m/%Y %H:%M").to_string()),
            quote(&tx.order_number),
            quote(&items),
            quote(&tx.total.rupiah().to_string()),
            quote(tx.payment_method.as_str()),
        );
    }

    let summary = compute_summary(transactions);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{},{}",
        quote("Total Transaksi"),
        quote(&summary.transaction_count.to_string())
    );
    let _ = writeln!(
        out,
        "{},{}",
        quote("Total Pendapatan"),
        quote(&summary.total_revenue.rupiah().to_string())
    );

    out
}

fn quote(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartLine;
    use crate::checkout::PaymentMethod;
    use crate::money::Money;
    use chrono::{TimeZone, Utc};

    fn sample() -> StoredTransaction {
        StoredTransaction {
            id: "id-1".to_string(),
            order_number: "ORD-20260823-0042".to_string(),
            branch: "Outlet 1".to_string(),
            branch_id: "b1".to_string(),
            items: vec![
                CartLine {
                    line_id: "v1".to_string(),
                    menu_item_id: "m1".to_string(),
                    name: "Dimsum Ayam".to_string(),
                    variant: "Besar".to_string(),
                    unit_price: Money::from_rupiah(18_000),
                    quantity: 2,
                },
                CartLine {
                    line_id: "v2".to_string(),
                    menu_item_id: "m2".to_string(),
                    name: "Dimsum Udang".to_string(),
                    variant: "Kecil".to_string(),
                    unit_price: Money::from_rupiah(25_000),
                    quantity: 1,
                },
            ],
            subtotal: Money::from_rupiah(61_000),
            tax: Money::zero(),
            total: Money::from_rupiah(61_000),
            payment_method: PaymentMethod::Qris,
            cash_amount: Money::from_rupiah(61_000),
            change_amount: Money::zero(),
            created_at: Utc.with_ymd_and_hms(2026, 8, 23, 14, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_export_layout() {
        let csv = export_csv(&[sample()]);
        let expected = "\
Tanggal,No. Order,Items,Total,Pembayaran
\"23/08/2026 14:30\",\"ORD-20260823-0042\",\"Dimsum Ayam (Besar) x2; Dimsum Udang (Kecil) x1\",\"61000\",\"qris\"

\"Total Transaksi\",\"1\"
\"Total Pendapatan\",\"61000\"
";
        assert_eq!(csv, expected);
    }

    #[test]
    fn test_export_empty_list_has_header_and_summary() {
        let csv = export_csv(&[]);
        assert!(csv.starts_with("Tanggal,No. Order,Items,Total,Pembayaran\n"));
        assert!(csv.contains("\"Total Transaksi\",\"0\""));
        assert!(csv.contains("\"Total Pendapatan\",\"0\""));
    }

    #[test]
    fn test_embedded_quotes_are_doubled() {
        let mut tx = sample();
        tx.items[0].name = "Dimsum \"Spesial\"".to_string();

        let csv = export_csv(&[tx]);
        assert!(csv.contains("\"Dimsum \"\"Spesial\"\" (Besar) x2"));
    }

    #[test]
    fn test_transaction_without_items_has_empty_cell() {
        let mut tx = sample();
        tx.items.clear();

        let csv = export_csv(&[tx]);
        assert!(csv.contains(",\"\",\"61000\","));
    }
}
