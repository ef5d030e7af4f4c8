//! # Receipt Rendering
//!
//! Fixed-width plain-text receipts, byte-for-byte reproducible from a
//! [`Transaction`]. The layout matches the printed struk handed to the
//! customer: centered outlet header, order details, line items,
//! totals, payment, and the thank-you banner.

use std::fmt::Write;

use crate::checkout::PaymentMethod;
use crate::transaction::Transaction;

/// Column width of the receipt, sized for a 48-column thermal printer.
pub const RECEIPT_WIDTH: usize = 48;

const LABEL_WIDTH: usize = 13;

/// Renders the complete receipt text, including the trailing newline.
///
/// The `Pajak` (tax) line is omitted while the tax policy is zero, and
/// the `Tunai`/`Kembalian` lines appear only for cash payments.
pub fn render_receipt(tx: &Transaction) -> String {
    let heavy = "=".repeat(RECEIPT_WIDTH);
    let light = "-".repeat(RECEIPT_WIDTH);
    let mut out = String::new();

    let _ = writeln!(out, "{}", heavy);
    let _ = writeln!(out, "{}", center(&format!("DIMSUM {}", tx.branch.to_uppercase())));
    let _ = writeln!(out, "{}", center("Struk Pembayaran"));
    let _ = writeln!(out, "{}", heavy);
    let _ = writeln!(out, "{}", labeled("No. Order", &tx.order_number));
    let _ = writeln!(
        out,
        "{}",
        labeled("Tanggal", &tx.created_at.format("%d/%m/%Y %H.%M").to_string())
    );
    let _ = writeln!(out, "{}", labeled("Cabang", &tx.branch));
    let _ = writeln!(out, "{}", heavy);
    let _ = writeln!(out);
    let _ = writeln!(out, "PESANAN:");
    let _ = writeln!(out, "{}", light);
    for line in &tx.items {
        let _ = writeln!(out, "{} ({})", line.name, line.variant);
        let _ = writeln!(
            out,
            " {} x {} = {}",
            line.quantity,
            line.unit_price,
            line.line_total()
        );
    }
    let _ = writeln!(out, "{}", light);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", labeled("Subtotal", &tx.subtotal.to_string()));
    if tx.tax.is_positive() {
        let _ = writeln!(out, "{}", labeled("Pajak", &tx.tax.to_string()));
    }
    let _ = writeln!(out, "{}", labeled("TOTAL", &tx.total.to_string()));
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", labeled("Pembayaran", tx.payment_method.label()));
    if tx.payment_method == PaymentMethod::Cash {
        let _ = writeln!(out, "{}", labeled("Tunai", &tx.cash_amount.to_string()));
        let _ = writeln!(out, "{}", labeled("Kembalian", &tx.change_amount.to_string()));
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", heavy);
    let _ = writeln!(out, "{}", center("Terima Kasih Atas Kunjungan Anda!"));
    let _ = writeln!(out, "{}", center("Sampai Jumpa Lagi!"));
    let _ = writeln!(out, "{}", heavy);

    out
}

/// Centers a line within the receipt width (left-padded only, so lines
/// carry no trailing whitespace).
fn center(text: &str) -> String {
    let len = text.chars().count();
    if len >= RECEIPT_WIDTH {
        return text.to_string();
    }
    let pad = (RECEIPT_WIDTH - len) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

fn labeled(label: &str, value: &str) -> String {
    format!("{:<width$}: {}", label, value, width = LABEL_WIDTH)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartLine;
    use crate::money::Money;
    use chrono::{TimeZone, Utc};

    fn cash_transaction() -> Transaction {
        Transaction {
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
            payment_method: PaymentMethod::Cash,
            cash_amount: Money::from_rupiah(100_000),
            change_amount: Money::from_rupiah(39_000),
            created_at: Utc.with_ymd_and_hms(2026, 8, 23, 14, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_cash_receipt_byte_for_byte() {
        let expected = "\
================================================
                DIMSUM OUTLET 1
                Struk Pembayaran
================================================
No. Order    : ORD-20260823-0042
Tanggal      : 23/08/2026 14.30
Cabang       : Outlet 1
================================================

PESANAN:
------------------------------------------------
Dimsum Ayam (Besar)
 2 x Rp 18.000 = Rp 36.000
Dimsum Udang (Kecil)
 1 x Rp 25.000 = Rp 25.000
------------------------------------------------

Subtotal     : Rp 61.000
TOTAL        : Rp 61.000

Pembayaran   : Tunai
Tunai        : Rp 100.000
Kembalian    : Rp 39.000

================================================
       Terima Kasih Atas Kunjungan Anda!
               Sampai Jumpa Lagi!
================================================
";
        assert_eq!(render_receipt(&cash_transaction()), expected);
    }

    #[test]
    fn test_non_cash_receipt_omits_tender_lines() {
        let mut tx = cash_transaction();
        tx.payment_method = PaymentMethod::Qris;
        tx.cash_amount = tx.total;
        tx.change_amount = Money::zero();

        let receipt = render_receipt(&tx);
        assert!(receipt.contains("Pembayaran   : QRIS"));
        assert!(!receipt.contains("Tunai        :"));
        assert!(!receipt.contains("Kembalian"));
    }

    #[test]
    fn test_zero_tax_line_omitted_nonzero_shown() {
        let receipt = render_receipt(&cash_transaction());
        assert!(!receipt.contains("Pajak"));

        let mut taxed = cash_transaction();
        taxed.tax = Money::from_rupiah(6_100);
        taxed.total = Money::from_rupiah(67_100);
        let receipt = render_receipt(&taxed);
        assert!(receipt.contains("Pajak        : Rp 6.100"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let tx = cash_transaction();
        assert_eq!(render_receipt(&tx), render_receipt(&tx));
    }
}
