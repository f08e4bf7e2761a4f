//! Message templates. Turns a session transition (or an admin screen) into the replies the
//! operator should see.

use crate::channel::Keyboard;
use crate::domain::money::format_rupiah;
use crate::domain::{cart, Cart, Catalog, Category, PaymentMethod, Role, Session, Transaction};
use crate::ledger_actor::DailySummary;
use crate::session_actor::{GuardFailure, Outcome, Screen, SessionError, Transition};
use crate::ui::keyboards;

const RULE: &str = "=========================";

/// One message to show: text plus an optional inline keyboard.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    pub keyboard: Option<Keyboard>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: text.into(), keyboard: None }
    }

    pub fn with_keyboard(text: impl Into<String>, keyboard: Keyboard) -> Self {
        Self { text: text.into(), keyboard: Some(keyboard) }
    }
}

pub fn render_transition(transition: &Transition, role: Role, catalog: &Catalog) -> Vec<Reply> {
    let mut replies = render_screen(&transition.screen, &transition.after, role, catalog);
    if let (Outcome::Rejected(error), Some(first)) = (&transition.outcome, replies.first_mut()) {
        first.text = format!("{}\n\n{}", rejection_notice(error), first.text);
    }
    replies
}

fn render_screen(screen: &Screen, session: &Session, role: Role, catalog: &Catalog) -> Vec<Reply> {
    let customer = session.customer_name.as_deref().unwrap_or("-");
    match screen {
        Screen::Welcome => vec![Reply::with_keyboard(
            "🍵 *Selamat Datang di Matcha Kasir Bot!*\n\nSilakan mulai sesi untuk mencatat transaksi.",
            keyboards::welcome_keyboard(role),
        )],
        Screen::NamePrompt => vec![Reply::text("👤 Silakan masukkan *nama pelanggan*:")],
        Screen::Menu => {
            let text = format!(
                "👤 *Pelanggan: {customer}*\n\n{}\n\n🛒 *Keranjang Saat Ini:*\n{}\n\n💰 *Total Sementara: {}*\n\nSilakan pilih item:",
                price_list(catalog),
                cart_summary(&session.cart),
                format_rupiah(cart::subtotal(&session.cart)),
            );
            vec![Reply::with_keyboard(text, keyboards::menu_keyboard(catalog, &session.cart, role))]
        }
        Screen::Checkout => {
            let text = format!(
                "🧾 *Ringkasan Pesanan*\n\n👤 Pelanggan: {customer}\n\n🛍️ *Items:*\n{}\n\n💰 *Total: {}*\n\nPilih metode pembayaran:",
                cart_summary(&session.cart),
                format_rupiah(cart::subtotal(&session.cart)),
            );
            vec![Reply::with_keyboard(text, keyboards::payment_keyboard())]
        }
        Screen::CashPrompt => {
            let text = format!(
                "💵 *Pembayaran Tunai*\n\n💰 Total: {}\n\nKetik nominal uang yang diterima:",
                format_rupiah(cart::subtotal(&session.cart)),
            );
            vec![Reply::with_keyboard(text, keyboards::cash_keyboard())]
        }
        Screen::Receipt(transaction) => vec![Reply::text(receipt(transaction)), next_action()],
        Screen::NextAction => vec![next_action()],
    }
}

fn next_action() -> Reply {
    Reply::with_keyboard("Pilih langkah selanjutnya:", keyboards::next_action_keyboard())
}

pub fn rejection_notice(error: &SessionError) -> String {
    match error {
        SessionError::InvalidGuard(GuardFailure::WrongView { event: "TextReceived", .. }) => {
            "ℹ️ Silakan gunakan tombol yang tersedia atau /start untuk memulai ulang.".to_string()
        }
        SessionError::InvalidGuard(GuardFailure::WrongView { .. }) => "⚠️ Aksi tidak tersedia di layar ini.".to_string(),
        SessionError::InvalidGuard(GuardFailure::EmptyName | GuardFailure::NameTooLong { .. }) => {
            "❌ Nama tidak valid (maks 50 karakter). Coba lagi:".to_string()
        }
        SessionError::InvalidGuard(GuardFailure::UnknownItem(_)) => "⚠️ Item tidak ditemukan.".to_string(),
        SessionError::InvalidGuard(GuardFailure::NotInCart(_)) => "⚠️ Item belum ada di keranjang.".to_string(),
        SessionError::InvalidGuard(GuardFailure::EmptyCart) => "🛒 Keranjang kosong!".to_string(),
        SessionError::InvalidGuard(GuardFailure::UnknownAction(_)) => "⚠️ Aksi tidak dikenal.".to_string(),
        SessionError::InsufficientPayment(short) => {
            format!("💰 Uang kurang. Dibutuhkan {} lagi.", format_rupiah(short.shortfall()))
        }
        SessionError::InvalidAmount(_) => "❌ Format tidak valid. Masukkan angka saja.".to_string(),
        SessionError::ActorCommunicationError(_) => generic_error().text,
    }
}

pub fn cart_summary(cart: &Cart) -> String {
    if cart.is_empty() {
        return "Keranjang kosong.".to_string();
    }
    cart.lines()
        .iter()
        .map(|line| format!("• {} x{} = {}", line.item.name, line.quantity, format_rupiah(line.line_total())))
        .collect::<Vec<_>>()
        .join("\n")
}

fn price_list(catalog: &Catalog) -> String {
    [Category::Drink, Category::Snack]
        .into_iter()
        .filter_map(|category| {
            let lines: Vec<String> = catalog
                .items()
                .iter()
                .filter(|item| item.category == category)
                .map(|item| format!("• {} — {}", item.name, format_rupiah(item.price)))
                .collect();
            (!lines.is_empty()).then(|| format!("*{category}*\n{}", lines.join("\n")))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn receipt(tx: &Transaction) -> String {
    let mut text = String::new();
    if tx.payment_method == PaymentMethod::Qris {
        text.push_str("📱 *Pembayaran QRIS dikonfirmasi*\n\n");
    }
    text.push_str(&format!(
        "🧾 *STRUK PEMBAYARAN*\n{RULE}\n👤 Pelanggan: {}\n📅 Waktu: {}\n💳 Metode: {}\n\n🛍️ *Pesanan:*\n{}\n\n💰 *Total: {}*",
        tx.customer_name,
        tx.timestamp.format("%d/%m/%y %H:%M"),
        tx.payment_method,
        tx.lines
            .iter()
            .map(|line| format!("• {} x{} = {}", line.item.name, line.quantity, format_rupiah(line.line_total())))
            .collect::<Vec<_>>()
            .join("\n"),
        format_rupiah(tx.total),
    ));
    if let (Some(cash), Some(change)) = (tx.cash_received, tx.change) {
        text.push_str(&format!(
            "\n💵 Tunai: {}\n💸 Kembalian: {}",
            format_rupiah(cash),
            format_rupiah(change)
        ));
    }
    text.push_str(&format!("\n\n✅ *LUNAS*\n{RULE}"));
    text
}

pub fn unauthorized() -> Reply {
    Reply::text("🚫 *Akses Ditolak*. Anda tidak terdaftar.")
}

pub fn generic_error() -> Reply {
    Reply::text("❌ Terjadi kesalahan saat menampilkan pesan. Silakan coba lagi.")
}

pub fn admin_panel() -> Reply {
    Reply::with_keyboard("🔧 *Panel Admin*", keyboards::admin_keyboard())
}

pub fn daily_summary(summary: &DailySummary) -> Reply {
    if summary.transaction_count == 0 {
        return Reply::with_keyboard(
            "📊 *Rekap Penjualan*\n\nBelum ada transaksi hari ini.",
            keyboards::back_to_admin_keyboard(),
        );
    }
    let items = summary
        .items_sold
        .iter()
        .map(|(name, qty)| format!("• {name} x{qty}"))
        .collect::<Vec<_>>()
        .join("\n");
    let text = format!(
        "📊 *Rekap Penjualan Hari Ini*\n\n*Penjualan Item:*\n{items}\n\n📈 Total Transaksi: {}\n💵 Cash: {}\n📱 QRIS: {}\n💰 *Total Omzet: {}*",
        summary.transaction_count,
        format_rupiah(summary.revenue_for(PaymentMethod::Cash)),
        format_rupiah(summary.revenue_for(PaymentMethod::Qris)),
        format_rupiah(summary.total_revenue),
    );
    Reply::with_keyboard(text, keyboards::back_to_admin_keyboard())
}

pub fn reset_prompt() -> Reply {
    Reply::with_keyboard(
        "⚠️ *Reset Data Harian?*\n\nSemua transaksi hari ini akan dihapus dan tidak bisa dikembalikan.",
        keyboards::reset_confirm_keyboard(),
    )
}

pub fn reset_done(dropped: usize) -> Reply {
    Reply::with_keyboard(
        format!("🗑️ *Data Penjualan Harian Berhasil Direset*\n\n{dropped} transaksi dihapus."),
        keyboards::back_to_admin_keyboard(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CartLine, Category, MenuItem};
    use chrono::{Local, TimeZone};
    use rust_decimal::Decimal;

    fn cash_sale() -> Transaction {
        let latte = MenuItem::new("latte", "Matcha Latte", Decimal::from(15000), Category::Drink);
        Transaction {
            operator: 1,
            customer_name: "Budi".into(),
            lines: vec![CartLine { item: latte, quantity: 2 }],
            total: Decimal::from(30000),
            payment_method: PaymentMethod::Cash,
            cash_received: Some(Decimal::from(50000)),
            change: Some(Decimal::from(20000)),
            timestamp: Local.with_ymd_and_hms(2024, 5, 17, 14, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_cash_receipt_lists_change() {
        let text = receipt(&cash_sale());
        assert!(text.contains("👤 Pelanggan: Budi"));
        assert!(text.contains("📅 Waktu: 17/05/24 14:30"));
        assert!(text.contains("• Matcha Latte x2 = Rp30,000"));
        assert!(text.contains("💰 *Total: Rp30,000*"));
        assert!(text.contains("💵 Tunai: Rp50,000"));
        assert!(text.contains("💸 Kembalian: Rp20,000"));
        assert!(text.contains("LUNAS"));
    }

    #[test]
    fn test_qris_receipt_has_confirmation_and_no_change() {
        let mut tx = cash_sale();
        tx.payment_method = PaymentMethod::Qris;
        tx.cash_received = None;
        tx.change = None;
        let text = receipt(&tx);
        assert!(text.starts_with("📱 *Pembayaran QRIS dikonfirmasi*"));
        assert!(!text.contains("Kembalian"));
    }

    #[test]
    fn test_summary_text() {
        let empty = daily_summary(&DailySummary::default());
        assert!(empty.text.contains("Belum ada transaksi"));

        let summary = crate::ledger_actor::daily_summary(&[cash_sale()]);
        let text = daily_summary(&summary).text;
        assert!(text.contains("• Matcha Latte x2"));
        assert!(text.contains("📈 Total Transaksi: 1"));
        assert!(text.contains("💵 Cash: Rp30,000"));
        assert!(text.contains("📱 QRIS: Rp0"));
        assert!(text.contains("Total Omzet: Rp30,000"));
    }

    #[test]
    fn test_insufficient_payment_notice_names_the_shortfall() {
        let error = SessionError::InsufficientPayment(cart::InsufficientPayment {
            total: Decimal::from(30000),
            received: Decimal::from(20000),
        });
        assert_eq!(rejection_notice(&error), "💰 Uang kurang. Dibutuhkan Rp10,000 lagi.");
    }
}
