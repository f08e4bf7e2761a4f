//! Keyboard builders. Each one derives the buttons an operator may press from the session
//! and the catalog.

use crate::channel::{Button, Keyboard};
use crate::domain::{Cart, Catalog, PaymentMethod, Role};
use crate::ui::CallbackAction;

fn button(label: impl Into<String>, action: CallbackAction) -> Button {
    Button::new(label, action.to_string())
}

fn admin_row(role: Role) -> Option<Vec<Button>> {
    role.is_admin()
        .then(|| vec![button("🔧 Admin Panel", CallbackAction::AdminPanel)])
}

pub fn welcome_keyboard(role: Role) -> Keyboard {
    let mut rows = vec![vec![button("✅ Mulai Sesi Transaksi", CallbackAction::StartSession)]];
    rows.extend(admin_row(role));
    Keyboard::new(rows)
}

/// Two items per row, then one row per cart line to adjust its quantity.
pub fn menu_keyboard(catalog: &Catalog, cart: &Cart, role: Role) -> Keyboard {
    let mut rows: Vec<Vec<Button>> = catalog
        .items()
        .chunks(2)
        .map(|pair| {
            pair.iter()
                .map(|item| {
                    let qty = cart.quantity_of(&item.id);
                    let label = if qty > 0 { format!("{} ({qty})", item.name) } else { item.name.clone() };
                    button(label, CallbackAction::Add(item.id.clone()))
                })
                .collect()
        })
        .collect();

    for line in cart.lines() {
        rows.push(vec![
            button(format!("➖ {}", line.item.name), CallbackAction::Decrease(line.item.id.clone())),
            button(format!("➕ x{}", line.quantity), CallbackAction::Increase(line.item.id.clone())),
        ]);
    }

    rows.push(vec![button("🛒 Checkout", CallbackAction::Checkout)]);
    rows.extend(admin_row(role));
    Keyboard::new(rows)
}

pub fn payment_keyboard() -> Keyboard {
    Keyboard::new(vec![
        vec![
            button("💵 Cash", CallbackAction::Pay(PaymentMethod::Cash)),
            button("📱 QRIS", CallbackAction::Pay(PaymentMethod::Qris)),
        ],
        vec![button("⬅️ Kembali ke Menu", CallbackAction::BackToMenu)],
    ])
}

pub fn cash_keyboard() -> Keyboard {
    Keyboard::single(button("❌ Batal", CallbackAction::BackToCheckout))
}

pub fn next_action_keyboard() -> Keyboard {
    Keyboard::new(vec![
        vec![button("👤 Pelanggan Baru", CallbackAction::NewCustomer)],
        vec![button("➕ Tambah Item (Pelanggan Sama)", CallbackAction::AddMoreItems)],
        vec![button("🚪 Selesai Sesi (Tutup Toko)", CallbackAction::EndSession)],
    ])
}

pub fn admin_keyboard() -> Keyboard {
    Keyboard::new(vec![
        vec![button("📊 Rekap Penjualan", CallbackAction::AdminSummary)],
        vec![button("🗑️ Reset Data Harian", CallbackAction::AdminReset)],
        vec![button("🔙 Kembali", CallbackAction::Refresh)],
    ])
}

pub fn reset_confirm_keyboard() -> Keyboard {
    Keyboard::new(vec![vec![
        button("✅ Ya, hapus semua", CallbackAction::AdminResetConfirm),
        button("❌ Batal", CallbackAction::AdminPanel),
    ]])
}

pub fn back_to_admin_keyboard() -> Keyboard {
    Keyboard::single(button("🔙 Kembali", CallbackAction::AdminPanel))
}
