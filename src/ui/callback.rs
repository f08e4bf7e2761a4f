use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use crate::domain::PaymentMethod;

/// Decoded button callback data: an action tag plus an optional menu item id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackAction {
    StartSession,
    Add(String),
    Increase(String),
    Decrease(String),
    Checkout,
    BackToMenu,
    Pay(PaymentMethod),
    BackToCheckout,
    NewCustomer,
    AddMoreItems,
    EndSession,
    Refresh,
    AdminPanel,
    AdminSummary,
    AdminReset,
    AdminResetConfirm,
}

#[derive(Debug, Clone, Error, PartialEq)]
#[error("Unknown callback data: {0}")]
pub struct UnknownCallback(pub String);

impl fmt::Display for CallbackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallbackAction::StartSession => f.write_str("start"),
            CallbackAction::Add(id) => write!(f, "add:{id}"),
            CallbackAction::Increase(id) => write!(f, "inc:{id}"),
            CallbackAction::Decrease(id) => write!(f, "dec:{id}"),
            CallbackAction::Checkout => f.write_str("checkout"),
            CallbackAction::BackToMenu => f.write_str("back_menu"),
            CallbackAction::Pay(PaymentMethod::Cash) => f.write_str("pay:cash"),
            CallbackAction::Pay(PaymentMethod::Qris) => f.write_str("pay:qris"),
            CallbackAction::BackToCheckout => f.write_str("back_checkout"),
            CallbackAction::NewCustomer => f.write_str("new_customer"),
            CallbackAction::AddMoreItems => f.write_str("add_more"),
            CallbackAction::EndSession => f.write_str("end_session"),
            CallbackAction::Refresh => f.write_str("refresh"),
            CallbackAction::AdminPanel => f.write_str("adm:panel"),
            CallbackAction::AdminSummary => f.write_str("adm:summary"),
            CallbackAction::AdminReset => f.write_str("adm:reset"),
            CallbackAction::AdminResetConfirm => f.write_str("adm:reset_ok"),
        }
    }
}

impl FromStr for CallbackAction {
    type Err = UnknownCallback;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        let unknown = || UnknownCallback(data.to_string());
        let action = match data.split_once(':') {
            Some(("add", id)) if !id.is_empty() => CallbackAction::Add(id.to_string()),
            Some(("inc", id)) if !id.is_empty() => CallbackAction::Increase(id.to_string()),
            Some(("dec", id)) if !id.is_empty() => CallbackAction::Decrease(id.to_string()),
            Some(("pay", "cash")) => CallbackAction::Pay(PaymentMethod::Cash),
            Some(("pay", "qris")) => CallbackAction::Pay(PaymentMethod::Qris),
            Some(("adm", "panel")) => CallbackAction::AdminPanel,
            Some(("adm", "summary")) => CallbackAction::AdminSummary,
            Some(("adm", "reset")) => CallbackAction::AdminReset,
            Some(("adm", "reset_ok")) => CallbackAction::AdminResetConfirm,
            Some(_) => return Err(unknown()),
            None => match data {
                "start" => CallbackAction::StartSession,
                "checkout" => CallbackAction::Checkout,
                "back_menu" => CallbackAction::BackToMenu,
                "back_checkout" => CallbackAction::BackToCheckout,
                "new_customer" => CallbackAction::NewCustomer,
                "add_more" => CallbackAction::AddMoreItems,
                "end_session" => CallbackAction::EndSession,
                "refresh" => CallbackAction::Refresh,
                _ => return Err(unknown()),
            },
        };
        Ok(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_actions_carry_the_id() {
        assert_eq!("add:og".parse::<CallbackAction>(), Ok(CallbackAction::Add("og".into())));
        assert_eq!("dec:honey".parse::<CallbackAction>(), Ok(CallbackAction::Decrease("honey".into())));
        assert_eq!(CallbackAction::Increase("cloud".into()).to_string(), "inc:cloud");
    }

    #[test]
    fn test_every_action_survives_encoding() {
        let actions = [
            CallbackAction::StartSession,
            CallbackAction::Checkout,
            CallbackAction::Pay(PaymentMethod::Qris),
            CallbackAction::AddMoreItems,
            CallbackAction::AdminResetConfirm,
        ];
        for action in actions {
            assert_eq!(action.to_string().parse::<CallbackAction>(), Ok(action));
        }
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!("add:".parse::<CallbackAction>().is_err());
        assert!("pay:card".parse::<CallbackAction>().is_err());
        assert!("item_🍵 Matcha OG".parse::<CallbackAction>().is_err());
    }
}
