//! Rewards domain: currencies and shop purchases.

mod economy;
mod shop;

#[cfg(test)]
mod tests;

pub use economy::{Currency, CurrencyGainedEvent, CurrencySource, Wallet};
pub use shop::{PurchaseRequest, PurchaseResult, try_purchase};

use bevy::prelude::*;

use crate::rewards::economy::process_currency_events;
use crate::rewards::shop::process_purchase_requests;

pub struct RewardsPlugin;

impl Plugin for RewardsPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<CurrencyGainedEvent>()
            .add_message::<PurchaseRequest>()
            .add_message::<PurchaseResult>()
            .add_systems(
                Update,
                (process_currency_events, process_purchase_requests).chain(),
            );
    }
}
