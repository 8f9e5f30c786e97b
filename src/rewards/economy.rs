//! Rewards domain: run currencies and currency events.

use std::fmt;

use bevy::ecs::message::{Message, MessageReader};
use bevy::prelude::*;

use crate::progression::ActiveRun;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Currency {
    /// Lost on death
    Gold,
    /// Kept across deaths
    Gems,
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::Gold => write!(f, "gold"),
            Currency::Gems => write!(f, "gems"),
        }
    }
}

/// Balances held by the run manager.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Wallet {
    pub gold: u32,
    pub gems: u32,
}

impl Wallet {
    pub fn balance(&self, currency: Currency) -> u32 {
        match currency {
            Currency::Gold => self.gold,
            Currency::Gems => self.gems,
        }
    }

    fn slot(&mut self, currency: Currency) -> &mut u32 {
        match currency {
            Currency::Gold => &mut self.gold,
            Currency::Gems => &mut self.gems,
        }
    }

    pub fn add(&mut self, currency: Currency, amount: u32) {
        let slot = self.slot(currency);
        *slot = slot.saturating_add(amount);
    }

    /// Subtract `amount` only when the balance covers it.
    pub fn spend(&mut self, currency: Currency, amount: u32) -> bool {
        if self.can_afford(currency, amount) {
            *self.slot(currency) -= amount;
            true
        } else {
            false
        }
    }

    pub fn can_afford(&self, currency: Currency, amount: u32) -> bool {
        self.balance(currency) >= amount
    }

    pub fn reset_gold(&mut self) {
        self.gold = 0;
    }
}

/// Source of currency gain for tracking/analytics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrencySource {
    EnemyDrop,
    Debug,
}

/// Event fired when the player gains currency
#[derive(Debug)]
pub struct CurrencyGainedEvent {
    pub currency: Currency,
    pub amount: u32,
    pub source: CurrencySource,
}

impl Message for CurrencyGainedEvent {}

/// Credit currency events to the active run
pub(crate) fn process_currency_events(
    mut events: MessageReader<CurrencyGainedEvent>,
    run: Option<ResMut<ActiveRun>>,
) {
    let Some(mut run) = run else {
        for event in events.read() {
            warn!("No active run; dropping {:?}", event);
        }
        return;
    };

    for event in events.read() {
        debug!("{} {} from {:?}", event.amount, event.currency, event.source);
        match event.currency {
            Currency::Gold => run.add_gold(event.amount),
            Currency::Gems => run.add_gems(event.amount),
        }
    }
}
