//! Rewards domain: purchase requests against the run wallet.

use bevy::ecs::message::{Message, MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::progression::{ActiveRun, RunManager};
use crate::rewards::economy::Currency;

/// Request to buy an item, sent by shop interactables
#[derive(Debug, Clone)]
pub struct PurchaseRequest {
    pub item: String,
    pub price: u32,
    pub currency: Currency,
}

impl Message for PurchaseRequest {}

/// Outcome of a [`PurchaseRequest`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseResult {
    pub item: String,
    pub success: bool,
}

impl Message for PurchaseResult {}

/// Spend the request's price from the run. Returns whether the item was bought.
pub fn try_purchase<H>(run: &mut RunManager<H>, request: &PurchaseRequest) -> bool
where
    H: Copy + PartialEq + std::fmt::Debug,
{
    let bought = match request.currency {
        Currency::Gold => run.spend_gold(request.price),
        Currency::Gems => run.spend_gems(request.price),
    };
    if bought {
        info!("{} purchased with {}!", request.item, request.currency);
    } else {
        info!("Not enough {} for {}!", request.currency, request.item);
    }
    bought
}

pub(crate) fn process_purchase_requests(
    mut requests: MessageReader<PurchaseRequest>,
    mut run: Option<ResMut<ActiveRun>>,
    mut results: MessageWriter<PurchaseResult>,
) {
    for request in requests.read() {
        let success = match run.as_deref_mut() {
            Some(active) => try_purchase(&mut active.0, request),
            None => {
                warn!("No active run; cannot buy {}", request.item);
                false
            }
        };
        results.write(PurchaseResult {
            item: request.item.clone(),
            success,
        });
    }
}
