//! Rewards domain: tests for the wallet and shop purchases.

use bevy::ecs::message::Messages;
use bevy::prelude::*;

use super::{
    Currency, CurrencyGainedEvent, CurrencySource, PurchaseRequest, PurchaseResult,
    RewardsPlugin, Wallet, try_purchase,
};
use crate::content::RunDefs;
use crate::progression::{ActiveRun, RunManager, install_run_manager};

fn request(price: u32) -> PurchaseRequest {
    PurchaseRequest {
        item: "Potion".to_string(),
        price,
        currency: Currency::Gold,
    }
}

// -----------------------------------------------------------------------------
// Wallet
// -----------------------------------------------------------------------------

#[test]
fn test_wallet_spend_and_reset() {
    let mut wallet = Wallet::default();
    wallet.add(Currency::Gold, 50);
    wallet.add(Currency::Gems, 3);

    assert!(wallet.can_afford(Currency::Gold, 50));
    assert!(wallet.spend(Currency::Gold, 30));
    assert_eq!(wallet.gold, 20);
    assert!(!wallet.spend(Currency::Gold, 30));
    assert_eq!(wallet.gold, 20);

    wallet.reset_gold();
    assert_eq!(wallet.gold, 0);
    assert_eq!(wallet.gems, 3);
}

#[test]
fn test_wallet_add_saturates() {
    let mut wallet = Wallet {
        gold: u32::MAX - 1,
        gems: 0,
    };
    wallet.add(Currency::Gold, 10);
    assert_eq!(wallet.gold, u32::MAX);
}

// -----------------------------------------------------------------------------
// Shop
// -----------------------------------------------------------------------------

#[test]
fn test_try_purchase_spends_exact_price() {
    let mut run: RunManager<u32> = RunManager::new(RunDefs::default(), 1);
    run.add_gold(50);

    assert!(try_purchase(&mut run, &request(30)));
    assert_eq!(run.gold(), 20);
    assert!(!try_purchase(&mut run, &request(30)));
    assert_eq!(run.gold(), 20);
}

#[test]
fn test_purchase_with_gems() {
    let mut run: RunManager<u32> = RunManager::new(RunDefs::default(), 1);
    run.add_gold(100);
    let gem_request = PurchaseRequest {
        currency: Currency::Gems,
        ..request(1)
    };

    assert!(!try_purchase(&mut run, &gem_request));
    assert_eq!(run.gold(), 100);
}

fn rewards_app() -> App {
    let mut app = App::new();
    app.add_plugins(RewardsPlugin);
    install_run_manager(app.world_mut(), RunManager::new(RunDefs::default(), 1));
    app
}

fn drain_results(app: &mut App) -> Vec<PurchaseResult> {
    app.world_mut()
        .resource_mut::<Messages<PurchaseResult>>()
        .drain()
        .collect()
}

#[test]
fn test_currency_events_credit_the_active_run() {
    let mut app = rewards_app();
    app.world_mut().write_message(CurrencyGainedEvent {
        currency: Currency::Gems,
        amount: 4,
        source: CurrencySource::EnemyDrop,
    });

    app.update();

    assert_eq!(app.world().resource::<ActiveRun>().gems(), 4);
}

#[test]
fn test_purchase_requests_report_results() {
    let mut app = rewards_app();
    app.world_mut().resource_mut::<ActiveRun>().add_gold(50);
    app.world_mut().write_message(request(30));
    app.world_mut().write_message(request(30));

    app.update();

    let results = drain_results(&mut app);
    assert_eq!(
        results.iter().map(|r| r.success).collect::<Vec<_>>(),
        vec![true, false]
    );
    assert_eq!(app.world().resource::<ActiveRun>().gold(), 20);
}
