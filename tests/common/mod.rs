#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use hearth_core::config::Config;
use hearth_core::core::services::{
    AccountService, AllocationInput, CategoryService, FundingService, HouseholdService,
    NewBudgetItem, NewTransaction,
};
use hearth_core::domain::{CategoryKind, FundingKind, Month, Session};
use hearth_core::store::EntityStore;

/// One registered household with two accounts and three categories.
pub struct Harness {
    pub store: EntityStore,
    pub session: Session,
    pub primary_account: Uuid,
    pub savings_account: Uuid,
    pub housing: Uuid,
    pub groceries: Uuid,
    pub entertainment: Uuid,
}

pub fn harness() -> Harness {
    let mut store = EntityStore::new();
    let session =
        HouseholdService::register(&mut store, &Config::default(), "Sharma", Uuid::new_v4())
            .expect("registration succeeds");
    let primary_account = AccountService::list(&store, &session).expect("list accounts")[0].id;
    let savings_account =
        AccountService::create(&mut store, &session, "Savings").expect("create account");
    let housing = CategoryService::create(&mut store, &session, "Housing", CategoryKind::Mandatory)
        .expect("create category");
    let groceries =
        CategoryService::create(&mut store, &session, "Groceries", CategoryKind::Periodic)
            .expect("create category");
    let entertainment =
        CategoryService::create(&mut store, &session, "Entertainment", CategoryKind::AdHoc)
            .expect("create category");
    Harness {
        store,
        session,
        primary_account,
        savings_account,
        housing,
        groceries,
        entertainment,
    }
}

pub fn month(token: &str) -> Month {
    token.parse().expect("valid month token")
}

pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

pub fn income(
    harness: &mut Harness,
    token: &str,
    total: Decimal,
    splits: &[(Uuid, Decimal)],
) -> Uuid {
    let allocations: Vec<AllocationInput> = splits
        .iter()
        .map(|&(account_id, amount)| AllocationInput { account_id, amount })
        .collect();
    FundingService::create_entry(
        &mut harness.store,
        &harness.session,
        FundingKind::Income,
        month(token),
        None,
        total,
        &allocations,
    )
    .expect("income entry persists")
}

pub fn budget_item(
    token: &str,
    description: &str,
    amount: Decimal,
    category_id: Uuid,
    account_id: Uuid,
) -> NewBudgetItem {
    NewBudgetItem {
        month: month(token),
        description: description.into(),
        amount,
        category_id,
        account_id,
        color_tag: None,
    }
}

pub fn spend(
    harness: &Harness,
    occurred_at: DateTime<Utc>,
    description: &str,
    amount: Decimal,
    category_id: Uuid,
) -> NewTransaction {
    NewTransaction {
        occurred_at,
        description: description.into(),
        amount,
        category_id,
        paid_from_account_id: harness.primary_account,
        notes: None,
        budget_item_id: None,
    }
}
