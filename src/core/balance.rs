//! Per-account balance derivation for a single month.

use std::collections::HashMap;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::summary::AccountBalance;

/// One allocation row joined to its account name.
#[derive(Debug, Clone)]
pub struct AllocationLine {
    pub account_id: Uuid,
    pub account_name: String,
    pub amount: Decimal,
}

/// One transaction row reduced to its paid-from account.
#[derive(Debug, Clone)]
pub struct SpendLine {
    pub account_id: Uuid,
    pub amount: Decimal,
}

/// Sums allocations and spend per account and derives the remainder.
///
/// Allocations are grouped by account across entries, so several income or
/// credit entries funding the same account collapse into one row. Only funded
/// accounts produce a row: spend against an account with no allocation this
/// month is invisible here, though it still counts in month totals and the
/// category rollup.
pub fn compute_account_balances(
    allocations: &[AllocationLine],
    spend: &[SpendLine],
) -> Vec<AccountBalance> {
    let mut order: Vec<Uuid> = Vec::new();
    let mut allocated: HashMap<Uuid, (String, Decimal)> = HashMap::new();
    for line in allocations {
        let slot = allocated.entry(line.account_id).or_insert_with(|| {
            order.push(line.account_id);
            (line.account_name.clone(), Decimal::ZERO)
        });
        slot.1 += line.amount;
    }

    let mut spent: HashMap<Uuid, Decimal> = HashMap::new();
    for line in spend {
        *spent.entry(line.account_id).or_insert(Decimal::ZERO) += line.amount;
    }

    order
        .into_iter()
        .filter_map(|account_id| {
            allocated.remove(&account_id).map(|(account_name, funded)| {
                let drawn = spent.get(&account_id).copied().unwrap_or(Decimal::ZERO);
                AccountBalance {
                    account_id,
                    account_name,
                    allocated: funded,
                    spent: drawn,
                    remaining: funded - drawn,
                }
            })
        })
        .collect()
}
