//! Funding entries (income and credits) and their account allocations.

use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::{FundAllocation, FundingEntry, FundingKind, Month, Session};
use crate::errors::CoreError;
use crate::store::EntityStore;

use super::{authorize, ensure_valid_amount, require_admin, valid_amount, ServiceResult};

/// Largest tolerated gap between an entry total and its allocation sum.
static ALLOCATION_TOLERANCE: Lazy<Decimal> = Lazy::new(|| Decimal::new(1, 2));

/// Requested split of an entry total across payment accounts.
#[derive(Debug, Clone)]
pub struct AllocationInput {
    pub account_id: Uuid,
    pub amount: Decimal,
}

/// Pure check run by the income and credit create/update paths before any
/// write: allocations must be non-empty, well-formed, and sum to the entry
/// total within tolerance.
pub fn validate_allocations(total: Decimal, allocations: &[AllocationInput]) -> ServiceResult<()> {
    if allocations.is_empty() {
        return Err(CoreError::InvalidInput(
            "at least one allocation is required".into(),
        ));
    }
    ensure_valid_amount(total)?;
    if allocations.iter().any(|a| !valid_amount(a.amount)) {
        return Err(CoreError::InvalidInput(
            "allocation amounts must be non-negative with at most two fraction digits".into(),
        ));
    }
    let allocated: Decimal = allocations.iter().map(|a| a.amount).sum();
    if (allocated - total).abs() > *ALLOCATION_TOLERANCE {
        return Err(CoreError::AllocationMismatch {
            expected: total,
            allocated,
        });
    }
    Ok(())
}

pub struct FundingService;

impl FundingService {
    /// Creates a funding entry together with its allocations in one
    /// all-or-nothing write.
    pub fn create_entry(
        store: &mut EntityStore,
        session: &Session,
        kind: FundingKind,
        month: Month,
        description: Option<String>,
        total_amount: Decimal,
        allocations: &[AllocationInput],
    ) -> ServiceResult<Uuid> {
        authorize(store, session)?;
        require_admin(session)?;
        validate_allocations(total_amount, allocations)?;
        let household = session.household_id;
        Self::ensure_accounts_exist(store, household, allocations)?;

        let entry = FundingEntry::new(household, kind, month, description, total_amount);
        let entry_id = entry.id;
        store.transact(|tx| {
            for alloc in allocations {
                tx.allocations
                    .push(FundAllocation::new(entry_id, alloc.account_id, alloc.amount));
            }
            tx.entries.push(entry);
            Ok(())
        })?;
        tracing::info!(%entry_id, %month, ?kind, "funding entry recorded");
        Ok(entry_id)
    }

    /// Replaces an entry's total, description, and allocations. The previous
    /// allocations are deleted and the new set inserted in the same write.
    pub fn update_entry(
        store: &mut EntityStore,
        session: &Session,
        entry_id: Uuid,
        description: Option<String>,
        total_amount: Decimal,
        allocations: &[AllocationInput],
    ) -> ServiceResult<()> {
        authorize(store, session)?;
        require_admin(session)?;
        validate_allocations(total_amount, allocations)?;
        let household = session.household_id;
        if store.entry(household, entry_id).is_none() {
            return Err(CoreError::NotFoundOrUnauthorized("funding entry"));
        }
        Self::ensure_accounts_exist(store, household, allocations)?;

        store.transact(|tx| {
            let entry = tx
                .entry_mut(household, entry_id)
                .ok_or(CoreError::NotFoundOrUnauthorized("funding entry"))?;
            entry.total_amount = total_amount;
            entry.description = description;
            tx.allocations.retain(|a| a.entry_id != entry_id);
            for alloc in allocations {
                tx.allocations
                    .push(FundAllocation::new(entry_id, alloc.account_id, alloc.amount));
            }
            Ok(())
        })?;
        tracing::info!(%entry_id, "funding entry replaced");
        Ok(())
    }

    /// Deletes an entry, cascading to its allocations.
    pub fn delete_entry(
        store: &mut EntityStore,
        session: &Session,
        entry_id: Uuid,
    ) -> ServiceResult<()> {
        authorize(store, session)?;
        require_admin(session)?;
        let household = session.household_id;
        if store.entry(household, entry_id).is_none() {
            return Err(CoreError::NotFoundOrUnauthorized("funding entry"));
        }
        store.transact(|tx| {
            tx.entries
                .retain(|e| !(e.household_id == household && e.id == entry_id));
            tx.allocations.retain(|a| a.entry_id != entry_id);
            Ok(())
        })?;
        tracing::info!(%entry_id, "funding entry deleted with its allocations");
        Ok(())
    }

    pub fn list_entries(
        store: &EntityStore,
        session: &Session,
        month: Month,
        kind: FundingKind,
    ) -> ServiceResult<Vec<FundingEntry>> {
        authorize(store, session)?;
        Ok(store
            .entries_for(session.household_id, month, kind)
            .into_iter()
            .cloned()
            .collect())
    }

    fn ensure_accounts_exist(
        store: &EntityStore,
        household: Uuid,
        allocations: &[AllocationInput],
    ) -> ServiceResult<()> {
        for alloc in allocations {
            if store.account(household, alloc.account_id).is_none() {
                return Err(CoreError::NotFoundOrUnauthorized("payment account"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn input(amount: Decimal) -> AllocationInput {
        AllocationInput {
            account_id: Uuid::new_v4(),
            amount,
        }
    }

    #[test]
    fn split_matching_the_total_passes() {
        let allocations = [input(dec!(3000.00)), input(dec!(2000.00))];
        validate_allocations(dec!(5000.00), &allocations).expect("exact split is valid");
    }

    #[test]
    fn split_beyond_tolerance_is_a_mismatch() {
        let allocations = [input(dec!(3000.00)), input(dec!(1999.98))];
        let err = validate_allocations(dec!(5000.00), &allocations)
            .expect_err("0.02 gap exceeds tolerance");
        match err {
            CoreError::AllocationMismatch {
                expected,
                allocated,
            } => {
                assert_eq!(expected, dec!(5000.00));
                assert_eq!(allocated, dec!(4999.98));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn one_paisa_gap_is_tolerated() {
        let allocations = [input(dec!(3000.00)), input(dec!(1999.99))];
        validate_allocations(dec!(5000.00), &allocations).expect("0.01 gap is within tolerance");
    }

    #[test]
    fn empty_allocations_are_rejected() {
        let err = validate_allocations(dec!(100.00), &[]).expect_err("must not be empty");
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }

    #[test]
    fn negative_and_over_precise_amounts_are_rejected() {
        let err = validate_allocations(dec!(10.00), &[input(dec!(-10.00))])
            .expect_err("negative amount");
        assert!(matches!(err, CoreError::InvalidInput(_)));

        let err = validate_allocations(dec!(10.00), &[input(dec!(9.999)), input(dec!(0.001))])
            .expect_err("three fraction digits");
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }
}
