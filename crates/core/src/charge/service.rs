//! Charge service: creates charges and splits them across pools.

use chrono::{NaiveDate, Utc};
use subpool_shared::types::ChargeId;
use tracing::{debug, info};

use crate::charge::error::ChargeError;
use crate::charge::types::{Charge, ChargeBatch, ChargeStatus, PoolWithMembers, Subscription};
use crate::pool::PoolService;

/// Charge service for business logic.
pub struct ChargeService;

impl ChargeService {
    /// Create a charge for `subscription` on `charge_date` and one pool period
    /// for every active pool.
    ///
    /// Inactive pools are skipped. Each period bills only the pool's active
    /// members.
    ///
    /// # Errors
    ///
    /// Returns `ChargeError::Archived` if the subscription is archived.
    /// Returns `ChargeError::InvalidAmount` if the amount is not positive.
    /// Returns `ChargeError::PoolSubscriptionMismatch` if a pool belongs to
    /// another subscription.
    pub fn create_charge(
        subscription: &Subscription,
        charge_date: NaiveDate,
        pools: &[PoolWithMembers],
    ) -> Result<ChargeBatch, ChargeError> {
        if subscription.archived {
            return Err(ChargeError::Archived(subscription.id));
        }
        if subscription.amount <= 0 {
            return Err(ChargeError::InvalidAmount(subscription.amount));
        }
        if let Some(foreign) = pools
            .iter()
            .find(|p| p.pool.subscription_id != subscription.id)
        {
            return Err(ChargeError::PoolSubscriptionMismatch {
                pool_id: foreign.pool.id,
                subscription_id: subscription.id,
            });
        }

        let charge = Charge {
            id: ChargeId::new(),
            subscription_id: subscription.id,
            charge_date,
            amount: subscription.amount,
            currency: subscription.currency,
            status: ChargeStatus::Pending,
            paid_at: None,
        };

        let periods: Vec<_> = pools
            .iter()
            .filter(|p| {
                if !p.pool.active {
                    debug!(pool_id = %p.pool.id, "Skipping inactive pool");
                }
                p.pool.active
            })
            .map(|p| PoolService::generate_period(&p.pool, &p.members, &charge))
            .collect();

        info!(
            subscription = %subscription.name,
            charge_id = %charge.id,
            amount = %charge.money(),
            periods = periods.len(),
            "Created charge"
        );

        Ok(ChargeBatch { charge, periods })
    }

    /// Mark a pending charge as paid.
    ///
    /// # Errors
    ///
    /// Returns `ChargeError::AlreadyPaid` if the charge is already paid.
    pub fn mark_paid(charge: &mut Charge) -> Result<(), ChargeError> {
        if charge.status == ChargeStatus::Paid {
            return Err(ChargeError::AlreadyPaid);
        }
        charge.status = ChargeStatus::Paid;
        charge.paid_at = Some(Utc::now());
        Ok(())
    }
}
