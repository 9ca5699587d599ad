//! Pool service: validation, split previews and period generation.

use chrono::Utc;
use subpool_shared::types::{PoolId, PoolLineId, PoolMemberId, PoolPeriodId};
use tracing::debug;

use crate::charge::Charge;
use crate::pool::error::{MAX_CONTACT_LEN, MAX_DISPLAY_NAME_LEN, MAX_TITLE_LEN, PoolError};
use crate::pool::types::{
    CreatePoolInput, CreatePoolMemberInput, LineStatus, Pool, PoolLine, PoolMember, PoolPeriod,
};
use crate::split::{SplitMember, SplitOptions, SplitResult, calculate_split};

/// Pool service for business logic.
pub struct PoolService;

impl PoolService {
    /// Validate pool creation input.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::EmptyTitle` or `PoolError::TitleTooLong` for a bad title.
    /// Returns `PoolError::InvalidSeatTotal` if a seat total below 1 is given.
    pub fn validate_pool(input: &CreatePoolInput) -> Result<(), PoolError> {
        if input.title.trim().is_empty() {
            return Err(PoolError::EmptyTitle);
        }
        if input.title.chars().count() > MAX_TITLE_LEN {
            return Err(PoolError::TitleTooLong);
        }
        if let Some(seat_total) = input.seat_total {
            if seat_total < 1 || u32::try_from(seat_total).is_err() {
                return Err(PoolError::InvalidSeatTotal(seat_total));
            }
        }
        Ok(())
    }

    /// Build a new active pool from validated input.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure from [`Self::validate_pool`].
    pub fn create_pool(input: CreatePoolInput) -> Result<Pool, PoolError> {
        Self::validate_pool(&input)?;
        Ok(Pool {
            id: PoolId::new(),
            subscription_id: input.subscription_id,
            title: input.title,
            split_policy: input.split_policy,
            seat_total: input.seat_total.and_then(|s| u32::try_from(s).ok()),
            rounding_mode: input.rounding_mode,
            remainder_to: input.remainder_to,
            active: true,
        })
    }

    /// Validate member input.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::EmptyDisplayName`, `PoolError::DisplayNameTooLong`,
    /// `PoolError::ContactTooLong` or `PoolError::NegativeValue`.
    pub fn validate_member(input: &CreatePoolMemberInput) -> Result<(), PoolError> {
        if input.display_name.trim().is_empty() {
            return Err(PoolError::EmptyDisplayName);
        }
        if input.display_name.chars().count() > MAX_DISPLAY_NAME_LEN {
            return Err(PoolError::DisplayNameTooLong);
        }
        if input
            .contact
            .as_ref()
            .is_some_and(|c| c.chars().count() > MAX_CONTACT_LEN)
        {
            return Err(PoolError::ContactTooLong);
        }
        if let Some(value) = input.value.filter(|v| *v < 0) {
            return Err(PoolError::NegativeValue(value));
        }
        Ok(())
    }

    /// Build a member of `pool` from validated input.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure from [`Self::validate_member`].
    pub fn add_member(pool: &Pool, input: CreatePoolMemberInput) -> Result<PoolMember, PoolError> {
        Self::validate_member(&input)?;
        Ok(PoolMember {
            id: PoolMemberId::new(),
            pool_id: pool.id,
            display_name: input.display_name,
            contact: input.contact,
            value: input.value,
            active: input.active,
        })
    }

    /// Split options derived from the pool's stored configuration.
    #[must_use]
    pub fn split_options(pool: &Pool) -> SplitOptions {
        let options = SplitOptions::default()
            .with_rounding_mode(pool.rounding_mode)
            .with_remainder_to(pool.remainder_to);
        match pool.seat_total {
            Some(seat_total) => options.with_seat_total(seat_total),
            None => options,
        }
    }

    /// Allocation preview for the pool's active members.
    ///
    /// Used to show the split before the pool or its members are saved.
    #[must_use]
    pub fn preview(pool: &Pool, members: &[PoolMember], total: i64) -> Vec<SplitResult> {
        let active: Vec<&PoolMember> = members.iter().filter(|m| m.active).collect();
        calculate_split(
            &to_split_members(&active),
            total,
            pool.split_policy,
            Self::split_options(pool),
        )
    }

    /// Generate the pool's period for `charge`: one pending line per active member.
    #[must_use]
    pub fn generate_period(pool: &Pool, members: &[PoolMember], charge: &Charge) -> PoolPeriod {
        let active: Vec<&PoolMember> = members.iter().filter(|m| m.active).collect();
        let splits = calculate_split(
            &to_split_members(&active),
            charge.amount,
            pool.split_policy,
            Self::split_options(pool),
        );

        let period_id = PoolPeriodId::new();
        let lines: Vec<PoolLine> = active
            .iter()
            .zip(splits)
            .map(|(member, split)| PoolLine {
                id: PoolLineId::new(),
                pool_period_id: period_id,
                pool_member_id: member.id,
                display_name: split.display_name,
                amount_due: split.amount,
                status: LineStatus::Pending,
                note: None,
                paid_at: None,
            })
            .collect();

        let period_key = charge.charge_date.format("%Y-%m").to_string();
        debug!(
            pool_id = %pool.id,
            charge_id = %charge.id,
            %period_key,
            policy = %pool.split_policy,
            lines = lines.len(),
            "Generated pool period"
        );

        PoolPeriod {
            id: period_id,
            pool_id: pool.id,
            charge_id: charge.id,
            period_key,
            total_amount: charge.amount,
            currency: charge.currency,
            generated_at: Utc::now(),
            lines,
        }
    }

    /// Mark a pending line as paid.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::InvalidLineTransition` if the line is not pending.
    pub fn mark_line_paid(line: &mut PoolLine) -> Result<(), PoolError> {
        Self::transition(line, LineStatus::Paid)?;
        line.paid_at = Some(Utc::now());
        Ok(())
    }

    /// Waive a pending line, optionally recording why.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::InvalidLineTransition` if the line is not pending.
    pub fn mark_line_waived(line: &mut PoolLine, note: Option<String>) -> Result<(), PoolError> {
        Self::transition(line, LineStatus::Waived)?;
        line.note = note;
        Ok(())
    }

    fn transition(line: &mut PoolLine, to: LineStatus) -> Result<(), PoolError> {
        match line.status {
            LineStatus::Pending => {
                line.status = to;
                Ok(())
            }
            from => Err(PoolError::InvalidLineTransition { from, to }),
        }
    }
}

fn to_split_members(members: &[&PoolMember]) -> Vec<SplitMember> {
    members
        .iter()
        .map(|m| SplitMember {
            id: m.id.to_string(),
            display_name: m.display_name.clone(),
            value: m.value.map(Into::into),
        })
        .collect()
}
