//! Append-only money movement records.
//!
//! Every settlement event writes signed entries keyed by a deterministic
//! causation id, so replaying a webhook or retrying an outbox operation never
//! records money twice. Amounts are integer cents; positive entries move
//! money toward the platform, negative entries away from it.

use sea_orm::ConnectionTrait;

use entity::sea_orm_active_enums::LedgerEntryType;

use crate::{
    data::ledger::{LedgerRepository, NewLedgerEntry},
    error::Error,
};

pub struct LedgerService<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> LedgerService<'a, C> {
    /// Creates a new instance of [`LedgerService`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Initial settlement of a captured payment: the gross amount in, the
    /// platform fee out. A zero platform fee writes no fee entry.
    pub async fn record_settlement(&self, payment: &entity::payment::Model) -> Result<(), Error> {
        self.append(
            payment,
            LedgerEntryType::Gross,
            payment.gross_cents,
            format!("{}:gross", payment.id),
        )
        .await?;

        if payment.platform_fee_cents != 0 {
            self.append(
                payment,
                LedgerEntryType::PlatformFee,
                -payment.platform_fee_cents,
                format!("{}:platform_fee", payment.id),
            )
            .await?;
        }

        Ok(())
    }

    /// Final processor fee reported with the capture.
    pub async fn record_processor_fee(
        &self,
        payment: &entity::payment::Model,
        fee_cents: i64,
    ) -> Result<(), Error> {
        if fee_cents == 0 {
            return Ok(());
        }

        self.append(
            payment,
            LedgerEntryType::ProcessorFeesFinal,
            -fee_cents,
            format!("{}:processor_fees_final", payment.id),
        )
        .await
    }

    /// Late processor fee correction. The sequence number distinguishes
    /// successive adjustments to the same payment.
    pub async fn record_processor_fee_adjustment(
        &self,
        payment: &entity::payment::Model,
        delta_cents: i64,
        sequence: u32,
    ) -> Result<(), Error> {
        self.append(
            payment,
            LedgerEntryType::ProcessorFeesAdjustment,
            -delta_cents,
            format!("{}:processor_fees_adjustment:{sequence}", payment.id),
        )
        .await
    }

    /// Refund reversal entries. A full refund (`amount_cents` None) reverses
    /// the gross not already returned by prior partial refunds, the platform
    /// fee, and any processor fees, netting the payment's balance to zero.
    /// When no settlement entries exist the payment's pricing snapshot stands
    /// in for the recorded amounts. A partial refund reverses only the
    /// requested gross amount. `refund_ref` is the caller's stable reference
    /// for this refund and keys the causation ids.
    pub async fn record_refund(
        &self,
        payment: &entity::payment::Model,
        amount_cents: Option<i64>,
        refund_ref: &str,
    ) -> Result<(), Error> {
        let entries = LedgerRepository::new(self.db)
            .list_for_payment(&payment.id)
            .await?;

        match amount_cents {
            Some(amount) => {
                self.append(
                    payment,
                    LedgerEntryType::RefundGross,
                    -amount,
                    format!("{}:refund:{refund_ref}:gross", payment.id),
                )
                .await?;
            }
            None => {
                // Reverse what was actually recorded, falling back to the
                // payment snapshot when settlement entries are missing.
                let settled = !entries.is_empty();

                let gross: i64 = if settled {
                    entries
                        .iter()
                        .filter(|e| e.entry_type == LedgerEntryType::Gross)
                        .map(|e| e.amount_cents)
                        .sum()
                } else {
                    payment.gross_cents
                };

                // RefundGross entries are negative; adding them leaves the
                // amount a prior partial refund has not already returned.
                let refunded: i64 = entries
                    .iter()
                    .filter(|e| e.entry_type == LedgerEntryType::RefundGross)
                    .map(|e| e.amount_cents)
                    .sum();
                let remaining = (gross + refunded).max(0);

                let platform_fee: i64 = if settled {
                    entries
                        .iter()
                        .filter(|e| e.entry_type == LedgerEntryType::PlatformFee)
                        .map(|e| e.amount_cents)
                        .sum()
                } else {
                    -payment.platform_fee_cents
                };

                let processor_fees: i64 = if settled {
                    entries
                        .iter()
                        .filter(|e| {
                            matches!(
                                e.entry_type,
                                LedgerEntryType::ProcessorFeesFinal
                                    | LedgerEntryType::ProcessorFeesAdjustment
                            )
                        })
                        .map(|e| e.amount_cents)
                        .sum()
                } else {
                    -payment.processor_fee_cents.unwrap_or(0)
                };

                if remaining != 0 {
                    self.append(
                        payment,
                        LedgerEntryType::RefundGross,
                        -remaining,
                        format!("{}:refund:{refund_ref}:gross", payment.id),
                    )
                    .await?;
                }

                if platform_fee != 0 {
                    self.append(
                        payment,
                        LedgerEntryType::RefundPlatformFeeReversal,
                        -platform_fee,
                        format!("{}:refund:{refund_ref}:platform_fee", payment.id),
                    )
                    .await?;
                }

                if processor_fees != 0 {
                    self.append(
                        payment,
                        LedgerEntryType::RefundProcessorFeesReversal,
                        -processor_fees,
                        format!("{}:refund:{refund_ref}:processor_fees", payment.id),
                    )
                    .await?;
                }
            }
        }

        Ok(())
    }

    /// Chargeback loss: the gross leaves with the dispute, the platform fee
    /// comes back.
    pub async fn record_chargeback(&self, payment: &entity::payment::Model) -> Result<(), Error> {
        self.append(
            payment,
            LedgerEntryType::ChargebackGross,
            -payment.gross_cents,
            format!("{}:chargeback:gross", payment.id),
        )
        .await?;

        if payment.platform_fee_cents != 0 {
            self.append(
                payment,
                LedgerEntryType::ChargebackPlatformFeeReversal,
                payment.platform_fee_cents,
                format!("{}:chargeback:platform_fee", payment.id),
            )
            .await?;
        }

        Ok(())
    }

    pub async fn record_dispute_fee(
        &self,
        payment: &entity::payment::Model,
        fee_cents: i64,
    ) -> Result<(), Error> {
        if fee_cents == 0 {
            return Ok(());
        }

        self.append(
            payment,
            LedgerEntryType::DisputeFee,
            -fee_cents,
            format!("{}:dispute_fee", payment.id),
        )
        .await
    }

    /// Written when a dispute resolves in the platform's favor and the
    /// processor returns the dispute fee.
    pub async fn record_dispute_fee_reversal(
        &self,
        payment: &entity::payment::Model,
        fee_cents: i64,
    ) -> Result<(), Error> {
        if fee_cents == 0 {
            return Ok(());
        }

        self.append(
            payment,
            LedgerEntryType::DisputeFeeReversal,
            fee_cents,
            format!("{}:dispute_fee_reversal", payment.id),
        )
        .await
    }

    pub async fn balance(&self, payment_id: &str) -> Result<i64, Error> {
        Ok(LedgerRepository::new(self.db).balance(payment_id).await?)
    }

    async fn append(
        &self,
        payment: &entity::payment::Model,
        entry_type: LedgerEntryType,
        amount_cents: i64,
        causation_id: String,
    ) -> Result<(), Error> {
        LedgerRepository::new(self.db)
            .append(NewLedgerEntry {
                payment_id: payment.id.clone(),
                entry_type,
                amount_cents,
                currency: payment.currency.clone(),
                source_type: payment.source_type,
                source_id: payment.source_id,
                causation_id,
                correlation_id: Some(format!("payment:{}", payment.id)),
            })
            .await?;

        Ok(())
    }
}
