use sea_orm::entity::prelude::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum RegistrationStatus {
    #[sea_orm(string_value = "MATCHMAKING")]
    Matchmaking,
    #[sea_orm(string_value = "PENDING_PARTNER")]
    PendingPartner,
    #[sea_orm(string_value = "CONFIRMED")]
    Confirmed,
    #[sea_orm(string_value = "CANCELLED")]
    Cancelled,
    #[sea_orm(string_value = "EXPIRED")]
    Expired,
}

impl RegistrationStatus {
    /// Terminal statuses are excluded from capacity counts and accept no
    /// further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Expired)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum PaymentMode {
    /// One payer covers both slots.
    #[sea_orm(string_value = "SINGLE")]
    Single,
    /// Each player pays their own leg independently.
    #[sea_orm(string_value = "SPLIT")]
    Split,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum JoinMode {
    /// Creator names a specific partner; slot filled via invite token.
    #[sea_orm(string_value = "INVITE_PARTNER")]
    InvitePartner,
    /// Open pairing, publicly joinable.
    #[sea_orm(string_value = "LOOKING_FOR_PARTNER")]
    LookingForPartner,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum GuaranteeStatus {
    #[sea_orm(string_value = "NONE")]
    None,
    /// A captured deposit secures the outstanding second leg.
    #[sea_orm(string_value = "ARMED")]
    Armed,
    /// The automatic second charge was attempted and failed.
    #[sea_orm(string_value = "FAILED")]
    Failed,
    /// The deadline passed without a chargeable second leg.
    #[sea_orm(string_value = "EXPIRED")]
    Expired,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum SlotRole {
    #[sea_orm(string_value = "CAPTAIN")]
    Captain,
    #[sea_orm(string_value = "PARTNER")]
    Partner,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum SlotStatus {
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "FILLED")]
    Filled,
    #[sea_orm(string_value = "CANCELLED")]
    Cancelled,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum SlotPaymentStatus {
    #[sea_orm(string_value = "UNPAID")]
    Unpaid,
    #[sea_orm(string_value = "PAID")]
    Paid,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum WaitlistStatus {
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "PROMOTED")]
    Promoted,
    #[sea_orm(string_value = "CANCELLED")]
    Cancelled,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum PaymentStatus {
    #[sea_orm(string_value = "CREATED")]
    Created,
    #[sea_orm(string_value = "REQUIRES_ACTION")]
    RequiresAction,
    #[sea_orm(string_value = "PROCESSING")]
    Processing,
    #[sea_orm(string_value = "SUCCEEDED")]
    Succeeded,
    #[sea_orm(string_value = "FAILED")]
    Failed,
    #[sea_orm(string_value = "CANCELLED")]
    Cancelled,
    #[sea_orm(string_value = "PARTIAL_REFUND")]
    PartialRefund,
    #[sea_orm(string_value = "REFUNDED")]
    Refunded,
    #[sea_orm(string_value = "DISPUTED")]
    Disputed,
    #[sea_orm(string_value = "CHARGEBACK_WON")]
    ChargebackWon,
    #[sea_orm(string_value = "CHARGEBACK_LOST")]
    ChargebackLost,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum SourceType {
    #[sea_orm(string_value = "REGISTRATION")]
    Registration,
    #[sea_orm(string_value = "TICKET_ORDER")]
    TicketOrder,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(48))")]
pub enum LedgerEntryType {
    #[sea_orm(string_value = "GROSS")]
    Gross,
    #[sea_orm(string_value = "PLATFORM_FEE")]
    PlatformFee,
    #[sea_orm(string_value = "PROCESSOR_FEES_FINAL")]
    ProcessorFeesFinal,
    #[sea_orm(string_value = "PROCESSOR_FEES_ADJUSTMENT")]
    ProcessorFeesAdjustment,
    #[sea_orm(string_value = "REFUND_GROSS")]
    RefundGross,
    #[sea_orm(string_value = "REFUND_PLATFORM_FEE_REVERSAL")]
    RefundPlatformFeeReversal,
    #[sea_orm(string_value = "REFUND_PROCESSOR_FEES_REVERSAL")]
    RefundProcessorFeesReversal,
    #[sea_orm(string_value = "CHARGEBACK_GROSS")]
    ChargebackGross,
    #[sea_orm(string_value = "CHARGEBACK_PLATFORM_FEE_REVERSAL")]
    ChargebackPlatformFeeReversal,
    #[sea_orm(string_value = "DISPUTE_FEE")]
    DisputeFee,
    #[sea_orm(string_value = "DISPUTE_FEE_REVERSAL")]
    DisputeFeeReversal,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum EntitlementType {
    #[sea_orm(string_value = "TOURNAMENT_ENTRY")]
    TournamentEntry,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum EntitlementStatus {
    #[sea_orm(string_value = "ACTIVE")]
    Active,
    #[sea_orm(string_value = "SUSPENDED")]
    Suspended,
    #[sea_orm(string_value = "REVOKED")]
    Revoked,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum OperationStatus {
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
    #[sea_orm(string_value = "FAILED")]
    Failed,
}
