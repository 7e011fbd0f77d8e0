//! External verification and payment processing
//!
//! Bank account verification, vehicle verification and bill payment are
//! performed by services outside this system. Callers submit a
//! [`ProcessRequest`] and receive a [`ProcessOutcome`] once the processor
//! has decided; there is no local timer standing in for the processor.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A request sent to an external processor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProcessRequest {
    /// Confirm ownership of a connected bank account
    VerifyBankAccount { account_id: Uuid },

    /// Confirm a vehicle's registration details
    VerifyVehicle { vehicle_id: Uuid },

    /// Settle a bill for the given amount
    PayBill { bill_id: Uuid, amount: f64 },
}

impl ProcessRequest {
    /// Identifier of the record the request is about
    pub fn target_id(&self) -> Uuid {
        match self {
            ProcessRequest::VerifyBankAccount { account_id } => *account_id,
            ProcessRequest::VerifyVehicle { vehicle_id } => *vehicle_id,
            ProcessRequest::PayBill { bill_id, .. } => *bill_id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ProcessRequest::VerifyBankAccount { .. } => "verify_bank_account",
            ProcessRequest::VerifyVehicle { .. } => "verify_vehicle",
            ProcessRequest::PayBill { .. } => "pay_bill",
        }
    }
}

/// The processor's decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ProcessOutcome {
    Approved { reference: String },
    Declined { reason: String },
}

impl ProcessOutcome {
    pub fn is_approved(&self) -> bool {
        matches!(self, ProcessOutcome::Approved { .. })
    }
}

/// Gateway to the external processors
///
/// `Err` means the processor could not be reached; a refusal is an
/// `Ok(ProcessOutcome::Declined { .. })`.
#[async_trait]
pub trait ProcessingGateway: Send + Sync {
    async fn submit(&self, request: ProcessRequest) -> Result<ProcessOutcome>;
}
