//! Pending invoice ledger.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use carhub_core::result::AppResult;
use carhub_core::traits::catalog::{InvoiceIssuer, IssuedInvoice};
use carhub_core::types::{BookingToken, InvoiceId, Money};

/// An invoice awaiting payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingInvoice {
    /// Invoice ID.
    pub invoice_id: InvoiceId,
    /// Token handed out alongside the invoice.
    pub token: BookingToken,
    /// Amount due.
    pub amount: Money,
    /// When the invoice was issued.
    pub issued_at: DateTime<Utc>,
}

/// Keeps issued invoices in memory.
///
/// Invoices outlive their holds; settling or voiding them belongs to the
/// payment flow.
#[derive(Debug, Default)]
pub struct InMemoryInvoiceLedger {
    invoices: DashMap<InvoiceId, PendingInvoice>,
}

impl InMemoryInvoiceLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up an issued invoice.
    pub fn get(&self, invoice_id: InvoiceId) -> Option<PendingInvoice> {
        self.invoices.get(&invoice_id).map(|entry| entry.value().clone())
    }

    /// Number of invoices issued.
    pub fn len(&self) -> usize {
        self.invoices.len()
    }

    /// Whether no invoice has been issued.
    pub fn is_empty(&self) -> bool {
        self.invoices.is_empty()
    }
}

#[async_trait]
impl InvoiceIssuer for InMemoryInvoiceLedger {
    async fn issue_pending_invoice(&self, amount: Money) -> AppResult<IssuedInvoice> {
        let invoice = PendingInvoice {
            invoice_id: InvoiceId::new(),
            token: BookingToken::new(),
            amount,
            issued_at: Utc::now(),
        };

        info!(invoice_id = %invoice.invoice_id, amount = %amount, "Pending invoice issued");

        let issued = IssuedInvoice {
            invoice_id: invoice.invoice_id,
            token_seed: invoice.token,
        };
        self.invoices.insert(invoice.invoice_id, invoice);
        Ok(issued)
    }
}
