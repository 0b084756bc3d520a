use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entity::LedgerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Success,
    Failed,
}

impl TransactionStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Self::Pending => write!(f, "Pending"),
            Self::Success => write!(f, "Success"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenAmount {
    pub symbol: String,
    pub amount: String,
}

impl TokenAmount {
    pub fn new(symbol: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            amount: amount.into(),
        }
    }
}

/// One swap attempt as recorded in the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub timestamp: i64, // Milliseconds since the Unix epoch
    pub from_token: TokenAmount,
    pub to_token: TokenAmount,
    pub status: TransactionStatus,
    pub network: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_explorer_url: Option<String>,
}

impl Transaction {
    pub fn pending(from_token: TokenAmount, to_token: TokenAmount, network: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now().timestamp_millis(),
            from_token,
            to_token,
            status: TransactionStatus::Pending,
            network,
            block_explorer_url: None,
        }
    }

    /// Moves a pending entry to a terminal status. The explorer URL is only
    /// attached on success.
    pub fn settle(
        &mut self,
        status: TransactionStatus,
        block_explorer_url: Option<String>,
    ) -> Result<(), LedgerError> {
        if self.status.is_terminal() || !status.is_terminal() {
            return Err(LedgerError::InvalidTransition {
                id: self.id.clone(),
                from: self.status,
                to: status,
            });
        }

        self.status = status;
        if status == TransactionStatus::Success {
            self.block_explorer_url = block_explorer_url;
        }

        Ok(())
    }

    pub fn executed_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}
