use std::fmt;

use serde_derive::Serialize;

use crate::ext::standard_accounts::{
    CLIENT_ACCOUNT_PREFIX, CLIENT_ACCOUNT_SUFFIX, REVENUE_EXEMPT, REVENUE_INTERMEDIATE,
    REVENUE_MIXED, REVENUE_REDUCED, REVENUE_STANDARD, VAT_ON_COLLECTION,
};

#[derive(Debug, PartialEq, Eq, Hash, Clone, PartialOrd, Ord, Serialize)]
pub struct AccountCode(pub(crate) String);

impl AccountCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Shorthand constructor.

pub fn account(code: impl Into<String>) -> AccountCode {
    AccountCode(code.into())
}

/// Revenue accounts, one per VAT bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevenueAccounts {
    pub reduced: AccountCode,
    pub intermediate: AccountCode,
    pub standard: AccountCode,
    pub mixed: AccountCode,
    pub exempt: AccountCode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartOfAccounts {
    /// Client accounts are `{prefix}{initial}{suffix}`.
    pub client_prefix: String,
    pub client_suffix: String,
    pub vat_on_collection: AccountCode,
    pub revenue: RevenueAccounts,
}

impl Default for RevenueAccounts {
    fn default() -> Self {
        Self {
            reduced: REVENUE_REDUCED.clone(),
            intermediate: REVENUE_INTERMEDIATE.clone(),
            standard: REVENUE_STANDARD.clone(),
            mixed: REVENUE_MIXED.clone(),
            exempt: REVENUE_EXEMPT.clone(),
        }
    }
}

impl Default for ChartOfAccounts {
    fn default() -> Self {
        Self {
            client_prefix: CLIENT_ACCOUNT_PREFIX.to_string(),
            client_suffix: CLIENT_ACCOUNT_SUFFIX.to_string(),
            vat_on_collection: VAT_ON_COLLECTION.clone(),
            revenue: RevenueAccounts::default(),
        }
    }
}

impl RevenueAccounts {
    /// Parses the comma-separated list "5.5,10,20,mixed,exempt". Lists with
    /// fewer than five entries fall back to the defaults.
    pub fn from_list(list: &str) -> Self {
        let codes: Vec<&str> = list
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .collect();
        match codes.as_slice() {
            [reduced, intermediate, standard, mixed, exempt, ..] => Self {
                reduced: account(*reduced),
                intermediate: account(*intermediate),
                standard: account(*standard),
                mixed: account(*mixed),
                exempt: account(*exempt),
            },
            _ => {
                log::warn!(
                    "revenue account list '{}' needs 5.5,10,20,mixed,exempt; using defaults",
                    list
                );
                Self::default()
            }
        }
    }
}
