//! Default account codes from the French chart of accounts (plan comptable
//! général), nine-digit format.

use crate::entities::{account, AccountCode};
use std::sync::LazyLock;

pub static REVENUE_REDUCED: LazyLock<AccountCode> = LazyLock::new(|| account("704000000"));
pub static REVENUE_INTERMEDIATE: LazyLock<AccountCode> = LazyLock::new(|| account("704100000"));
pub static REVENUE_STANDARD: LazyLock<AccountCode> = LazyLock::new(|| account("704200000"));
pub static REVENUE_MIXED: LazyLock<AccountCode> = LazyLock::new(|| account("704300000"));
pub static REVENUE_EXEMPT: LazyLock<AccountCode> = LazyLock::new(|| account("704500000"));

/// TVA sur encaissements.
pub static VAT_ON_COLLECTION: LazyLock<AccountCode> = LazyLock::new(|| account("445740000"));

pub const CLIENT_ACCOUNT_PREFIX: &str = "4110";
pub const CLIENT_ACCOUNT_SUFFIX: &str = "0000";
pub const CLIENT_ACCOUNT_FALLBACK_INITIAL: char = 'X';
