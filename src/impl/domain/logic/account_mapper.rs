use crate::{
    entities::{account, AccountCode, ChartOfAccounts, VatRate},
    ext::standard_accounts::CLIENT_ACCOUNT_FALLBACK_INITIAL,
};

/// Resolves account codes against a chart of accounts.
#[derive(Debug, Clone)]
pub struct AccountMapper {
    chart: ChartOfAccounts,
}

impl AccountMapper {
    pub fn new(chart: ChartOfAccounts) -> Self {
        Self { chart }
    }

    /// Revenue account of a VAT bucket. Anything that is not one of the legal
    /// rates goes to the mixed bucket.
    pub fn revenue_account(&self, rate: VatRate) -> &AccountCode {
        let revenue = &self.chart.revenue;
        match rate {
            VatRate::Reduced => &revenue.reduced,
            VatRate::Intermediate => &revenue.intermediate,
            VatRate::Standard => &revenue.standard,
            VatRate::Exempt => &revenue.exempt,
            VatRate::Mixed | VatRate::Other(_) => &revenue.mixed,
        }
    }

    /// Client control account, keyed on the initial of the client name.
    pub fn client_account(&self, client_name: &str) -> AccountCode {
        account(format!(
            "{}{}{}",
            self.chart.client_prefix,
            client_initial(client_name),
            self.chart.client_suffix
        ))
    }

    pub fn vat_account(&self) -> &AccountCode {
        &self.chart.vat_on_collection
    }
}

impl Default for AccountMapper {
    fn default() -> Self {
        Self::new(ChartOfAccounts::default())
    }
}

fn client_initial(client_name: &str) -> char {
    client_name
        .trim()
        .chars()
        .next()
        .filter(|c| c.is_alphabetic())
        .and_then(|c| c.to_uppercase().next())
        .unwrap_or(CLIENT_ACCOUNT_FALLBACK_INITIAL)
}

/// `client_account` against the default chart of accounts.
pub fn client_account(client_name: &str) -> AccountCode {
    AccountMapper::default().client_account(client_name)
}

/// `revenue_account` against the default chart of accounts.
pub fn revenue_account(rate: VatRate) -> AccountCode {
    AccountMapper::default().revenue_account(rate).clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::RevenueAccounts;
    use rust_decimal_macros::dec;

    #[test]
    fn client_accounts_use_the_initial() {
        assert_eq!(client_account("Dupont").as_str(), "4110D0000");
        assert_eq!(client_account("  martin SARL").as_str(), "4110M0000");
        assert_eq!(client_account("élise").as_str(), "4110É0000");
    }

    #[test]
    fn client_accounts_fall_back_to_x() {
        assert_eq!(client_account("").as_str(), "4110X0000");
        assert_eq!(client_account("   ").as_str(), "4110X0000");
        assert_eq!(client_account("3M France").as_str(), "4110X0000");
        assert_eq!(client_account("«Atelier»").as_str(), "4110X0000");
    }

    #[test]
    fn revenue_accounts_per_rate() {
        assert_eq!(revenue_account(VatRate::Reduced).as_str(), "704000000");
        assert_eq!(revenue_account(VatRate::Intermediate).as_str(), "704100000");
        assert_eq!(revenue_account(VatRate::Standard).as_str(), "704200000");
        assert_eq!(revenue_account(VatRate::Exempt).as_str(), "704500000");
        assert_eq!(revenue_account(VatRate::Mixed).as_str(), "704300000");
        assert_eq!(revenue_account(VatRate::Other(dec!(2.1))).as_str(), "704300000");
    }

    #[test]
    fn custom_chart() {
        let mapper = AccountMapper::new(ChartOfAccounts {
            client_prefix: "411".to_string(),
            client_suffix: "00".to_string(),
            revenue: RevenueAccounts::from_list("701,702,703,704,705"),
            ..ChartOfAccounts::default()
        });
        assert_eq!(mapper.client_account("Dupont").as_str(), "411D00");
        assert_eq!(mapper.revenue_account(VatRate::Standard).as_str(), "703");
        assert_eq!(mapper.revenue_account(VatRate::Exempt).as_str(), "705");
        assert_eq!(mapper.vat_account().as_str(), "445740000");
    }

    #[test]
    fn incomplete_revenue_list_keeps_defaults() {
        assert_eq!(RevenueAccounts::from_list("701,702"), RevenueAccounts::default());
    }
}
