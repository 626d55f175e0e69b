use std::str::FromStr;

use fractic_server_error::ServerError;

use crate::{
    entities::{account, ChartOfAccounts, GenerationConfig, RevenueAccounts, RowLayout, SheetFormat},
    errors::InvalidRon,
};

/// RON representation of `GenerationConfig`. Every field is optional and falls
/// back to the default setting.
///
/// ```ron
/// (
///     journal_code: "VT",
///     chart: (vat_on_collection: "445740000", revenue: (standard: "706200000")),
///     layout: InvoiceTotals,
///     sheet_format: (delimiter: ',', decimal_comma: false),
/// )
/// ```
#[derive(Debug, Default, serde_derive::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct GenerationConfigModel {
    journal_code: Option<String>,
    chart: ChartOfAccountsModel,
    layout: Option<RowLayoutModel>,
    sheet_format: SheetFormatModel,
    imbalance_display_limit: Option<usize>,
}

#[derive(Debug, Default, serde_derive::Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ChartOfAccountsModel {
    client_prefix: Option<String>,
    client_suffix: Option<String>,
    vat_on_collection: Option<String>,
    revenue: RevenueAccountsModel,
}

#[derive(Debug, Default, serde_derive::Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RevenueAccountsModel {
    reduced: Option<String>,
    intermediate: Option<String>,
    standard: Option<String>,
    mixed: Option<String>,
    exempt: Option<String>,
}

#[derive(Debug, serde_derive::Deserialize)]
enum RowLayoutModel {
    InvoiceLines,
    InvoiceTotals,
}

#[derive(Debug, Default, serde_derive::Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SheetFormatModel {
    delimiter: Option<char>,
    decimal_comma: Option<bool>,
    date_format: Option<String>,
    byte_order_mark: Option<bool>,
}

impl FromStr for GenerationConfigModel {
    type Err = ServerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ron::Options::default()
            .with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
            .from_str(s)
            .map_err(|e| InvalidRon::with_debug("GenerationConfig", &e))
    }
}

impl Into<GenerationConfig> for GenerationConfigModel {
    fn into(self) -> GenerationConfig {
        let defaults = GenerationConfig::default();
        GenerationConfig {
            journal_code: self.journal_code.unwrap_or(defaults.journal_code),
            chart: self.chart.into_chart(defaults.chart),
            layout: match self.layout {
                Some(RowLayoutModel::InvoiceLines) => RowLayout::InvoiceLines,
                Some(RowLayoutModel::InvoiceTotals) => RowLayout::InvoiceTotals,
                None => defaults.layout,
            },
            sheet_format: self.sheet_format.into_format(defaults.sheet_format),
            imbalance_display_limit: self
                .imbalance_display_limit
                .unwrap_or(defaults.imbalance_display_limit),
        }
    }
}

impl ChartOfAccountsModel {
    fn into_chart(self, defaults: ChartOfAccounts) -> ChartOfAccounts {
        let RevenueAccountsModel {
            reduced,
            intermediate,
            standard,
            mixed,
            exempt,
        } = self.revenue;
        ChartOfAccounts {
            client_prefix: self.client_prefix.unwrap_or(defaults.client_prefix),
            client_suffix: self.client_suffix.unwrap_or(defaults.client_suffix),
            vat_on_collection: self
                .vat_on_collection
                .map(account)
                .unwrap_or(defaults.vat_on_collection),
            revenue: RevenueAccounts {
                reduced: reduced.map(account).unwrap_or(defaults.revenue.reduced),
                intermediate: intermediate
                    .map(account)
                    .unwrap_or(defaults.revenue.intermediate),
                standard: standard.map(account).unwrap_or(defaults.revenue.standard),
                mixed: mixed.map(account).unwrap_or(defaults.revenue.mixed),
                exempt: exempt.map(account).unwrap_or(defaults.revenue.exempt),
            },
        }
    }
}

impl SheetFormatModel {
    fn into_format(self, defaults: SheetFormat) -> SheetFormat {
        SheetFormat {
            delimiter: self
                .delimiter
                .filter(char::is_ascii)
                .map(|c| c as u8)
                .unwrap_or(defaults.delimiter),
            decimal_comma: self.decimal_comma.unwrap_or(defaults.decimal_comma),
            date_format: self.date_format.unwrap_or(defaults.date_format),
            byte_order_mark: self.byte_order_mark.unwrap_or(defaults.byte_order_mark),
        }
    }
}

impl GenerationConfig {
    /// Parses a RON configuration; missing fields keep their default.
    pub fn from_ron(s: &str) -> Result<GenerationConfig, ServerError> {
        Ok(GenerationConfigModel::from_str(s)?.into())
    }
}
