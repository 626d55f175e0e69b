// Crate-internal.
// ---

pub(crate) mod data {
    pub(crate) mod datasources {
        pub(crate) mod sales_csv_datasource;
        pub(crate) mod sales_workbook_datasource;
        pub(crate) mod sheet_csv_sink;
    }
    pub(crate) mod models {
        pub(crate) mod amount_model;
        pub(crate) mod credentials_model;
        pub(crate) mod date_model;
        pub(crate) mod generation_config_model;
        pub(crate) mod vat_rate_model;
    }
    pub(crate) mod repositories {
        pub(crate) mod sales_repository_impl;
    }
}

pub(crate) mod domain {
    pub(crate) mod entities {
        pub(crate) mod account;
        pub(crate) mod balance;
        pub(crate) mod config;
        pub(crate) mod invoice;
        pub(crate) mod journal;
        pub(crate) mod sales_records;
        pub(crate) mod schema;
        pub(crate) mod sheet;
        pub(crate) mod source;
        pub(crate) mod summary;
        pub(crate) mod vat_rate;
    }
    pub(crate) mod logic {
        pub(crate) mod account_mapper;
        pub(crate) mod balance_verifier;
        pub(crate) mod invoice_normalizer;
        pub(crate) mod journal_builder;
        pub(crate) mod schema_resolver;
        pub(crate) mod utils;
        pub(crate) mod vat_classifier;
    }
    pub(crate) mod repositories {
        pub(crate) mod sales_repository;
        pub(crate) mod sheet_sink;
    }
    pub(crate) mod usecases {
        pub(crate) mod generate_usecase;
    }
}

pub(crate) mod presentation {
    pub(crate) mod hledger_printer;
    pub(crate) mod sheet_printer;
    pub(crate) mod summary_fmt;
    pub(crate) mod utils;
}

// Public exports.
// ---

#[doc(hidden)]
#[allow(unused_imports)]
pub mod exports {
    // This mod represents how clients see the library, and can differ from the
    // internal structure.
    //
    // The contents of this mod are re-exported in the root of the crate.

    pub mod entities {
        pub use crate::domain::entities::account::*;
        pub use crate::domain::entities::balance::*;
        pub use crate::domain::entities::config::*;
        pub use crate::domain::entities::invoice::*;
        pub use crate::domain::entities::journal::*;
        pub use crate::domain::entities::sales_records::*;
        pub use crate::domain::entities::schema::*;
        pub use crate::domain::entities::sheet::*;
        pub use crate::domain::entities::source::*;
        pub use crate::domain::entities::summary::*;
        pub use crate::domain::entities::vat_rate::*;
    }

    pub mod logic {
        pub use crate::data::models::amount_model::clean_amount;
        pub use crate::data::models::date_model::parse_date;
        pub use crate::data::models::vat_rate_model::parse_vat_rate;
        pub use crate::domain::logic::account_mapper::*;
        pub use crate::domain::logic::balance_verifier::verify;
        pub use crate::domain::logic::journal_builder::JournalBuilder;
        pub use crate::domain::logic::vat_classifier::{classify, classify_line, from_explicit};
    }

    pub mod io {
        pub use crate::data::datasources::sheet_csv_sink::CsvSheetSink;
        pub use crate::domain::repositories::sheet_sink::SheetSink;
        pub use crate::presentation::sheet_printer::{
            SheetPrinter, BALANCE_SHEET, IMBALANCE_SHEET, JOURNAL_SHEET,
        };
    }
}
