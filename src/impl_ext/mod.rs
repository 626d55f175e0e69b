// Crate-internal.
// ---

pub(crate) mod standard_accounts {
    pub(crate) mod pcg;
}

pub(crate) mod session {
    pub(crate) mod authenticator;
    pub(crate) mod journal_session;
}

// Public exports.
// ---

pub mod exports {
    // This mod represents how clients see the library, and can differ from the
    // internal structure.
    //
    // The contents of this mod are re-exported in the root of the crate.

    pub mod standard_accounts {
        pub use crate::impl_ext::standard_accounts::pcg::*;
    }

    pub mod session {
        pub use crate::impl_ext::session::authenticator::*;
        pub use crate::impl_ext::session::journal_session::*;
    }
}
