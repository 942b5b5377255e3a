use proc_macro2::TokenStream;
use quote::quote;
use syn::Path;

/// Runtime crate referenced by generated code when nothing else is configured.
pub const DEFAULT_CORE_CRATE: &str = "tablegen_core";

///
/// CratePaths
///
/// Resolves the runtime crate root that generated records and models are
/// written against. Consumers that re-export `tablegen-core` under another
/// name point `core` at their own path (`my_app::db::core`).
///

#[derive(Clone, Debug)]
pub struct CratePaths {
    core: TokenStream,
    core_str: String,
}

impl CratePaths {
    /// Parse a Rust path such as `tablegen_core` or `::my_app::core`.
    pub fn new(core: &str) -> Result<Self, syn::Error> {
        let core = core.trim();
        let path = syn::parse_str::<Path>(core)?;

        Ok(Self {
            core: quote!(#path),
            core_str: core.to_string(),
        })
    }

    #[must_use]
    pub const fn core(&self) -> &TokenStream {
        &self.core
    }

    /// `<core>::__reexports::serde` as written inside `#[serde(crate = "..")]`.
    #[must_use]
    pub fn serde_crate(&self) -> String {
        format!("{}::__reexports::serde", self.core_str)
    }

    /// `<core>::__reexports`
    #[must_use]
    pub fn reexports(&self) -> TokenStream {
        let core = &self.core;

        quote!(#core::__reexports)
    }
}

impl Default for CratePaths {
    fn default() -> Self {
        Self {
            core: quote!(tablegen_core),
            core_str: DEFAULT_CORE_CRATE.to_string(),
        }
    }
}

///
/// TESTS
///
