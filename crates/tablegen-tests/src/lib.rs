//! Generated artifacts compiled as ordinary Rust.
//!
//! The build script runs the generator over each schema into `OUT_DIR` on
//! every build, so these modules always hold the current generator output
//! and a change that emits code `tablegen-core` rejects fails to compile here.

macro_rules! generated {
    ($name:ident) => {
        pub mod $name {
            pub mod records {
                include!(concat!(env!("OUT_DIR"), "/", stringify!($name), "/records.rs"));
            }

            pub mod models {
                include!(concat!(env!("OUT_DIR"), "/", stringify!($name), "/models.rs"));
            }

            /// The migration script written next to the Rust artifacts.
            pub const MIGRATION: &str =
                include_str!(concat!(env!("OUT_DIR"), "/", stringify!($name), "/migration.sql"));
        }
    };
}

generated!(market_data);
generated!(trade_events);
