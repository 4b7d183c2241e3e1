//! Procedural macros for `cfg-index`.
//!
//! All macros in this crate are re-exported from the `cfg-index` crate. See its docs for more details
//! and the examples of usage.

// General settings
#![recursion_limit = "128"]
// Linter settings
#![allow(missing_docs)] // Adding docs here would interfere with docs in the main crate

extern crate proc_macro;

use proc_macro::TokenStream;

mod template;
mod utils;

#[proc_macro_derive(DescribeTemplate, attributes(template))]
pub fn describe_template(input: TokenStream) -> TokenStream {
    template::impl_describe_template(input)
}
