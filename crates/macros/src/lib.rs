// SPDX-License-Identifier: MIT

//!
//! *Part of the wider timemap project*
//!
//! This crate contains the timemap procedural macros
//!

extern crate proc_macro;

use proc_macro::TokenStream;
use quote::quote;
use syn::{LitStr, parse_macro_input};

// TODO: these are copied from `timemap-core` (so are not synced)
const KNOWN_WMS_VERSIONS: [&str; 4] = ["1.0.0", "1.1.0", "1.1.1", "1.3.0"];

/// Generate the type from a string literal with compile time checking against
/// the allowed values
fn generate_const_checked_str_macro(
    input: TokenStream,
    type_name: &str,
    allowed: &[&str],
) -> TokenStream {
    let lit = parse_macro_input!(input as LitStr);
    let value = lit.value();

    if !allowed.contains(&value.as_str()) {
        return syn::Error::new_spanned(
            lit,
            format!("{type_name} must be one of {}", allowed.join(", ")),
        )
        .to_compile_error()
        .into();
    }

    let ident = syn::Ident::new(type_name, proc_macro2::Span::call_site());
    quote! {
        #ident::try_from(#value).unwrap()
    }
    .into()
}

/// Create a `WmsVersion`, using `wms_version!("1.3.0")`, with compile time
/// checking of the value.
#[proc_macro]
pub fn wms_version(input: TokenStream) -> TokenStream {
    generate_const_checked_str_macro(input, "WmsVersion", &KNOWN_WMS_VERSIONS)
}
