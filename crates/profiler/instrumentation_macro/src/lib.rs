extern crate proc_macro;
use proc_macro::TokenStream;
use quote::quote;
use syn::{parse::Nothing, parse_macro_input, parse_quote, ItemFn};

/// Wraps the body of a function into a `profiler::scope!` named after the function's module path.
///
/// The scope only records anything when the calling crate is built with its `stats` feature.
#[proc_macro_attribute]
pub fn function(attr: TokenStream, item: TokenStream) -> TokenStream {
    parse_macro_input!(attr as Nothing);
    let mut function = parse_macro_input!(item as ItemFn);
    let scope_name = function.sig.ident.to_string();

    let body = &function.block;
    let new_body = parse_quote! {
        {
            profiler::scope!(concat!(module_path!(), "::", #scope_name));
            #body
        }
    };
    function.block = Box::new(new_body);

    (quote! {
        #function
    })
    .into()
}
