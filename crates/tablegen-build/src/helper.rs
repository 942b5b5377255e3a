use proc_macro2::{Ident, Literal, Span, TokenStream};
use quote::{format_ident, quote};
use tablegen_schema::validate::reserved::is_rust_keyword;

// Quoting helpers

/// Quote an `Option`, applying the transform to the inner value when present.
pub fn quote_option<T: ?Sized, F>(opt: Option<&T>, transform: F) -> TokenStream
where
    F: FnOnce(&T) -> TokenStream,
{
    if let Some(v) = opt {
        let transformed = transform(v);
        quote!(Some(#transformed))
    } else {
        quote!(None)
    }
}

/// Quote a slice by transforming each element and returning a token array.
pub fn quote_slice<T, F>(items: &[T], transform: F) -> TokenStream
where
    F: Fn(&T) -> TokenStream,
{
    let items = items.iter().map(transform);

    quote! {
        &[#(#items),*]
    }
}

// Transform helpers

pub fn to_str_lit<S: AsRef<str>>(s: &S) -> TokenStream {
    let s = s.as_ref();

    quote!(#s)
}

pub fn to_u32_lit(n: u32) -> TokenStream {
    let lit = Literal::u32_unsuffixed(n);

    quote!(#lit)
}

pub fn to_i64_lit(n: i64) -> TokenStream {
    let lit = Literal::u64_unsuffixed(n.unsigned_abs());

    if n < 0 { quote!(-#lit) } else { quote!(#lit) }
}

/// Field identifier, raw when the name is a Rust keyword (`type` -> `r#type`).
#[must_use]
pub fn field_ident(name: &str) -> Ident {
    if is_rust_keyword(name) {
        Ident::new_raw(name, Span::call_site())
    } else {
        format_ident!("{name}")
    }
}

/// `#[doc = " ..."]`, one attribute per line of text.
pub fn doc_attrs(text: Option<&str>) -> TokenStream {
    let lines = text
        .into_iter()
        .flat_map(str::lines)
        .map(|line| format!(" {}", line.trim_end()));

    quote! {
        #(#[doc = #lines])*
    }
}

// Rendering

/// First line of every artifact.
///
/// Control characters in the version are escaped so the banner can never
/// spill out of its comment line.
#[must_use]
pub fn generated_banner(version: Option<&str>) -> String {
    match version {
        Some(version) => format!(
            "@generated by tablegen from schema version {}",
            version.escape_debug()
        ),
        None => "@generated by tablegen from an unversioned schema".to_string(),
    }
}

pub const DO_NOT_EDIT: &str = "Do not edit: changes are lost when tablegen runs again.";

/// Pretty-print a generated Rust file below its `@generated` header.
pub fn render_rust(version: Option<&str>, tokens: TokenStream) -> Result<String, syn::Error> {
    let file = syn::parse2::<syn::File>(tokens)?;

    Ok(format!(
        "// {}\n// {DO_NOT_EDIT}\n\n{}",
        generated_banner(version),
        prettyplease::unparse(&file)
    ))
}

///
/// TESTS
///
