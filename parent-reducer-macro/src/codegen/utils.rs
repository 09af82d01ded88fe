//! Utility functions for code generation.
//!
//! Fields are `snake_case`, parent action variants are `UpperCamelCase`; the
//! variant wrapping a child's actions is derived from the field name.

use heck::ToUpperCamelCase;
use proc_macro2::Ident;
use syn::ext::IdentExt;

/// Parent action variant for a field.
///
/// Examples:
/// - `child` → `Child`
/// - `child_list` → `ChildList`
/// - `r#type` → `Type`
///
/// Preserves the original span for better error messages.
pub fn variant_ident(field: &Ident) -> Ident {
    let variant = field.unraw().to_string().to_upper_camel_case();
    Ident::new(&variant, field.span())
}
