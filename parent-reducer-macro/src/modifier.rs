//! Visibility of generated delegation methods.
//!
//! A delegation method mutates its field, so it must not be more visible than
//! the field is writable. A write restriction given with
//! `#[parent_reducer_state(set = ...)]` therefore takes precedence over the
//! field's own visibility, wherever it appears.

use crate::types::Modifier;
use syn::{Visibility, VisRestricted};

/// Pick the visibility for the method generated from a field.
///
/// The first setter restriction wins; otherwise the first plain visibility;
/// otherwise the method is private.
pub fn resolve_visibility(modifiers: &[Modifier]) -> Visibility {
    let setter = modifiers.iter().find_map(|modifier| match modifier {
        Modifier::Setter(vis) => Some(vis),
        Modifier::Plain(_) => None,
    });
    let plain = modifiers.iter().find_map(|modifier| match modifier {
        Modifier::Plain(vis) => Some(vis),
        Modifier::Setter(_) => None,
    });

    setter
        .or(plain)
        .map(normalize)
        .unwrap_or(Visibility::Inherited)
}

/// `pub(self)` is spelled as no visibility at all.
fn normalize(vis: &Visibility) -> Visibility {
    match vis {
        Visibility::Restricted(VisRestricted {
            in_token: None,
            path,
            ..
        }) if path.is_ident("self") => Visibility::Inherited,
        other => other.clone(),
    }
}
