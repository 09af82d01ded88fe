//! Code generation for the parent reducer derive.
//!
//! Runs the field-level pipeline: scan the named fields, classify each one,
//! and render a delegation method for every field that was accepted.

pub mod delegate;
pub mod utils;

use crate::classify::classify;
use crate::parser::named_fields;
use crate::types::*;
use crate::validation::push_error;
use delegate::DelegationMethod;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::Result;

impl ParentState<'_> {
    /// Generate the inherent impl block holding the delegation methods.
    ///
    /// Without a parent reducer, or without any eligible field, nothing is
    /// generated.
    pub fn expand(&self) -> Result<TokenStream2> {
        self.validate()?;

        let Some(parent) = &self.directive.of else {
            return Ok(TokenStream2::new());
        };

        let descriptors = self.descriptors()?;
        if descriptors.is_empty() {
            return Ok(TokenStream2::new());
        }

        let runtime = runtime_path(self.directive.krate.as_ref());
        let methods = descriptors
            .iter()
            .map(|descriptor| DelegationMethod::new(descriptor, parent, &runtime));

        let ident = self.ident;
        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();

        Ok(quote! {
            #[automatically_derived]
            impl #impl_generics #ident #ty_generics #where_clause {
                #( #methods )*
            }
        })
    }

    /// Classified fields, in declaration order.
    pub fn descriptors(&self) -> Result<Vec<FieldDescriptor>> {
        let mut errors = None;
        let mut descriptors = Vec::new();

        for field in named_fields(self.data) {
            match FieldDecl::from_field(field) {
                Ok(decl) => descriptors.extend(classify(&decl)),
                Err(err) => push_error(&mut errors, err),
            }
        }

        match errors {
            Some(err) => Err(err),
            None => Ok(descriptors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::{DeriveInput, parse_quote};

    fn expand(input: &DeriveInput) -> Result<TokenStream2> {
        ParentState::from_derive_input(input)?.expand()
    }

    fn method_names(input: &DeriveInput) -> Vec<String> {
        ParentState::from_derive_input(input)
            .unwrap()
            .descriptors()
            .unwrap()
            .into_iter()
            .map(|descriptor| descriptor.name.to_string())
            .collect()
    }

    #[test]
    fn only_the_child_field_is_delegated() {
        let input: DeriveInput = parse_quote! {
            #[parent_reducer_state(of = TestReducer)]
            struct State {
                child: FooReducer::State,
                other: i32,
                #[parent_reducer_state_ignored]
                ignored: BarReducer::State,
            }
        };
        let expected = quote! {
            #[automatically_derived]
            impl State {
                #[doc = "Reduce a child action against `self.child`."]
                fn child(
                    &mut self,
                    action: <FooReducer as ::parent_reducer::Reducer>::Action,
                ) -> ::parent_reducer::EffectOf<TestReducer> {
                    <FooReducer as ::parent_reducer::Reducer>::reduce(
                        &<FooReducer as ::core::default::Default>::default(),
                        &mut self.child,
                        action
                    )
                    .map(<TestReducer as ::parent_reducer::Reducer>::Action::Child)
                }
            }
        };
        assert_eq!(expand(&input).unwrap().to_string(), expected.to_string());
    }

    #[test]
    fn methods_follow_field_order() {
        let input: DeriveInput = parse_quote! {
            #[parent_reducer_state(of = TestReducer)]
            struct State {
                zeta: ZReducer::State,
                count: u32,
                alpha: Option<AReducer::State>,
                config: AReducer::Config,
                middle: StateOf<MReducer>,
            }
        };
        assert_eq!(method_names(&input), ["zeta", "alpha", "middle"]);
    }

    #[test]
    fn generics_are_carried_to_the_impl() {
        let input: DeriveInput = parse_quote! {
            #[parent_reducer_state(of = TestReducer)]
            struct State<T: Clone> where T: Default {
                child: ChildReducer::State,
                extra: T,
            }
        };
        let expanded = expand(&input).unwrap().to_string();
        let header = quote!(impl<T: Clone> State<T> where T: Default).to_string();
        assert!(expanded.contains(&header), "{expanded}");
    }

    #[test]
    fn missing_parent_generates_nothing() {
        let input: DeriveInput = parse_quote! {
            struct State {
                child: ChildReducer::State,
            }
        };
        assert!(expand(&input).unwrap().is_empty());
    }

    #[test]
    fn no_eligible_field_generates_nothing() {
        let cases: Vec<DeriveInput> = vec![
            parse_quote! {
                #[parent_reducer_state(of = TestReducer)]
                struct State { count: u32 }
            },
            parse_quote! {
                #[parent_reducer_state(of = TestReducer)]
                struct State(ChildReducer::State);
            },
            parse_quote! {
                #[parent_reducer_state(of = TestReducer)]
                enum State { Child(ChildReducer::State) }
            },
        ];
        for input in cases {
            assert!(expand(&input).unwrap().is_empty());
        }
    }

    #[test]
    fn custom_runtime_path_is_used() {
        let input: DeriveInput = parse_quote! {
            #[parent_reducer_state(of = TestReducer, crate = my::runtime)]
            struct State {
                child: Option<ChildReducer::State>,
            }
        };
        let expanded = expand(&input).unwrap().to_string();
        assert!(expanded.contains(&quote!(my::runtime::Effect::none()).to_string()));
        assert!(!expanded.contains("parent_reducer ::"));
    }

    #[test]
    fn field_errors_are_reported_together() {
        let input: DeriveInput = parse_quote! {
            #[parent_reducer_state(of = TestReducer)]
            struct State {
                #[parent_reducer_state(bogus = 1)]
                first: ChildReducer::State,
                #[parent_reducer_state(init)]
                second: ChildReducer::State,
            }
        };
        let err = expand(&input).err().unwrap();
        assert_eq!(err.into_iter().count(), 2);
    }

    #[test]
    fn expansion_is_deterministic() {
        let input: DeriveInput = parse_quote! {
            #[parent_reducer_state(of = TestReducer)]
            struct State {
                first: FirstReducer::State,
                second: Option<SecondReducer::State>,
            }
        };
        let first = expand(&input).unwrap().to_string();
        let second = expand(&input).unwrap().to_string();
        assert_eq!(first, second);
    }
}
