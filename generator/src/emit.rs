//! Renders the enhanced type model to Rust source. All decisions were made
//! by the enhancer; this module only maps descriptors to syntax.
//!
//! A true-choice discriminator becomes the key enum of the generated choice
//! item store, so its runtime state lives in the store keys rather than in
//! a separate field.

use check_keyword::CheckKeyword;
use heck::{ToPascalCase, ToSnakeCase};
use quote::quote;
use syn::{Ident, ImplItemFn, Item, Type, Variant, __private::Span, parse_quote};

use qbx_enhancer::{Capability, Cardinality, EnhancedTypeDecl, Storage, SynthesizedMember};
use qbx_model::MemberDecl;

pub fn emit_rust(types: &[EnhancedTypeDecl]) -> String {
    let mut items = Vec::new();
    for decl in types {
        emit_type(decl, &mut items);
    }
    let root = syn::File {
        shebang: None,
        attrs: Vec::new(),
        items,
    };
    prettyplease::unparse(&root)
}

fn emit_type(decl: &EnhancedTypeDecl, items: &mut Vec<Item>) {
    for member in &decl.members {
        if let MemberDecl::Discriminator(discriminator) = &member.decl {
            let enum_ident = type_ident(&discriminator.enum_name);
            let variants: Vec<Variant> = discriminator
                .values
                .iter()
                .map(|value| -> Variant {
                    let ident = type_ident(value);
                    parse_quote!(#ident)
                })
                .collect();
            items.push(parse_quote! {
                #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
                pub enum #enum_ident {
                    #(#variants),*
                }
            });
        }
    }

    for member in &decl.members {
        if let MemberDecl::Aggregator(aggregator) = &member.decl {
            let union_ident = item_union_ident(decl, &aggregator.wire_name);
            let variants: Vec<Variant> = aggregator_accessors(decl, &aggregator.wire_name)
                .map(|accessor| -> Variant {
                    let ident = type_ident(&accessor.name);
                    let ty = value_type(accessor);
                    parse_quote!(#ident(#ty))
                })
                .collect();
            items.push(parse_quote! {
                #[derive(Debug, Clone)]
                pub enum #union_ident {
                    #(#variants),*
                }
            });
        }
    }

    let struct_ident = type_ident(&decl.name);
    let mut fields = Vec::new();
    for member in &decl.members {
        let hidden = member.hidden.then(|| quote!(#[doc(hidden)]));
        match &member.decl {
            MemberDecl::Scalar(scalar) => {
                let ident = field_ident(&scalar.wire_name);
                let ty = rust_type(&scalar.value_type, false);
                match &scalar.presence_flag {
                    Some(flag) => {
                        let flag_ident = field_ident(flag);
                        fields.push(quote! { #hidden pub #ident: #ty });
                        fields.push(quote! { #hidden pub #flag_ident: bool });
                    }
                    None => fields.push(quote! { #hidden pub #ident: Option<#ty> }),
                }
            }
            MemberDecl::Aggregator(aggregator) => {
                let ident = field_ident(&aggregator.wire_name);
                let union_ident = item_union_ident(decl, &aggregator.wire_name);
                let key: Type = match &aggregator.discriminator {
                    Some(reference) => match decl.wire_member(reference).map(|m| &m.decl) {
                        Some(MemberDecl::Discriminator(discriminator)) => {
                            let key_ident = type_ident(&discriminator.enum_name);
                            parse_quote!(#key_ident)
                        }
                        _ => parse_quote!(()),
                    },
                    None => parse_quote!(()),
                };
                fields.push(quote! {
                    #hidden pub #ident: qbx_runtime::ChoiceItemStore<#key, #union_ident>
                });
            }
            // Realized as the store's key enum; no field of its own.
            MemberDecl::Discriminator(_) => {}
        }
    }
    items.push(parse_quote! {
        #[derive(Debug, Default, Clone)]
        pub struct #struct_ident {
            #(#fields),*
        }
    });

    let mut methods: Vec<ImplItemFn> = decl
        .synthesized
        .iter()
        .flat_map(|accessor| emit_accessor(decl, accessor))
        .collect();
    if decl.capability != Capability::None {
        let tag = match decl.capability {
            Capability::IterationRequest => quote!(IterationRequest),
            Capability::IterationResponse => quote!(IterationResponse),
            Capability::None => unreachable!(),
        };
        methods.push(parse_quote! {
            pub fn capability() -> qbx_runtime::Capability {
                qbx_runtime::Capability::#tag
            }
        });
    }
    if !methods.is_empty() {
        items.push(parse_quote! {
            impl #struct_ident {
                #(#methods)*
            }
        });
    }
}

fn emit_accessor(decl: &EnhancedTypeDecl, accessor: &SynthesizedMember) -> Vec<ImplItemFn> {
    let getter = field_ident(&accessor.name);
    let setter = ident(&format!("set_{}", accessor.name.to_snake_case()));
    let ty = value_type(accessor);

    match &accessor.storage {
        Storage::ChoiceItem { aggregator, key } => {
            let store = field_ident(aggregator);
            let union_ident = item_union_ident(decl, aggregator);
            let variant = type_ident(&accessor.name);
            let (get_one, get_all, set_one, set_all) = match key {
                Some(key) => {
                    let key_enum = type_ident(&key.enum_name);
                    let key_variant = type_ident(&key.variant);
                    (
                        quote!(self.#store.single(&#key_enum::#key_variant)),
                        quote!(self.#store.all(&#key_enum::#key_variant)),
                        quote!(self.#store.set_single(#key_enum::#key_variant, item)),
                        quote!(self.#store.set_all(#key_enum::#key_variant, items)),
                    )
                }
                None => (
                    quote!(self.#store.item()),
                    quote!(self.#store.items()),
                    quote!(self.#store.set_item(item)),
                    quote!(self.#store.set_items(items)),
                ),
            };
            match accessor.cardinality {
                Cardinality::Single => vec![
                    parse_quote! {
                        pub fn #getter(&self) -> Option<&#ty> {
                            match #get_one {
                                Some(#union_ident::#variant(value)) => Some(value),
                                _ => None,
                            }
                        }
                    },
                    parse_quote! {
                        pub fn #setter(&mut self, value: #ty) {
                            let item = #union_ident::#variant(value);
                            #set_one;
                        }
                    },
                ],
                Cardinality::Many => vec![
                    parse_quote! {
                        pub fn #getter(&self) -> Vec<&#ty> {
                            #get_all
                                .iter()
                                .filter_map(|item| match item {
                                    #union_ident::#variant(value) => Some(value),
                                    #[allow(unreachable_patterns)]
                                    _ => None,
                                })
                                .collect()
                        }
                    },
                    parse_quote! {
                        pub fn #setter(&mut self, values: Vec<#ty>) {
                            let items = values.into_iter().map(#union_ident::#variant).collect();
                            #set_all;
                        }
                    },
                ],
            }
        }
        Storage::OptionalScalar {
            value_member,
            flag_member,
        } => {
            let value = field_ident(value_member);
            let flag = field_ident(flag_member);
            vec![
                parse_quote! {
                    pub fn #getter(&self) -> Option<&#ty> {
                        qbx_runtime::optional::get(&self.#value, self.#flag)
                    }
                },
                parse_quote! {
                    pub fn #setter(&mut self, value: Option<#ty>) {
                        qbx_runtime::optional::set(&mut self.#value, &mut self.#flag, value);
                    }
                },
            ]
        }
        Storage::CoercedCount { value_member } => {
            let value = field_ident(value_member);
            vec![parse_quote! {
                pub fn #getter(&self) -> Option<i32> {
                    self.#value
                        .as_deref()
                        .and_then(qbx_runtime::lexical::parse_remaining_count)
                }
            }]
        }
        Storage::CoercedIterator { value_member } => {
            let value = field_ident(value_member);
            vec![parse_quote! {
                pub fn #getter(&self) -> Option<qbx_runtime::IteratorType> {
                    self.#value.as_deref().and_then(|text| text.parse().ok())
                }
            }]
        }
    }
}

fn aggregator_accessors<'a>(
    decl: &'a EnhancedTypeDecl,
    aggregator: &'a str,
) -> impl Iterator<Item = &'a SynthesizedMember> {
    decl.synthesized.iter().filter(move |accessor| {
        matches!(&accessor.storage, Storage::ChoiceItem { aggregator: a, .. } if a == aggregator)
    })
}

fn value_type(accessor: &SynthesizedMember) -> Type {
    rust_type(&accessor.value_type, accessor.declared_type)
}

fn rust_type(value_type: &str, declared: bool) -> Type {
    if declared {
        let ident = type_ident(value_type);
        return parse_quote!(#ident);
    }
    match value_type {
        "string" | "decimal" | "date" | "dateTime" | "time" => parse_quote!(String),
        "int" | "integer" => parse_quote!(i32),
        "boolean" => parse_quote!(bool),
        "float" => parse_quote!(f32),
        "double" => parse_quote!(f64),
        "IteratorType" => parse_quote!(qbx_runtime::IteratorType),
        other => {
            let ident = type_ident(other);
            parse_quote!(#ident)
        }
    }
}

fn item_union_ident(decl: &EnhancedTypeDecl, aggregator: &str) -> Ident {
    type_ident(&format!("{}{}", decl.name, aggregator))
}

fn type_ident(name: &str) -> Ident {
    ident(&name.to_pascal_case())
}

fn field_ident(wire_name: &str) -> Ident {
    ident(&wire_name.to_snake_case())
}

fn ident(name: &str) -> Ident {
    if ["crate", "self", "super", "Self"].contains(&name) {
        // These are keywords that are not allowed as raw identifiers
        Ident::new(&format!("{}_", name), Span::call_site())
    } else if name.is_keyword() {
        Ident::new_raw(name, Span::call_site())
    } else {
        Ident::new(name, Span::call_site())
    }
}
