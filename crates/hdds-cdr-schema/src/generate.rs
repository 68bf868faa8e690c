// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Rust code generation for a compiled schema.
//!
//! Shared by the `schema!` proc-macro and `hdds-cdr-gen --mode expanded`.
//! Generated items name the runtime as `::hdds_cdr`.

use proc_macro2::{Ident, Literal, Span, TokenStream};
use quote::{quote, ToTokens};

use crate::model::{
    AliasDef, BaseType, Cardinality, FieldDef, MessageDef, ServiceDef, TypeDef, TypeRef,
};
use crate::validate::CompiledSchema;

/// Which descriptor kind a generated compound carries
#[derive(Clone, Copy)]
enum CompoundKind<'s> {
    Message,
    Request { service: &'s str },
    Reply { service: &'s str },
}

impl CompiledSchema {
    /// Generated items for every declared type, in declaration order
    pub fn expand(&self) -> TokenStream {
        let items = self.schema().types.iter().map(|def| match def {
            TypeDef::Message(m) => self.expand_message(m),
            TypeDef::Alias(a) => self.expand_alias(a),
            TypeDef::Service(s) => self.expand_service(s),
        });
        quote! { #(#items)* }
    }

    fn expand_message(&self, m: &MessageDef) -> TokenStream {
        let compound = self.expand_compound(&m.name, &m.docs, &m.fields, CompoundKind::Message);
        let named = self.expand_named_type(&m.name, &m.identity.type_name, &m.identity.type_hash);
        quote! {
            #compound
            #named
        }
    }

    fn expand_compound(
        &self,
        name: &str,
        docs: &[String],
        fields: &[FieldDef],
        kind: CompoundKind<'_>,
    ) -> TokenStream {
        let type_ident = ident(name);
        let borrows = self.borrows(name);
        let generics = generics(borrows);
        let (decode_generics, lt) = decode_lifetime(borrows);
        let docs = doc_attrs(docs);
        let derives = if self.is_copy(name) {
            quote! { #[derive(Debug, Clone, Copy, PartialEq)] }
        } else {
            quote! { #[derive(Debug, PartialEq)] }
        };

        let names: Vec<Ident> = fields.iter().map(|f| ident(&f.name)).collect();
        let types: Vec<TokenStream> = fields.iter().map(|f| self.field_type(f)).collect();
        let field_docs = fields.iter().map(|f| doc_attrs(&f.docs));
        let defaults = fields.iter().map(|f| default_value(f.ty.cardinality));
        let descriptors = fields.iter().map(|f| self.field_descriptor(f));

        let kind = match kind {
            CompoundKind::Message => quote! {
                ::hdds_cdr::TypeKind::Compound { fields: &[#(#descriptors),*] }
            },
            CompoundKind::Request { service } => quote! {
                ::hdds_cdr::TypeKind::ServiceRequest { service: #service, fields: &[#(#descriptors),*] }
            },
            CompoundKind::Reply { service } => quote! {
                ::hdds_cdr::TypeKind::ServiceReply { service: #service, fields: &[#(#descriptors),*] }
            },
        };

        // Keep empty types free of unused-variable warnings.
        let (w, r) = if fields.is_empty() {
            (ident("_w"), ident("_r"))
        } else {
            (ident("w"), ident("r"))
        };

        quote! {
            #docs
            #derives
            pub struct #type_ident #generics {
                #(
                    #field_docs
                    pub #names: #types,
                )*
            }

            impl #generics ::core::default::Default for #type_ident #generics {
                fn default() -> Self {
                    Self {
                        #(#names: #defaults,)*
                    }
                }
            }

            impl #generics ::hdds_cdr::CdrEncode for #type_ident #generics {
                fn encode(&self, #w: &mut ::hdds_cdr::CdrWriter<'_>) -> ::hdds_cdr::Result<()> {
                    #(::hdds_cdr::CdrEncode::encode(&self.#names, #w)?;)*
                    ::core::result::Result::Ok(())
                }
            }

            impl #decode_generics ::hdds_cdr::CdrDecode<#lt> for #type_ident #generics {
                const MIN_WIRE_SIZE: usize =
                    0 #(+ <#types as ::hdds_cdr::CdrDecode<#lt>>::MIN_WIRE_SIZE)*;

                fn decode_into(&mut self, #r: &mut ::hdds_cdr::CdrReader<#lt>) -> ::hdds_cdr::Result<()> {
                    #(::hdds_cdr::CdrDecode::decode_into(&mut self.#names, #r)?;)*
                    ::core::result::Result::Ok(())
                }
            }

            impl #generics ::hdds_cdr::Describe for #type_ident #generics {
                const DESCRIPTOR: &'static ::hdds_cdr::TypeDescriptor = &::hdds_cdr::TypeDescriptor {
                    name: #name,
                    kind: #kind,
                };
            }

            impl #generics ::hdds_cdr::__private::Sealed for #type_ident #generics {}
            impl #generics ::hdds_cdr::Serdes for #type_ident #generics {}
        }
    }

    fn expand_alias(&self, a: &AliasDef) -> TokenStream {
        let name = a.name.as_str();
        let type_ident = ident(name);
        let borrows = self.borrows(name);
        let generics = generics(borrows);
        let (decode_generics, lt) = decode_lifetime(borrows);
        let docs = doc_attrs(&a.docs);
        let target = self.element_type(&a.target);
        let target_descriptor = self.element_descriptor(&a.target);
        let derives = if self.is_copy(name) {
            quote! { #[derive(Debug, Default, Clone, Copy, PartialEq)] }
        } else {
            quote! { #[derive(Debug, Default, PartialEq)] }
        };
        let named = self.expand_named_type(name, &a.identity.type_name, &a.identity.type_hash);

        quote! {
            #docs
            #derives
            #[repr(transparent)]
            pub struct #type_ident #generics(pub #target);

            impl #generics ::core::convert::From<#target> for #type_ident #generics {
                fn from(value: #target) -> Self {
                    Self(value)
                }
            }

            impl #generics ::hdds_cdr::CdrEncode for #type_ident #generics {
                fn encode(&self, w: &mut ::hdds_cdr::CdrWriter<'_>) -> ::hdds_cdr::Result<()> {
                    ::hdds_cdr::CdrEncode::encode(&self.0, w)
                }
            }

            impl #decode_generics ::hdds_cdr::CdrDecode<#lt> for #type_ident #generics {
                const MIN_WIRE_SIZE: usize = <#target as ::hdds_cdr::CdrDecode<#lt>>::MIN_WIRE_SIZE;

                fn decode_into(&mut self, r: &mut ::hdds_cdr::CdrReader<#lt>) -> ::hdds_cdr::Result<()> {
                    ::hdds_cdr::CdrDecode::decode_into(&mut self.0, r)
                }
            }

            impl #generics ::hdds_cdr::Describe for #type_ident #generics {
                const DESCRIPTOR: &'static ::hdds_cdr::TypeDescriptor =
                    &::hdds_cdr::TypeDescriptor::alias(#name, #target_descriptor);
            }

            impl #generics ::hdds_cdr::__private::Sealed for #type_ident #generics {}
            impl #generics ::hdds_cdr::Serdes for #type_ident #generics {}

            #named
        }
    }

    fn expand_service(&self, s: &ServiceDef) -> TokenStream {
        let service = s.name.as_str();
        let request_name = s.request_name();
        let reply_name = s.reply_name();
        let request_docs = [format!("Request of [`{service}`]")];
        let reply_docs = [format!("Reply of [`{service}`]")];

        let request = self.expand_compound(
            &request_name,
            &request_docs,
            &s.request,
            CompoundKind::Request { service },
        );
        let reply = self.expand_compound(
            &reply_name,
            &reply_docs,
            &s.reply,
            CompoundKind::Reply { service },
        );
        let request_ty = self.named_type(&request_name);
        let reply_ty = self.named_type(&reply_name);

        let type_ident = ident(service);
        let docs = doc_attrs(&s.docs);
        let named = self.expand_named_type(service, &s.identity.type_name, &s.identity.type_hash);

        quote! {
            #request
            #reply

            #docs
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
            pub struct #type_ident;

            impl ::hdds_cdr::ServiceType for #type_ident {
                type Request<'a> = #request_ty;
                type Reply<'a> = #reply_ty;
            }

            #named
        }
    }

    fn expand_named_type(&self, name: &str, type_name: &str, type_hash: &str) -> TokenStream {
        let type_ident = ident(name);
        let generics = generics(self.borrows(name));
        quote! {
            impl #generics ::hdds_cdr::NamedType for #type_ident #generics {
                const TYPE_NAME: &'static str = #type_name;
                const TYPE_HASH: &'static str = #type_hash;
            }
        }
    }

    /// `Name` or `Name<'a>`
    fn named_type(&self, name: &str) -> TokenStream {
        let type_ident = ident(name);
        if self.borrows(name) {
            quote! { #type_ident<'a> }
        } else {
            quote! { #type_ident }
        }
    }

    fn element_type(&self, element: &TypeRef) -> TokenStream {
        match element {
            TypeRef::Base(base) => base_type(*base),
            TypeRef::Named(name) => self.named_type(name),
        }
    }

    fn field_type(&self, field: &FieldDef) -> TokenStream {
        let element = self.element_type(&field.ty.element);
        match field.ty.cardinality {
            Cardinality::Scalar => element,
            Cardinality::Array(len) => {
                let len = Literal::usize_unsuffixed(len);
                quote! { [#element; #len] }
            }
            Cardinality::Sequence => quote! { ::hdds_cdr::Sequence<'a, #element> },
        }
    }

    fn element_descriptor(&self, element: &TypeRef) -> TokenStream {
        match element {
            TypeRef::Base(base) => {
                let konst = ident(base.descriptor_const());
                quote! { ::hdds_cdr::descriptor::#konst }
            }
            TypeRef::Named(name) => {
                let ty = self.named_type(name);
                quote! { <#ty as ::hdds_cdr::Describe>::DESCRIPTOR }
            }
        }
    }

    fn field_descriptor(&self, field: &FieldDef) -> TokenStream {
        let name = field.name.as_str();
        let element = self.element_descriptor(&field.ty.element);
        let cardinality = match field.ty.cardinality {
            Cardinality::Scalar => quote! { ::hdds_cdr::Cardinality::Scalar },
            Cardinality::Array(len) => {
                let len = Literal::usize_unsuffixed(len);
                quote! { ::hdds_cdr::Cardinality::FixedArray(#len) }
            }
            Cardinality::Sequence => quote! { ::hdds_cdr::Cardinality::Sequence },
        };
        quote! {
            ::hdds_cdr::FieldDescriptor {
                name: #name,
                element: #element,
                cardinality: #cardinality,
            }
        }
    }
}

impl ToTokens for CompiledSchema {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        tokens.extend(self.expand());
    }
}

/// Names are validated identifiers before generation starts.
fn ident(name: &str) -> Ident {
    Ident::new(name, Span::call_site())
}

fn generics(borrows: bool) -> TokenStream {
    if borrows {
        quote! { <'a> }
    } else {
        TokenStream::new()
    }
}

/// Borrowing types decode from input that outlives their own `'a`; plain
/// types decode from any input.
fn decode_lifetime(borrows: bool) -> (TokenStream, TokenStream) {
    if borrows {
        (quote! { <'a> }, quote! { 'a })
    } else {
        (quote! { <'de> }, quote! { 'de })
    }
}

fn base_type(base: BaseType) -> TokenStream {
    match base {
        BaseType::Bool => quote! { bool },
        BaseType::Char | BaseType::Uint8 => quote! { u8 },
        BaseType::Int8 => quote! { i8 },
        BaseType::Int16 => quote! { i16 },
        BaseType::Uint16 => quote! { u16 },
        BaseType::Int32 => quote! { i32 },
        BaseType::Uint32 => quote! { u32 },
        BaseType::Int64 => quote! { i64 },
        BaseType::Uint64 => quote! { u64 },
        BaseType::Float32 => quote! { f32 },
        BaseType::Float64 => quote! { f64 },
        BaseType::String => quote! { &'a str },
    }
}

/// Arrays go through `from_fn`: `[T; N]: Default` stops at 32.
fn default_value(cardinality: Cardinality) -> TokenStream {
    match cardinality {
        Cardinality::Scalar => quote! { ::core::default::Default::default() },
        Cardinality::Array(_) => {
            quote! { ::core::array::from_fn(|_| ::core::default::Default::default()) }
        }
        Cardinality::Sequence => quote! { ::hdds_cdr::Sequence::empty() },
    }
}

fn doc_attrs(docs: &[String]) -> TokenStream {
    let lines = docs.iter().map(|line| format!(" {line}"));
    quote! { #(#[doc = #lines])* }
}
