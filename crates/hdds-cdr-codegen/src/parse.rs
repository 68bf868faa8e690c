// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Parsing of the `schema!` table.
//!
//! ```text
//! table   := entry*
//! entry   := doc* ( message | alias | service )
//! message := "message" Ident "=" identity "{" fields "}"
//! alias   := "alias" Ident "=" identity type ";"
//! service := "service" Ident "=" identity "{" "request" "{" fields "}" "reply" "{" fields "}" "}"
//! identity:= "(" LitStr "," LitStr ","? ")"
//! fields  := ( doc* Ident ":" field_type ),* ","?
//! field_type := type | "[" type ";" LitInt "]" | type "[" LitInt? "]" | "sequence" "<" type ">"
//! ```

use std::collections::HashMap;

use hdds_cdr_schema::{
    AliasDef, FieldDef, FieldType, Identity, MessageDef, Schema, SchemaError, ServiceDef,
    TypeDef, TypeRef,
};
use proc_macro2::{Span, TokenStream};
use syn::parse::{Parse, ParseStream};
use syn::{
    bracketed, parenthesized, Attribute, Error, Expr, Ident, Lit, LitInt, LitStr, Meta, Result,
    Token,
};

mod kw {
    syn::custom_keyword!(message);
    syn::custom_keyword!(alias);
    syn::custom_keyword!(service);
    syn::custom_keyword!(request);
    syn::custom_keyword!(reply);
    syn::custom_keyword!(sequence);
}

/// Parsed table plus the source span of every declared name.
#[derive(Debug)]
pub struct SchemaTable {
    pub schema: Schema,
    spans: HashMap<String, Span>,
}

impl SchemaTable {
    /// Validate and generate, turning schema errors into spanned compile
    /// errors (all of them, not just the first).
    pub fn expand(self) -> TokenStream {
        let errors: Vec<Error> = self
            .schema
            .diagnostics()
            .into_iter()
            .map(|err| Error::new(self.span_of(&err), err.to_string()))
            .collect();
        let mut errors = errors.into_iter();
        if let Some(mut combined) = errors.next() {
            for err in errors {
                combined.combine(err);
            }
            return combined.to_compile_error();
        }

        match self.schema.compile() {
            Ok(compiled) => compiled.expand(),
            Err(err) => Error::new(Span::call_site(), err.to_string()).to_compile_error(),
        }
    }

    fn span_of(&self, err: &SchemaError) -> Span {
        err.type_name()
            .and_then(|name| self.spans.get(name))
            .copied()
            .unwrap_or_else(Span::call_site)
    }
}

impl Parse for SchemaTable {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut schema = Schema::new();
        let mut spans = HashMap::new();

        while !input.is_empty() {
            let docs = parse_docs(input)?;
            let lookahead = input.lookahead1();

            if lookahead.peek(kw::message) {
                input.parse::<kw::message>()?;
                let (name, identity) = parse_head(input)?;
                let content;
                syn::braced!(content in input);
                let fields = parse_fields(&content)?;
                spans.insert(name.to_string(), name.span());
                schema.push(TypeDef::Message(MessageDef {
                    name: name.to_string(),
                    identity,
                    fields,
                    docs,
                }));
            } else if lookahead.peek(kw::alias) {
                input.parse::<kw::alias>()?;
                let (name, identity) = parse_head(input)?;
                let target = parse_type_ref(input)?;
                input.parse::<Token![;]>()?;
                spans.insert(name.to_string(), name.span());
                schema.push(TypeDef::Alias(AliasDef {
                    name: name.to_string(),
                    identity,
                    target,
                    docs,
                }));
            } else if lookahead.peek(kw::service) {
                input.parse::<kw::service>()?;
                let (name, identity) = parse_head(input)?;
                let body;
                syn::braced!(body in input);

                body.parse::<kw::request>()?;
                let request;
                syn::braced!(request in body);
                let request = parse_fields(&request)?;

                body.parse::<kw::reply>()?;
                let reply;
                syn::braced!(reply in body);
                let reply = parse_fields(&reply)?;

                let service = ServiceDef {
                    name: name.to_string(),
                    identity,
                    request,
                    reply,
                    docs,
                };
                let generated = [
                    service.name.clone(),
                    service.request_name(),
                    service.reply_name(),
                ];
                for generated in generated {
                    spans.insert(generated, name.span());
                }
                schema.push(TypeDef::Service(service));
            } else {
                return Err(lookahead.error());
            }
        }

        Ok(Self { schema, spans })
    }
}

/// `Name = ("type::name", "hash")`
fn parse_head(input: ParseStream) -> Result<(Ident, Identity)> {
    let name: Ident = input.parse()?;
    input.parse::<Token![=]>()?;

    let content;
    parenthesized!(content in input);
    let type_name: LitStr = content.parse()?;
    content.parse::<Token![,]>()?;
    let type_hash: LitStr = content.parse()?;
    if !content.is_empty() {
        content.parse::<Token![,]>()?;
    }

    Ok((name, Identity::new(type_name.value(), type_hash.value())))
}

fn parse_fields(input: ParseStream) -> Result<Vec<FieldDef>> {
    let mut fields = Vec::new();
    while !input.is_empty() {
        let docs = parse_docs(input)?;
        let name: Ident = input.parse()?;
        input.parse::<Token![:]>()?;
        let ty = parse_field_type(input)?;
        fields.push(FieldDef {
            name: name.to_string(),
            ty,
            docs,
        });

        if input.is_empty() {
            break;
        }
        input.parse::<Token![,]>()?;
    }
    Ok(fields)
}

fn parse_field_type(input: ParseStream) -> Result<FieldType> {
    if input.peek(syn::token::Bracket) {
        let content;
        bracketed!(content in input);
        let element = parse_type_ref(&content)?;
        content.parse::<Token![;]>()?;
        let len = parse_len(&content)?;
        return Ok(FieldType::array(element, len));
    }

    if input.peek(kw::sequence) && input.peek2(Token![<]) {
        input.parse::<kw::sequence>()?;
        input.parse::<Token![<]>()?;
        let element = parse_type_ref(input)?;
        input.parse::<Token![>]>()?;
        return Ok(FieldType::sequence(element));
    }

    let element = parse_type_ref(input)?;
    if input.peek(syn::token::Bracket) {
        // ROS-style suffix: `T[N]` or unbounded `T[]`
        let content;
        bracketed!(content in input);
        if content.is_empty() {
            return Ok(FieldType::sequence(element));
        }
        let len = parse_len(&content)?;
        return Ok(FieldType::array(element, len));
    }
    Ok(FieldType::scalar(element))
}

fn parse_len(input: ParseStream) -> Result<usize> {
    let len: LitInt = input.parse()?;
    len.base10_parse()
}

fn parse_type_ref(input: ParseStream) -> Result<TypeRef> {
    let ident: Ident = input.parse()?;
    Ok(TypeRef::from_name(&ident.to_string()))
}

/// Collect `///` comments; any other attribute is rejected.
fn parse_docs(input: ParseStream) -> Result<Vec<String>> {
    let mut docs = Vec::new();
    for attr in input.call(Attribute::parse_outer)? {
        docs.push(doc_text(&attr)?);
    }
    Ok(docs)
}

fn doc_text(attr: &Attribute) -> Result<String> {
    if let Meta::NameValue(meta) = &attr.meta {
        if meta.path.is_ident("doc") {
            if let Expr::Lit(expr) = &meta.value {
                if let Lit::Str(text) = &expr.lit {
                    let text = text.value();
                    return Ok(text.strip_prefix(' ').unwrap_or(&text).to_string());
                }
            }
        }
    }
    Err(Error::new_spanned(
        attr,
        "only doc comments are allowed in a schema table",
    ))
}
