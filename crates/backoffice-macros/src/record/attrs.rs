//! Attribute parsing for the Record derive macro.
//!
//! Parses the `#[record(...)]` field attributes: a field kind, role flags,
//! `rename = "..."` and `skip`.

use proc_macro2::Span;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Ident, Lit, Meta, Result, Token,
};

/// The declared kind of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// `#[record(text)]`
    Text,
    /// `#[record(number)]`
    Number,
    /// `#[record(date)]`
    Date,
}

impl FieldKind {
    fn from_ident(ident: &Ident) -> Option<Self> {
        match ident.to_string().as_str() {
            "text" => Some(FieldKind::Text),
            "number" => Some(FieldKind::Number),
            "date" => Some(FieldKind::Date),
            _ => None,
        }
    }
}

/// Field-level attributes from `#[record(...)]`.
#[derive(Debug, Clone)]
pub struct RecordAttr {
    pub kind: Option<FieldKind>,
    pub id: bool,
    pub search: bool,
    pub filter: bool,
    pub sort: bool,
    pub range: bool,
    pub skip: bool,
    /// Field name used in filter and sort configuration.
    pub rename: Option<String>,
    pub span: Span,
}

impl Default for RecordAttr {
    fn default() -> Self {
        RecordAttr {
            kind: None,
            id: false,
            search: false,
            filter: false,
            sort: false,
            range: false,
            skip: false,
            rename: None,
            span: Span::call_site(),
        }
    }
}

impl RecordAttr {
    /// Returns `true` if any engine role is requested.
    pub fn has_roles(&self) -> bool {
        self.search || self.filter || self.sort || self.range
    }

    fn set_kind(&mut self, kind: FieldKind, span: Span) -> Result<()> {
        if self.kind.is_some_and(|k| k != kind) {
            return Err(Error::new(span, "conflicting field kinds"));
        }
        self.kind = Some(kind);
        self.span = span;
        Ok(())
    }

    fn merge(&mut self, other: RecordAttr) -> Result<()> {
        if let Some(kind) = other.kind {
            self.set_kind(kind, other.span)?;
        }
        self.id |= other.id;
        self.search |= other.search;
        self.filter |= other.filter;
        self.sort |= other.sort;
        self.range |= other.range;
        self.skip |= other.skip;
        if other.rename.is_some() {
            self.rename = other.rename;
        }
        Ok(())
    }
}

impl Parse for RecordAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = RecordAttr::default();

        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                Meta::Path(p) => {
                    let Some(ident) = p.get_ident() else {
                        return Err(Error::new(p.span(), "expected a record attribute"));
                    };
                    if let Some(kind) = FieldKind::from_ident(ident) {
                        attr.set_kind(kind, ident.span())?;
                        continue;
                    }
                    match ident.to_string().as_str() {
                        "id" => attr.id = true,
                        "search" => attr.search = true,
                        "filter" => attr.filter = true,
                        "sort" => attr.sort = true,
                        "range" => attr.range = true,
                        "skip" => attr.skip = true,
                        other => {
                            return Err(Error::new(
                                ident.span(),
                                format!(
                                    "unknown record attribute: '{}'. Expected one of: text, number, date, id, search, filter, sort, range, skip, rename = \"...\"",
                                    other
                                ),
                            ))
                        }
                    }
                }

                Meta::NameValue(nv) => {
                    if !nv.path.is_ident("rename") {
                        return Err(Error::new(
                            nv.path.span(),
                            "unknown attribute. Expected: rename",
                        ));
                    }
                    match &nv.value {
                        syn::Expr::Lit(syn::ExprLit {
                            lit: Lit::Str(s), ..
                        }) => attr.rename = Some(s.value()),
                        _ => {
                            return Err(Error::new(
                                nv.value.span(),
                                "rename must be a string literal",
                            ))
                        }
                    }
                }

                Meta::List(_) => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown record attribute. Expected: text, number, date, id, search, filter, sort, range, skip, or rename = \"...\"",
                    ));
                }
            }
        }

        Ok(attr)
    }
}

/// Collects every `#[record(...)]` attribute on a field into one.
pub fn parse_record_attrs(attrs: &[Attribute]) -> Result<RecordAttr> {
    let mut merged = RecordAttr::default();
    for attr in attrs {
        if attr.path().is_ident("record") {
            merged.merge(attr.parse_args::<RecordAttr>()?)?;
        }
    }
    Ok(merged)
}
