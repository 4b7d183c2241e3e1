//! `DescribeTemplate` derive macro implementation.

use proc_macro::TokenStream;
use proc_macro2::{Ident, Span};
use quote::{quote, quote_spanned};
use syn::{
    Attribute, Data, DeriveInput, Field, Fields, Generics, LitStr, Path, Type, spanned::Spanned,
};

use crate::utils::{SerdeNames, is_env_compatible, rename_field};

#[derive(Debug, Default)]
struct TemplateFieldAttrs {
    env: Option<Span>,
    required: Option<Span>,
    rename: Option<LitStr>,
    skip: Option<Span>,
}

impl TemplateFieldAttrs {
    fn new(attrs: &[Attribute]) -> syn::Result<Self> {
        let template_attrs = attrs
            .iter()
            .filter(|attr| attr.path().is_ident("template"));

        let mut this = Self::default();
        for attr in template_attrs {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("env") {
                    this.env = Some(meta.path.span());
                } else if meta.path.is_ident("required") {
                    this.required = Some(meta.path.span());
                } else if meta.path.is_ident("rename") {
                    this.rename = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("skip") {
                    this.skip = Some(meta.path.span());
                } else {
                    return Err(meta.error(
                        "Unsupported attribute; expected one of `env`, `required`, `rename` or `skip`",
                    ));
                }
                Ok(())
            })?;
        }

        if let (Some(required_span), None) = (this.required, this.env) {
            let message = "`required` can only be specified together with `env`";
            return Err(syn::Error::new(required_span, message));
        }
        if let Some(skip_span) = this.skip {
            if this.env.is_some() || this.rename.is_some() {
                let message = "skipped fields cannot have other `template` attributes";
                return Err(syn::Error::new(skip_span, message));
            }
        }
        if let Some(rename) = &this.rename {
            if rename.value().is_empty() {
                return Err(syn::Error::new(rename.span(), "field name cannot be empty"));
            }
        }
        Ok(this)
    }
}

#[derive(Debug)]
struct TemplateField {
    attrs: TemplateFieldAttrs,
    name: Ident,
    ty: Type,
    /// Field name used by `serde`.
    serde_name: String,
}

impl TemplateField {
    fn new(raw: &Field, rename_all: Option<&str>) -> syn::Result<Self> {
        let name = raw.ident.clone().ok_or_else(|| {
            let message = "Only named fields are supported";
            syn::Error::new_spanned(raw, message)
        })?;
        let attrs = TemplateFieldAttrs::new(&raw.attrs)?;

        if attrs.env.is_some() && !is_env_compatible(&raw.ty) {
            let message = "`env` fields must have `String` or `Option<String>` type";
            return Err(syn::Error::new_spanned(&raw.ty, message));
        }

        let serde_name = SerdeNames::new(&raw.attrs).rename.unwrap_or_else(|| {
            let name = unraw(&name);
            rename_all
                .and_then(|rule| rename_field(rule, &name))
                .unwrap_or(name)
        });

        Ok(Self {
            attrs,
            name,
            ty: raw.ty.clone(),
            serde_name,
        })
    }

    fn path_segment(&self) -> String {
        self.attrs
            .rename
            .as_ref()
            .map_or_else(|| unraw(&self.name), LitStr::value)
    }

    fn describe(&self, cr: &proc_macro2::TokenStream) -> proc_macro2::TokenStream {
        let name = &self.name;
        let segment = self.path_segment();
        let serde_name = (self.serde_name != segment).then(|| {
            let serde_name = &self.serde_name;
            quote!(.with_serde_name(#serde_name))
        });
        let env = self.attrs.env.map(|span| quote_spanned!(span=> .env()));
        let required = self
            .attrs
            .required
            .map(|span| quote_spanned!(span=> .required()));

        quote_spanned! {self.ty.span()=>
            #cr::node::Field::new(
                #segment,
                #cr::node::FieldOptions::new() #env #required,
                #cr::DescribeTemplate::describe(&self.#name),
            ) #serde_name
        }
    }
}

#[derive(Debug)]
struct TemplateContainer {
    name: Ident,
    generics: Generics,
    cr: Option<Path>,
    fields: Vec<TemplateField>,
}

impl TemplateContainer {
    fn new(raw: &DeriveInput) -> syn::Result<Self> {
        let template_attrs = raw
            .attrs
            .iter()
            .filter(|attr| attr.path().is_ident("template"));
        let mut cr = None;
        for attr in template_attrs {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("crate") {
                    cr = Some(meta.value()?.parse()?);
                    Ok(())
                } else {
                    Err(meta.error("Unsupported attribute; only `crate` is supported"))
                }
            })?;
        }

        let Data::Struct(data) = &raw.data else {
            let message = "Only structs are supported";
            return Err(syn::Error::new_spanned(&raw.ident, message));
        };
        let Fields::Named(fields) = &data.fields else {
            let message = "Only structs with named fields are supported";
            return Err(syn::Error::new_spanned(&raw.ident, message));
        };
        let rename_all = SerdeNames::new(&raw.attrs).rename_all;
        let fields = fields
            .named
            .iter()
            .map(|field| TemplateField::new(field, rename_all.as_deref()))
            .collect::<syn::Result<Vec<_>>>()?;

        let mut segments = fields
            .iter()
            .filter(|field| field.attrs.skip.is_none())
            .map(|field| (field.path_segment(), field));
        let mut seen = std::collections::HashSet::new();
        if let Some((segment, field)) = segments.find(|(segment, _)| !seen.insert(segment.clone()))
        {
            let message = format!("Field name `{segment}` is used by multiple fields");
            return Err(syn::Error::new(field.name.span(), message));
        }

        Ok(Self {
            name: raw.ident.clone(),
            generics: raw.generics.clone(),
            cr,
            fields,
        })
    }

    fn cr(&self) -> proc_macro2::TokenStream {
        if let Some(cr) = &self.cr {
            quote!(#cr)
        } else {
            let name = &self.name;
            quote_spanned!(name.span()=> ::cfg_index)
        }
    }

    fn derive_describe_template(&self) -> proc_macro2::TokenStream {
        let cr = self.cr();
        let name = &self.name;
        let name_str = name.to_string();

        let mut generics = self.generics.clone();
        let type_params: Vec<_> = generics
            .type_params()
            .map(|param| param.ident.clone())
            .collect();
        let where_clause = generics.make_where_clause();
        for param in type_params {
            where_clause
                .predicates
                .push(syn::parse_quote!(#param: #cr::DescribeTemplate));
        }
        let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

        let fields = self
            .fields
            .iter()
            .filter(|field| field.attrs.skip.is_none())
            .map(|field| field.describe(&cr));

        quote! {
            impl #impl_generics #cr::DescribeTemplate for #name #ty_generics #where_clause {
                fn describe(&self) -> #cr::node::Node {
                    #cr::node::Node::Structure(#cr::node::Structure::new(
                        #name_str,
                        ::std::vec![#(#fields,)*],
                    ))
                }
            }
        }
    }
}

/// Strips the raw identifier prefix, e.g. for `r#type`.
fn unraw(ident: &Ident) -> String {
    let name = ident.to_string();
    name.strip_prefix("r#").map(str::to_owned).unwrap_or(name)
}

pub(crate) fn impl_describe_template(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match syn::parse(input) {
        Ok(input) => input,
        Err(err) => return err.into_compile_error().into(),
    };
    match TemplateContainer::new(&input) {
        Ok(container) => container.derive_describe_template().into(),
        Err(err) => err.into_compile_error().into(),
    }
}
