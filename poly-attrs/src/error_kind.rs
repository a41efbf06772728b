use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Expr, Fields, Ident, Result};

/// The tags given in a struct's `#[error(...)]` attribute.
#[derive(Default)]
struct ReportTags {
    message: Option<Expr>,
    labels: Option<Expr>,
    help: Option<Expr>,
}

impl ReportTags {
    /// Collects the tags from the `error` attribute of the given item.
    fn from_input(input: &DeriveInput) -> Result<Self> {
        let mut tags = Self::default();

        for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("error")) {
            attr.parse_nested_meta(|meta| {
                let slot = if meta.path.is_ident("message") {
                    &mut tags.message
                } else if meta.path.is_ident("labels") {
                    &mut tags.labels
                } else if meta.path.is_ident("help") {
                    &mut tags.help
                } else {
                    return Err(meta.error("unknown tag; expected `message`, `labels` or `help`"));
                };

                *slot = Some(meta.value()?.parse()?);
                Ok(())
            })?;
        }

        Ok(tags)
    }
}

/// Returns a statement binding every named field of `self` to a local of the same name, so that
/// tag expressions can refer to fields directly.
fn bind_fields(name: &Ident, fields: &Fields) -> Result<TokenStream2> {
    match fields {
        Fields::Named(named) => {
            let idents = named.named.iter().filter_map(|field| field.ident.as_ref());
            Ok(quote! {
                #[allow(unused_variables)]
                let #name { #(#idents),* } = self;
            })
        },
        Fields::Unit => Ok(TokenStream2::new()),
        Fields::Unnamed(_) => Err(syn::Error::new_spanned(
            name,
            "`ErrorKind` cannot be derived for tuple structs",
        )),
    }
}

/// Generates the `ErrorKind` implementation for the given struct.
pub fn expand(input: DeriveInput) -> Result<TokenStream2> {
    let name = &input.ident;
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(name, "`ErrorKind` can only be derived for structs"));
    };

    let tags = ReportTags::from_input(&input)?;
    let Some(message) = tags.message else {
        return Err(syn::Error::new_spanned(name, "missing `#[error(message = ...)]` attribute"));
    };

    let bindings = bind_fields(name, &data.fields)?;

    // a single unlabeled span if no labels are given
    let labels = tags.labels.map_or_else(|| quote! { [""] }, |labels| quote! { #labels });
    let help = tags.help.map(|help| quote! { report.set_help(#help); });

    Ok(quote! {
        impl ErrorKind for #name {
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }

            fn build_report<'a>(
                &self,
                src_id: &'a str,
                spans: &[std::ops::Range<usize>],
            ) -> ariadne::Report<(&'a str, std::ops::Range<usize>)> {
                #bindings

                let start = spans.first().map_or(0, |span| span.start);
                let labels = #labels
                    .into_iter()
                    .zip(spans)
                    .map(|(text, span)| {
                        let label = ariadne::Label::new((src_id, span.clone()))
                            .with_color(poly_error::EXPR);
                        if text.is_empty() {
                            label
                        } else {
                            label.with_message(text)
                        }
                    })
                    .collect::<Vec<_>>();

                #[allow(unused_mut)]
                let mut report = ariadne::Report::build(ariadne::ReportKind::Error, src_id, start)
                    .with_message(#message)
                    .with_labels(labels);
                #help
                report.finish()
            }
        }
    })
}
