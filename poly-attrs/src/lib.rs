mod error_kind;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives `poly_error::ErrorKind` for a struct with named fields or a unit struct.
///
/// The report is described by the `error` attribute:
///
/// ```
/// use poly_attrs::ErrorKind;
/// use poly_error::ErrorKind;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(
///     message = format!("`{}` is not a variable", found),
///     labels = ["this character"],
///     help = "variables are single lowercase letters",
/// )]
/// pub struct NotAVariable {
///     found: char,
/// }
/// ```
///
/// - `message` (required): the headline of the report.
/// - `labels`: an array with one label per span of the error, in order. Empty strings mark a span
///   without a message. Defaults to a single unlabeled span.
/// - `help`: a hint on how to fix the error.
///
/// Every tag is an expression whose value implements [`ToString`]. The fields of the struct are
/// in scope by name, as references.
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    error_kind::expand(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
