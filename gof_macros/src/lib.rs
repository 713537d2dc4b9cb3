use proc_macro::TokenStream;
use quote::quote;
use syn::{
    parse::{Parse, ParseStream},
    parse_macro_input,
    punctuated::Punctuated,
    Attribute, Ident, ImplItem, ItemImpl, LitStr, Meta, Result as SynResult, Token,
};

const POST_SUFFIX: &str = "_post";

struct ControllerArgs {
    filter: bool,
}

impl Parse for ControllerArgs {
    fn parse(input: ParseStream) -> SynResult<Self> {
        let mut filter = false;
        let flags = Punctuated::<Ident, Token![,]>::parse_terminated(input)?;
        for flag in flags {
            match flag.to_string().as_str() {
                "filter" => filter = true,
                other => {
                    return Err(syn::Error::new(
                        flag.span(),
                        format!("unexpected controller option {}", other),
                    ))
                }
            }
        }
        Ok(ControllerArgs { filter })
    }
}

/// PascalCase action name for a snake_case method, keeping a trailing
/// `_post` verbatim: `my_settings` -> `MySettings`, `login_post` -> `Login_post`.
fn action_name_for(method: &str) -> String {
    let method = method.strip_prefix("r#").unwrap_or(method);
    let (stem, suffix) = match method.strip_suffix(POST_SUFFIX) {
        Some(stem) if !stem.is_empty() => (stem, POST_SUFFIX),
        _ => (method, ""),
    };

    let mut name = String::with_capacity(method.len());
    for word in stem.split('_').filter(|w| !w.is_empty()) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            name.extend(first.to_uppercase());
            name.push_str(chars.as_str());
        }
    }
    name.push_str(suffix);
    name
}

/// `#[action]` yields `None`, `#[action("Name")]` yields the explicit name.
fn explicit_name(attr: &Attribute) -> SynResult<Option<String>> {
    match &attr.meta {
        Meta::Path(_) => Ok(None),
        Meta::List(_) => Ok(Some(attr.parse_args::<LitStr>()?.value())),
        Meta::NameValue(nv) => Err(syn::Error::new_spanned(
            nv,
            "expected #[action] or #[action(\"Name\")]",
        )),
    }
}

/// Derive `gof::controller::Controller` from an inherent impl block.
///
/// Methods marked `#[action]` are registered under the PascalCase form of
/// their name; `#[action("Name")]` registers under `Name` instead.
/// `#[controller(filter)]` additionally exposes the type's `Filter` impl.
///
/// ```rust,ignore
/// #[gof::controller(filter)]
/// impl Account {
///     #[action]
///     fn login(&self, ctx: &mut Context) { /* GET /login */ }
///
///     #[action]
///     fn login_post(&self, ctx: &mut Context, form: Value) { /* POST /login */ }
///
///     #[action("Index")]
///     fn overview(&self, ctx: &mut Context) { /* GET / */ }
/// }
/// ```
#[proc_macro_attribute]
pub fn controller(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as ControllerArgs);
    let mut input = parse_macro_input!(item as ItemImpl);

    if let Some((_, path, _)) = &input.trait_ {
        return syn::Error::new_spanned(path, "#[controller] expects an inherent impl block")
            .to_compile_error()
            .into();
    }

    let mut registrations = Vec::new();
    for item in &mut input.items {
        let ImplItem::Fn(method) = item else {
            continue;
        };

        let mut marked = false;
        let mut explicit = None;
        let mut error = None;
        method.attrs.retain(|attr| {
            if !attr.path().is_ident("action") {
                return true;
            }
            marked = true;
            match explicit_name(attr) {
                Ok(name) => explicit = name,
                Err(e) => error = Some(e),
            }
            false
        });
        if let Some(e) = error {
            return e.to_compile_error().into();
        }
        if !marked {
            continue;
        }

        let ident = &method.sig.ident;
        let name = explicit.unwrap_or_else(|| action_name_for(&ident.to_string()));
        registrations.push(quote! {
            table.action(#name, Self::#ident);
        });
    }

    let self_ty = &input.self_ty;
    let (impl_generics, _, where_clause) = input.generics.split_for_impl();
    let filter = if args.filter {
        quote! {
            fn as_filter(&self) -> ::core::option::Option<&dyn ::gof::controller::Filter> {
                ::core::option::Option::Some(self)
            }
        }
    } else {
        quote! {}
    };

    let expanded = quote! {
        #input

        impl #impl_generics ::gof::controller::Controller for #self_ty #where_clause {
            fn actions(table: &mut ::gof::controller::ActionTable<Self>) {
                #(#registrations)*
            }

            #filter
        }
    };
    TokenStream::from(expanded)
}
