//! Interface macro.
//!
//! This module contains:
//! - `#[interface]` - Attribute macro generating a metadata table and a proxy for a trait

use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{
    Expr, ExprLit, FnArg, GenericArgument, Ident, ItemTrait, Lit, LitStr, MetaNameValue, Pat,
    PatIdent, PathArguments, ReturnType, Signature, Token, TraitItem, TraitItemFn, Type,
    TypeParamBound, parse::Parser, parse_macro_input, punctuated::Punctuated,
};

/// Options of `#[interface(name = "...", proxy = "...")]`.
#[derive(Default)]
struct InterfaceArgs {
    name: Option<LitStr>,
    proxy: Option<LitStr>,
}

impl InterfaceArgs {
    fn from_options(options: Punctuated<MetaNameValue, Token![,]>) -> syn::Result<Self> {
        let mut args = InterfaceArgs::default();
        for option in options {
            let Expr::Lit(ExprLit {
                lit: Lit::Str(value),
                ..
            }) = &option.value
            else {
                return Err(syn::Error::new_spanned(
                    &option.value,
                    "interface options take a string literal",
                ));
            };

            let slot = if option.path.is_ident("name") {
                &mut args.name
            } else if option.path.is_ident("proxy") {
                &mut args.proxy
            } else {
                return Err(syn::Error::new_spanned(
                    &option.path,
                    "expected `name` or `proxy`",
                ));
            };
            if slot.replace(value.clone()).is_some() {
                return Err(syn::Error::new_spanned(&option.path, "option given twice"));
            }
        }
        Ok(args)
    }
}

/// One trait method, checked and prepared for code generation.
struct Method {
    /// The signature with arguments renamed for the proxy body.
    sig: Signature,
    name: LitStr,
    args: Vec<Ident>,
    params: Vec<Type>,
    ok: Type,
    err: Type,
}

/// Implementation of the `#[interface]` macro.
pub fn interface_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemTrait);

    let expanded = Punctuated::<MetaNameValue, Token![,]>::parse_terminated
        .parse(attr)
        .and_then(InterfaceArgs::from_options)
        .and_then(|args| expand(args, &input));

    match expanded {
        Ok(tokens) => tokens.into(),
        Err(err) => {
            // keep the trait so the caller only sees the macro error
            let err = err.to_compile_error();
            quote! { #input #err }.into()
        }
    }
}

fn expand(args: InterfaceArgs, input: &ItemTrait) -> syn::Result<proc_macro2::TokenStream> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "interface traits cannot have generic parameters",
        ));
    }

    let trait_name = &input.ident;
    let vis = &input.vis;
    let display_name = args
        .name
        .unwrap_or_else(|| LitStr::new(&trait_name.to_string(), trait_name.span()));

    let methods = input
        .items
        .iter()
        .map(|item| match item {
            TraitItem::Fn(method) => analyze(method),
            other => Err(syn::Error::new_spanned(
                other,
                "interfaces may only declare methods",
            )),
        })
        .collect::<syn::Result<Vec<_>>>()?;

    let table = methods.iter().map(|m| {
        let name = &m.name;
        let params = &m.params;
        let ok = &m.ok;
        quote! {
            .method(
                #name,
                ::std::vec![#(::polymethod::ParamType::of::<#params>()),*],
                ::polymethod::ParamType::of::<#ok>(),
            )
        }
    });

    let descriptor = quote! {
        #input

        impl ::polymethod::Interface for dyn #trait_name {
            fn descriptor() -> &'static ::polymethod::InterfaceDescriptor {
                static DESCRIPTOR: ::std::sync::LazyLock<::polymethod::InterfaceDescriptor> =
                    ::std::sync::LazyLock::new(|| {
                        ::polymethod::InterfaceDescriptor::builder::<dyn #trait_name>(#display_name)
                            #(#table)*
                            .build()
                    });
                &DESCRIPTOR
            }
        }
    };

    // A proxy cannot implement interface supertraits it knows nothing about,
    // so such traits only get their metadata table.
    if let Some(bound) = input.supertraits.iter().find(|bound| !is_marker(bound)) {
        if let Some(proxy) = &args.proxy {
            return Err(syn::Error::new_spanned(
                proxy,
                format!(
                    "no proxy can be generated for a trait extending `{}`",
                    quote!(#bound)
                ),
            ));
        }
        return Ok(descriptor);
    }

    let proxy_name = match &args.proxy {
        Some(custom) => Ident::new(&custom.value(), custom.span()),
        None => format_ident!("{}Proxy", trait_name),
    };

    let forwards = methods.iter().enumerate().map(|(index, m)| {
        let sig = &m.sig;
        let args = &m.args;
        let ok = &m.ok;
        let err = &m.err;

        let finish = if is_unit(ok) {
            quote! {
                ::std::mem::drop(__reply);
                ::std::result::Result::Ok(())
            }
        } else {
            quote! {
                __reply.downcast::<#ok>().map_err(|__reply| {
                    <#err as ::std::convert::From<::polymethod::InvokeError>>::from(
                        ::polymethod::InvokeError::UnexpectedReply {
                            method: __method.key().clone(),
                            expected: ::std::any::type_name::<#ok>(),
                            actual: __reply.type_name(),
                        },
                    )
                })
            }
        };

        quote! {
            #sig {
                #[allow(unused_imports)]
                use ::polymethod::__private::{ViaAny as _, ViaError as _};

                let __method = &<dyn #trait_name as ::polymethod::Interface>::descriptor().methods()[#index];
                let __args = ::polymethod::Args::new()#(.with(#args))*;
                let __reply = self
                    .dispatch
                    .invoke(__method, __args)
                    .map_err(|__err| match __err {
                        ::polymethod::InvokeError::Handler(__source) => {
                            (&::polymethod::__private::HandlerError::<#err>::new()).convert(__source)
                        }
                        __other => <#err as ::std::convert::From<::polymethod::InvokeError>>::from(__other),
                    })?;
                #finish
            }
        }
    });

    let proxy_doc = format!("Forwards every `{trait_name}` call to a dispatcher.");

    Ok(quote! {
        #descriptor

        impl ::polymethod::Proxied for dyn #trait_name {
            fn proxy(
                dispatch: ::std::sync::Arc<dyn ::polymethod::Dispatch>,
            ) -> ::std::boxed::Box<Self> {
                ::std::boxed::Box::new(#proxy_name::new(dispatch))
            }
        }

        #[doc = #proxy_doc]
        #vis struct #proxy_name {
            dispatch: ::std::sync::Arc<dyn ::polymethod::Dispatch>,
        }

        impl #proxy_name {
            /// Wrap `dispatch`.
            pub fn new(dispatch: ::std::sync::Arc<dyn ::polymethod::Dispatch>) -> Self {
                Self { dispatch }
            }

            /// The dispatcher receiving the calls.
            pub fn dispatch(&self) -> &::std::sync::Arc<dyn ::polymethod::Dispatch> {
                &self.dispatch
            }
        }

        impl #trait_name for #proxy_name {
            #(#forwards)*
        }
    })
}

/// Auto traits and lifetimes a proxy satisfies on its own.
fn is_marker(bound: &TypeParamBound) -> bool {
    match bound {
        TypeParamBound::Trait(bound) => bound
            .path
            .segments
            .last()
            .is_some_and(|segment| {
                ["Send", "Sync", "Unpin"]
                    .iter()
                    .any(|marker| segment.ident == marker)
            }),
        _ => true,
    }
}

fn analyze(method: &TraitItemFn) -> syn::Result<Method> {
    let sig = &method.sig;

    if let Some(asyncness) = &sig.asyncness {
        return Err(syn::Error::new_spanned(
            asyncness,
            "interface methods must be synchronous",
        ));
    }
    if !sig.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &sig.generics,
            "interface methods cannot have generic parameters",
        ));
    }
    match sig.receiver() {
        Some(receiver) if receiver.reference.is_some() && receiver.mutability.is_none() => {}
        _ => {
            return Err(syn::Error::new_spanned(
                sig,
                "interface methods must take `&self`",
            ));
        }
    }

    let (ok, err) = split_result(&sig.output).ok_or_else(|| {
        syn::Error::new_spanned(
            sig,
            "interface methods must return `Result<T, E>` where `E: From<polymethod::InvokeError>`",
        )
    })?;

    let mut proxy_sig = sig.clone();
    let mut args = Vec::new();
    let mut params = Vec::new();
    for (i, input) in proxy_sig.inputs.iter_mut().enumerate() {
        let FnArg::Typed(pat_type) = input else {
            continue;
        };
        match &*pat_type.ty {
            Type::Reference(_) => {
                return Err(syn::Error::new_spanned(
                    &pat_type.ty,
                    "interface method arguments must be owned",
                ));
            }
            Type::ImplTrait(_) => {
                return Err(syn::Error::new_spanned(
                    &pat_type.ty,
                    "`impl Trait` arguments are not supported",
                ));
            }
            _ => {}
        }

        let ident = format_ident!("__arg{}", i);
        pat_type.pat = Box::new(Pat::Ident(PatIdent {
            attrs: Vec::new(),
            by_ref: None,
            mutability: None,
            ident: ident.clone(),
            subpat: None,
        }));
        args.push(ident);
        params.push((*pat_type.ty).clone());
    }

    Ok(Method {
        sig: proxy_sig,
        name: LitStr::new(&sig.ident.to_string(), sig.ident.span()),
        args,
        params,
        ok,
        err,
    })
}

/// Split `Result<T, E>` (under any path) into `T` and `E`.
fn split_result(output: &ReturnType) -> Option<(Type, Type)> {
    let ReturnType::Type(_, ty) = output else {
        return None;
    };
    let Type::Path(path) = &**ty else {
        return None;
    };
    if path.qself.is_some() {
        return None;
    }

    let segment = path.path.segments.last()?;
    if segment.ident != "Result" {
        return None;
    }
    let PathArguments::AngleBracketed(generics) = &segment.arguments else {
        return None;
    };

    let mut types = generics.args.iter().filter_map(|arg| match arg {
        GenericArgument::Type(ty) => Some(ty.clone()),
        _ => None,
    });
    let ok = types.next()?;
    let err = types.next()?;
    if types.next().is_some() {
        return None;
    }
    Some((ok, err))
}

fn is_unit(ty: &Type) -> bool {
    matches!(ty, Type::Tuple(tuple) if tuple.elems.is_empty())
}
