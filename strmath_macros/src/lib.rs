use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, FnArg, ItemFn, PatType, Type};

/// How a single parameter of a `#[math_fn]` function is filled from the
/// argument slice.
enum Param {
    Required,
    Optional,
    Rest,
}

fn classify(ty: &Type) -> Option<Param> {
    match ty {
        Type::Path(type_path) => {
            let segment = type_path.path.segments.last()?;
            match segment.ident.to_string().as_str() {
                "f64" => Some(Param::Required),
                "Option" => Some(Param::Optional),
                _ => None,
            }
        }
        Type::Reference(reference) => match *reference.elem {
            Type::Slice(_) => Some(Param::Rest),
            _ => None,
        },
        _ => None,
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        "argument"
    } else {
        "arguments"
    }
}

/// Turns `fn name(x: f64, base: Option<f64>, rest: &[f64]) -> R` into
/// `fn name(args: &[f64]) -> R`, checking the argument count before the
/// body runs.
///
/// Parameters are filled positionally: `f64` parameters are required,
/// `Option<f64>` parameters may be left out from the right, and a final
/// `&[f64]` receives whatever is left.
#[proc_macro_attribute]
pub fn math_fn(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    let attrs = &input.attrs;
    let vis = &input.vis;
    let fn_name = &input.sig.ident;
    let fn_args = &input.sig.inputs;
    let fn_body = &input.block;
    let fn_output = &input.sig.output;

    let mut extractions = Vec::new();
    let mut required = 0usize;
    let mut optional = 0usize;
    let mut variadic = false;

    for (i, arg) in fn_args.iter().enumerate() {
        let FnArg::Typed(PatType { pat, ty, .. }) = arg else {
            return syn::Error::new_spanned(arg, "math_fn functions cannot take self")
                .to_compile_error()
                .into();
        };

        if variadic {
            return syn::Error::new_spanned(arg, "a slice parameter must come last")
                .to_compile_error()
                .into();
        }

        let extract = match classify(ty) {
            Some(Param::Required) if optional == 0 => {
                required += 1;
                quote! { let #pat: f64 = args[#i]; }
            }
            Some(Param::Required) => {
                return syn::Error::new_spanned(arg, "required parameters must precede optional ones")
                    .to_compile_error()
                    .into();
            }
            Some(Param::Optional) => {
                optional += 1;
                quote! { let #pat: Option<f64> = args.get(#i).copied(); }
            }
            Some(Param::Rest) => {
                variadic = true;
                quote! { let #pat: &[f64] = &args[#i..]; }
            }
            None => {
                return syn::Error::new_spanned(ty, "expected `f64`, `Option<f64>` or `&[f64]`")
                    .to_compile_error()
                    .into();
            }
        };
        extractions.push(extract);
    }

    let name = fn_name.to_string();
    let maximum = required + optional;
    let arity_check = if variadic {
        let message = format!(
            "{}() takes at least {} {}",
            name,
            required,
            plural(required)
        );
        quote! {
            if args.len() < #required {
                return Err(format!("{} ({} given)", #message, args.len()));
            }
        }
    } else if optional == 0 {
        let message = format!(
            "{}() takes exactly {} {}",
            name,
            required,
            plural(required)
        );
        quote! {
            if args.len() != #required {
                return Err(format!("{} ({} given)", #message, args.len()));
            }
        }
    } else {
        let message = format!(
            "{}() takes from {} to {} arguments",
            name, required, maximum
        );
        quote! {
            if args.len() < #required || args.len() > #maximum {
                return Err(format!("{} ({} given)", #message, args.len()));
            }
        }
    };

    let expanded = quote! {
        #(#attrs)*
        #vis fn #fn_name(args: &[f64]) #fn_output {
            #arity_check

            #(#extractions)*

            #fn_body
        }
    };

    TokenStream::from(expanded)
}
