mod decode_field;

use decode_field::decode_field;
use proc_macro::TokenStream;
use quote::quote;
use syn::{Fields, ItemStruct, parse_macro_input};

#[proc_macro_derive(Record, attributes(column_name, ignored))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let item: ItemStruct = parse_macro_input!(input as ItemStruct);
    let name = &item.ident;
    if !item.generics.params.is_empty() {
        panic!("Record `{}` cannot be generic", name);
    }
    let Fields::Named(fields) = &item.fields else {
        panic!("Record `{}` must be a struct with named fields", name);
    };
    let fields = fields
        .named
        .iter()
        .map(decode_field)
        .filter(|f| !f.ignored)
        .collect::<Vec<_>>();
    for (i, field) in fields.iter().enumerate() {
        if fields[..i].iter().any(|f| f.name == field.name) {
            panic!(
                "Column `{}` is declared more than once in `{}`",
                field.name, name
            );
        }
    }
    let columns = fields.iter().map(|f| {
        let ident = &f.ident;
        let column = &f.name;
        quote! {
            ::stencil::Column::new(
                #column,
                |r: &Self| ::stencil::AsValue::as_value(::std::clone::Clone::clone(&r.#ident)),
                |r: &mut Self, v: ::stencil::Value| -> ::stencil::Result<()> {
                    r.#ident = ::stencil::AsValue::try_from_value(v)?;
                    Ok(())
                },
            )
        }
    });
    quote! {
        impl ::stencil::Record for #name {
            fn columns() -> ::std::vec::Vec<::stencil::Column<Self>> {
                ::std::vec![#(#columns),*]
            }
        }
    }
    .into()
}
