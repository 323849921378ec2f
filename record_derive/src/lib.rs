extern crate proc_macro;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

/// Derives `binform::Record` and `binform::Native` for a struct.
///
/// Every field is encoded, in declaration order, by the canonical descriptor
/// of its type. Fields of tuple structs are named by their position.
#[proc_macro_derive(Record)]
pub fn record_derive(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    impl_record(&ast)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn impl_record(ast: &DeriveInput) -> syn::Result<TokenStream2> {
    let record_trait = quote! { binform::Record };
    let native_trait = quote! { binform::Native };
    let bintype_trait = quote! { binform::BinType };
    let target_trait = quote! { binform::Target };

    let fields = match &ast.data {
        syn::Data::Struct(syn::DataStruct { fields, .. }) => fields,
        syn::Data::Enum(_) => {
            return Err(syn::Error::new_spanned(
                &ast.ident,
                "Derive macro `Record` not implemented for enums, use `bin_enum!` or `bin_union!`",
            ))
        }
        syn::Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                &ast.ident,
                "Derive macro `Record` not implemented for unions",
            ))
        }
    };

    let (member, fname): (Vec<syn::Member>, Vec<String>) = fields
        .iter()
        .enumerate()
        .map(|(i, field)| match &field.ident {
            Some(ident) => (syn::Member::Named(ident.clone()), ident.to_string()),
            None => (syn::Member::Unnamed(syn::Index::from(i)), i.to_string()),
        })
        .unzip();
    let ty: Vec<&syn::Type> = fields.iter().map(|field| &field.ty).collect();

    let name = &ast.ident;
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #record_trait for #name #ty_generics #where_clause {
            const FIELDS: &'static [&'static str] = &[ #( #fname ),* ];

            #[allow(unused_variables)]
            fn write_fields<W: #target_trait>(&self, tgt: &mut W) -> usize {
                0 #( + #bintype_trait::write(&<#ty as #native_trait>::bintype(), tgt, &self.#member) )*
            }

            #[allow(unused_variables)]
            fn read_fields(sink: &mut binform::Sink) -> binform::ReadResult<Self> {
                ::std::result::Result::Ok(Self {
                    #( #member: #bintype_trait::read(&<#ty as #native_trait>::bintype(), sink)?, )*
                })
            }

            fn field_schemas() -> ::std::vec::Vec<(::std::string::String, binform::Schema)> {
                ::std::vec![
                    #( (#fname.to_owned(), #bintype_trait::schema(&<#ty as #native_trait>::bintype())) ),*
                ]
            }
        }

        impl #impl_generics #native_trait for #name #ty_generics #where_clause {
            type BinType = binform::Struct<Self>;

            fn bintype() -> Self::BinType {
                binform::Struct::new()
            }
        }
    })
}
