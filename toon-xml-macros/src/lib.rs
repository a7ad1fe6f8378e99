use heck::ToPascalCase;
use quote::quote;
use syn::{parse_quote, Expr, Field, Fields, FieldsNamed, ItemStruct, Lit, Meta, Type};

/// Turns a struct into a deserializable XML element: every field becomes public and is
/// read from the `@field` attribute (or from `field`-named children for `Vec`s), a `name`
/// attribute is added when missing, and `Named` is implemented.
#[proc_macro_attribute]
pub fn element(
    _attr: proc_macro::TokenStream,
    item: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    let mut item = syn::parse_macro_input!(item as ItemStruct);

    item.attrs
        .push(parse_quote!(#[derive(Deserialize, Debug, PartialEq, Clone)]));

    item.attrs.push(parse_quote!(#[serde(deny_unknown_fields)]));

    item.vis = parse_quote!(pub);

    if let Fields::Named(fields) = &mut item.fields {
        process_element_fields(fields);
    }

    let name = &item.ident;

    quote! {
        #item

        impl crate::Named for #name {
            fn name(&self) -> &str {
                &self.name
            }

            fn name_mut(&mut self) -> &mut String {
                &mut self.name
            }
        }
    }
    .into()
}

fn process_element_fields(fields: &mut FieldsNamed) {
    let has_name = fields
        .named
        .iter()
        .flat_map(|f| f.ident.as_ref())
        .any(|i| i == "name");

    if !has_name {
        fields.named.push(parse_quote!(name: String));
    }

    for field in &mut fields.named {
        field.vis = parse_quote!(pub);
        let rename = match take_rename(field) {
            Some(rename) => rename,
            None => default_element_rename(field),
        };
        field.attrs.push(parse_quote!(#[serde(rename = #rename)]));
    }
}

fn default_element_rename(field: &mut Field) -> String {
    let ident = field.ident.as_ref().unwrap();

    if is_named(&field.ty, "Vec") {
        if let Some(singular) = ident.to_string().strip_suffix('s') {
            field.attrs.push(parse_quote!(#[serde(default)]));
            return singular.to_owned();
        }
    }

    format!("@{ident}")
}

/// Generates slot enumeration for a record of optional target properties.
///
/// Every `Option<T>` field is a slot named `_PascalCaseField` (or `#[rename = "..."]`);
/// fields marked `#[skip]` are not slots. The generated `slots()` yields only the slots
/// that are set, converted with `SlotValue::from`, which must be in scope.
#[proc_macro_attribute]
pub fn property_set(
    _attr: proc_macro::TokenStream,
    item: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    let mut item = syn::parse_macro_input!(item as ItemStruct);

    let slots = match &mut item.fields {
        Fields::Named(fields) => collect_slots(fields),
        _ => Err(syn::Error::new(
            item.ident.span(),
            "property_set needs named fields",
        )),
    };

    let slots = match slots {
        Ok(slots) => slots,
        Err(e) => return e.to_compile_error().into(),
    };

    let name = &item.ident;
    let idents = slots.iter().map(|(ident, _)| ident);
    let slot_names = slots.iter().map(|(_, name)| name).collect::<Vec<_>>();

    quote! {
        #item

        impl #name {
            /// Every slot name, in declaration order.
            pub const SLOT_NAMES: &'static [&'static str] = &[#(#slot_names),*];

            /// The slots that are set, in declaration order.
            pub fn slots(&self) -> Vec<(&'static str, SlotValue)> {
                let mut slots = Vec::new();
                #(
                    if let Some(value) = &self.#idents {
                        slots.push((#slot_names, SlotValue::from(value.clone())));
                    }
                )*
                slots
            }
        }
    }
    .into()
}

fn collect_slots(fields: &mut FieldsNamed) -> syn::Result<Vec<(syn::Ident, String)>> {
    let mut slots = vec![];

    for field in &mut fields.named {
        if take_flag(field, "skip") {
            continue;
        }

        let ident = field.ident.clone().unwrap();
        if !is_named(&field.ty, "Option") {
            return Err(syn::Error::new_spanned(
                &field.ty,
                "property slots must be Option<_>; mark other fields #[skip]",
            ));
        }

        let slot_name = take_rename(field)
            .unwrap_or_else(|| format!("_{}", ident.to_string().to_pascal_case()));
        slots.push((ident, slot_name));
    }

    Ok(slots)
}

fn take_flag(field: &mut Field, flag: &str) -> bool {
    let before = field.attrs.len();
    field
        .attrs
        .retain(|attr| !matches!(&attr.meta, Meta::Path(p) if p.is_ident(flag)));
    field.attrs.len() != before
}

fn take_rename(field: &mut Field) -> Option<String> {
    for i in 0..field.attrs.len() {
        let attr = &field.attrs[i];

        let Meta::NameValue(mnv) = &attr.meta else {
            continue;
        };

        if !mnv.path.get_ident().is_some_and(|ident| ident == "rename") {
            continue;
        }

        let Expr::Lit(lit) = &mnv.value else {
            continue;
        };

        let Lit::Str(s) = &lit.lit else {
            continue;
        };

        let rename = s.value();
        field.attrs.remove(i);
        return Some(rename);
    }

    None
}

fn is_named(ty: &Type, outer: &str) -> bool {
    let Type::Path(ty) = ty else {
        return false;
    };

    let Some(last) = ty.path.segments.last() else {
        return false;
    };

    last.ident == outer
}
