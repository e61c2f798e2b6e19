use convert_case::{Case, Casing};
use syn::{Field, Ident, LitStr, ext::IdentExt};

pub(crate) struct FieldMetadata {
    pub(crate) ident: Ident,
    pub(crate) name: String,
    pub(crate) ignored: bool,
}

pub(crate) fn decode_field(field: &Field) -> FieldMetadata {
    let ident = field
        .ident
        .clone()
        .expect("Field is expected to have a name");
    let mut metadata = FieldMetadata {
        name: ident.unraw().to_string().to_case(Case::Snake),
        ident,
        ignored: false,
    };
    for attr in &field.attrs {
        let meta = &attr.meta;
        if meta.path().is_ident("column_name") {
            let Ok(v) = attr.parse_args::<LitStr>() else {
                panic!(
                    "Error while parsing `column_name`, use it like: `#[column_name(\"my_column\")]`"
                );
            };
            metadata.name = v.value();
            if metadata.name.is_empty() {
                panic!("Field `{}` has an empty `column_name`", metadata.ident);
            }
        } else if meta.path().is_ident("ignored") {
            if meta.require_path_only().is_err() {
                panic!("Error while parsing `ignored`, use it like: `#[ignored]`");
            }
            metadata.ignored = true;
        }
    }
    metadata
}
