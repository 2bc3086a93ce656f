//! TypeScript rendering helpers shared by the emitters

use restgen_common::{NamingContext, ParameterSpec, PathPlaceholder, PropertyExpr, TypeExpr};

const INDENT: &str = "  ";

/// Whether `name` can be written as a bare TypeScript identifier
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Property key, quoted when it is not an identifier
///
/// # Examples
/// ```
/// use restgen_generator::typescript::property_key;
///
/// assert_eq!(property_key("name"), "name");
/// assert_eq!(property_key("x-rate-limit"), "'x-rate-limit'");
/// ```
pub fn property_key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        format!("'{}'", name.replace('\\', "\\\\").replace('\'', "\\'"))
    }
}

/// Render a declaration-side type expression at nesting depth `depth`
pub fn render_type(expr: &TypeExpr, naming: &NamingContext, depth: usize) -> String {
    match expr {
        TypeExpr::Primitive(primitive) => primitive.ts_name().to_string(),
        TypeExpr::Named(name) => naming.component_type(name),
        TypeExpr::Array(items) => format!("{}[]", render_type(items, naming, depth)),
        TypeExpr::Object(properties) => object_type(properties, naming, depth),
        TypeExpr::Map(value) => format!(
            "{{ [key: string]: {} }}",
            render_type(value, naming, depth)
        ),
    }
}

/// Render an object type literal, one property per line
pub fn object_type(properties: &[PropertyExpr], naming: &NamingContext, depth: usize) -> String {
    if properties.is_empty() {
        return "{}".to_string();
    }

    let inner = INDENT.repeat(depth + 1);
    let mut out = String::from("{\n");
    for property in properties {
        out.push_str(&format!(
            "{}{}{}: {};\n",
            inner,
            property_key(&property.name),
            if property.required { "" } else { "?" },
            render_type(&property.ty, naming, depth + 1)
        ));
    }
    out.push_str(&INDENT.repeat(depth));
    out.push('}');
    out
}

/// Object type of a parameter group (`$pathParameters`, `$queryParameters`)
pub fn parameters_type(params: &[ParameterSpec], naming: &NamingContext, depth: usize) -> String {
    let properties: Vec<PropertyExpr> = params
        .iter()
        .map(|param| PropertyExpr {
            name: param.name.clone(),
            required: param.required,
            ty: param.ty.clone(),
        })
        .collect();
    object_type(&properties, naming, depth)
}

/// URL template as a string literal, placeholders interpolated
///
/// # Examples
/// ```
/// use restgen_common::PathPlaceholder;
/// use restgen_generator::typescript::url_literal;
///
/// let id = PathPlaceholder { raw: "item_id".into(), ident: "itemId".into() };
/// assert_eq!(url_literal("/items/{item_id}", &[id]), "`/items/${itemId}`");
/// assert_eq!(url_literal("/items", &[]), "'/items'");
/// ```
pub fn url_literal(template: &str, placeholders: &[PathPlaceholder]) -> String {
    if placeholders.is_empty() {
        return format!("'{}'", template);
    }

    let mut url = template.to_string();
    for placeholder in placeholders {
        url = url.replace(
            &format!("{{{}}}", placeholder.raw),
            &format!("${{{}}}", placeholder.ident),
        );
    }
    format!("`{}`", url)
}

/// `const { ... } = path;` binding every placeholder identifier
pub fn path_destructure(placeholders: &[PathPlaceholder]) -> Option<String> {
    if placeholders.is_empty() {
        return None;
    }

    let bindings: Vec<String> = placeholders
        .iter()
        .map(|p| {
            if p.raw == p.ident {
                p.ident.clone()
            } else {
                format!("{}: {}", property_key(&p.raw), p.ident)
            }
        })
        .collect();

    Some(format!("const {{ {} }} = path;", bindings.join(", ")))
}
