use crate::domain::{ApiMethod, Lang, ParamValue, Params};

/// Flatten parameters into scalar form fields.
///
/// Lists become indexed keys (`field_names[0]`), nested lists nest the index
/// (`data[0][1]`), maps use their keys (`options[name]`), booleans are sent as `1`/`0`.
pub fn flatten_params(params: &Params) -> Vec<(String, String)> {
    let mut form = Vec::<(String, String)>::new();
    for (key, value) in params.iter() {
        push_value(&mut form, key.to_owned(), value);
    }
    form
}

fn push_value(form: &mut Vec<(String, String)>, key: String, value: &ParamValue) {
    match value {
        ParamValue::Text(text) => form.push((key, text.clone())),
        ParamValue::Int(number) => form.push((key, number.to_string())),
        ParamValue::Bool(flag) => form.push((key, if *flag { "1" } else { "0" }.to_owned())),
        ParamValue::List(items) => {
            for (idx, item) in items.iter().enumerate() {
                push_value(form, format!("{key}[{idx}]"), item);
            }
        }
        ParamValue::Map(map) => {
            for (sub, item) in map.iter() {
                push_value(form, format!("{key}[{sub}]"), item);
            }
        }
    }
}

/// `import_contacts` -> `importContacts`.
pub fn camel_case(snake: &str) -> String {
    let mut parts = snake.split('_');
    let mut out = parts.next().unwrap_or_default().to_owned();
    for part in parts {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// `{base_url}/{lang}/api/{methodName}`.
pub fn method_url(base_url: &str, lang: Lang, method: ApiMethod) -> String {
    format!(
        "{}/{}/api/{}",
        base_url.trim_end_matches('/'),
        lang.as_str(),
        camel_case(method.as_str())
    )
}
