/// Display label of a survey or assignment status.
#[must_use]
pub fn status_label(status: impl AsRef<str>) -> String {
    let status = status.as_ref();
    match status.to_lowercase().as_str() {
        "draft" => "Draft".to_owned(),
        "open" | "published" => "Open".to_owned(),
        "closed" => "Closed".to_owned(),
        "archived" => "Archived".to_owned(),
        _ => {
            let mut chars = status.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        }
    }
}
