// Company names derived from owner email domains.

const FRIENDLY_NAMES: [(&str, &str); 9] = [
    ("gmail", "Gmail"),
    ("outlook", "Microsoft"),
    ("hotmail", "Microsoft"),
    ("microsoft", "Microsoft"),
    ("yahoo", "Yahoo"),
    ("vtex", "VTEX"),
    ("aws", "Amazon"),
    ("salesforce", "Salesforce"),
    ("oracle", "Oracle"),
];

/// Derives a company name from an email address.
///
/// Well-known domains map to a friendly name; anything else becomes the
/// title-cased first domain label. Addresses without `@` map to `None`.
pub fn company_from_email(email: &str) -> Option<String> {
    let (_, domain) = email.trim().rsplit_once('@')?;
    let label = domain.split('.').next()?.trim().to_lowercase();
    if label.is_empty() {
        return None;
    }
    let friendly = FRIENDLY_NAMES
        .iter()
        .find(|(key, _)| *key == label)
        .map(|(_, name)| (*name).to_string());
    Some(friendly.unwrap_or_else(|| title_case(&label)))
}

fn title_case(label: &str) -> String {
    label
        .split(['-', '_'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
