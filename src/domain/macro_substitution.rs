//! Destination URL macro substitution.
//!
//! Campaign destination URLs are templates carrying `{user_id}`, `{gaid}` and
//! `{click_id}` placeholders. Substitution is a single left-to-right pass over
//! the template, so substituted values are never re-scanned for placeholders.

use uuid::Uuid;

use crate::domain::entities::Visit;

/// Supported placeholders as `(name, token)` pairs, in reporting order.
const MACROS: &[(&str, &str)] = &[
    ("user_id", "{user_id}"),
    ("gaid", "{gaid}"),
    ("click_id", "{click_id}"),
];

/// Per-visit values available to placeholders.
#[derive(Debug, Clone)]
pub struct MacroValues<'a> {
    pub user_id: &'a str,
    pub gaid: &'a str,
    click_id: String,
}

impl<'a> MacroValues<'a> {
    /// Collects macro values from a visit and its freshly generated click id.
    pub fn new(visit: &'a Visit, click_id: Uuid) -> Self {
        Self {
            user_id: &visit.user_id,
            gaid: visit.gaid.as_deref().unwrap_or(""),
            click_id: click_id.to_string(),
        }
    }

    fn get(&self, name: &str) -> &str {
        match name {
            "user_id" => self.user_id,
            "gaid" => self.gaid,
            "click_id" => &self.click_id,
            _ => "",
        }
    }
}

/// Result of substituting a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub url: String,
    /// Placeholders present in the template whose value was empty.
    /// Each name appears at most once. Never contains `click_id`.
    pub missing: Vec<&'static str>,
}

/// Replaces every known placeholder in `template` with its value.
///
/// Placeholders absent from the template are ignored. Placeholders whose
/// value is empty are left intact in the output and reported in
/// [`Substitution::missing`].
pub fn substitute(template: &str, values: &MacroValues<'_>) -> Substitution {
    let missing = MACROS
        .iter()
        .filter(|(name, token)| template.contains(token) && values.get(name).is_empty())
        .map(|(name, _)| *name)
        .collect();

    let mut url = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        url.push_str(&rest[..start]);
        let tail = &rest[start..];

        match MACROS.iter().find(|(_, token)| tail.starts_with(token)) {
            Some((name, token)) => {
                let value = values.get(name);
                url.push_str(if value.is_empty() { *token } else { value });
                rest = &tail[token.len()..];
            }
            None => {
                url.push('{');
                rest = &tail[1..];
            }
        }
    }
    url.push_str(rest);

    Substitution { url, missing }
}
