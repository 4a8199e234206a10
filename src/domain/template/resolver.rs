// Template resolution: endpoint + search values -> request URL

use std::borrow::Cow;

use super::catalog::TemplateParameter;
use super::parameter::{Parameter, ParameterValue, REPEAT_LIMIT};
use super::parser::{TemplateParser, TemplatePart};
use super::values::SearchValues;
use crate::domain::description::UrlEndpoint;
use crate::error::{DescriptionError, DescriptionResult};

/// Renders endpoints into concrete request URLs.
///
/// Resolution is a pure function of the endpoint and the supplied values; the endpoint is
/// never modified.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateResolver;

impl TemplateResolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolve an endpoint with the provided values.
    ///
    /// Values substituted inside the template text are percent-decoded and inserted as they
    /// are, so `{searchTerms}` in a path may leave a raw space (`/search/new york`). Callers
    /// sending the result over the wire may need to re-encode it. Appended `name=value`
    /// entries are always encoded.
    pub fn resolve(&self, endpoint: &UrlEndpoint, values: &SearchValues) -> DescriptionResult<String> {
        let mut url = self.render_template(endpoint, values)?;
        let query = self.render_query(endpoint, values)?;

        if query.is_empty() {
            return Ok(url);
        }

        if !url.ends_with('?') && !url.ends_with('&') {
            url.push(if url.contains('?') { '&' } else { '?' });
        }
        url.push_str(&query);
        Ok(url)
    }

    /// Names of required slots that have no value in `values`
    pub fn missing_values(&self, endpoint: &UrlEndpoint, values: &SearchValues) -> Vec<String> {
        endpoint
            .parameters
            .iter()
            .filter(|param| param.minimum > 0)
            .filter_map(|param| match param.value {
                ParameterValue::Bound(kind) if !values.is_set(kind) => Some(param.name.clone()),
                _ => None,
            })
            .collect()
    }

    // Inline substitution inside the template text; values go in decoded
    fn render_template(&self, endpoint: &UrlEndpoint, values: &SearchValues) -> DescriptionResult<String> {
        let mut result = String::new();

        for part in TemplateParser::parse(&endpoint.template)? {
            match part {
                TemplatePart::Literal(s) => result.push_str(&s),
                TemplatePart::Placeholder(placeholder) => match placeholder.kind() {
                    Some(kind) => {
                        let optional = endpoint
                            .inline_parameter(kind)
                            .map(Parameter::is_optional)
                            .unwrap_or(placeholder.optional);
                        match values.first(kind) {
                            Some(value) => result.push_str(&unescape(value)),
                            None if optional => {}
                            None => {
                                return Err(DescriptionError::UnboundRequiredParameter(
                                    kind.name().to_string(),
                                ))
                            }
                        }
                    }
                    // Unknown optional placeholders are dropped, unknown required ones cannot be filled
                    None if placeholder.optional => {}
                    None => {
                        return Err(DescriptionError::UnknownTemplateToken(
                            placeholder.canonical_text(),
                        ))
                    }
                },
            }
        }

        Ok(result)
    }

    // Appended `name=value` entries, in declared parameter order
    fn render_query(&self, endpoint: &UrlEndpoint, values: &SearchValues) -> DescriptionResult<String> {
        let mut entries = Vec::new();

        for param in endpoint.parameters.iter().filter(|p| !p.inline) {
            match &param.value {
                ParameterValue::Literal(_) => {
                    let repeats = param.minimum.max(1).min(param.maximum).min(REPEAT_LIMIT);
                    if let Some(entry) = param.literal_entry() {
                        entries.extend(std::iter::repeat(entry).take(repeats as usize));
                    }
                }
                ParameterValue::Bound(kind) => {
                    for value in self.bound_repeats(param, *kind, values)? {
                        entries.push(param.encode_as_query_entry(value));
                    }
                }
            }
        }

        Ok(entries.join("&"))
    }

    /// One value per supplied entry, capped at `maximum`; the last one repeats to reach `minimum`.
    /// Both bounds are held to `REPEAT_LIMIT`.
    fn bound_repeats<'v>(
        &self,
        param: &Parameter,
        kind: TemplateParameter,
        values: &'v SearchValues,
    ) -> DescriptionResult<Vec<&'v str>> {
        let supplied = values.present(kind);
        let Some(last) = supplied.last().copied() else {
            if param.minimum > 0 {
                return Err(DescriptionError::UnboundRequiredParameter(param.name.clone()));
            }
            return Ok(Vec::new());
        };

        let maximum = param.maximum.min(REPEAT_LIMIT) as usize;
        let minimum = param.minimum.min(REPEAT_LIMIT) as usize;
        let mut repeats: Vec<&str> = supplied.into_iter().take(maximum).collect();
        while repeats.len() < minimum {
            repeats.push(last);
        }
        Ok(repeats)
    }
}

fn unescape(value: &str) -> Cow<'_, str> {
    urlencoding::decode(value).unwrap_or(Cow::Borrowed(value))
}
