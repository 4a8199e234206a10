// Template scanner: splits OpenSearch URL templates into text and placeholders

use crate::error::{DescriptionError, DescriptionResult};

use super::catalog::TemplateParameter;
use super::parameter::Parameter;

/// A template consists of literal text and placeholders
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplatePart {
    Literal(String),
    Placeholder(Placeholder),
}

/// A `{name}` or `{name?}` placeholder. The name may carry a namespace prefix (`geo:box`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub name: String,
    pub optional: bool,
}

impl Placeholder {
    pub fn kind(&self) -> Option<TemplateParameter> {
        TemplateParameter::from_name(&self.name).ok()
    }

    /// Text form with deprecated names replaced by their canonical one
    pub fn canonical_text(&self) -> String {
        let name = self.kind().map(|k| k.name()).unwrap_or(self.name.as_str());
        if self.optional {
            format!("{{{}?}}", name)
        } else {
            format!("{{{}}}", name)
        }
    }
}

/// Result of scanning a raw `template` attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedTemplate {
    /// Template text left after the pure query pairs were lifted out
    pub template: String,
    /// Inline slots first (in order of first appearance), then the lifted query pairs
    pub parameters: Vec<Parameter>,
}

/// Split at the first `?` that is not an optional marker inside a placeholder
fn split_query(raw: &str) -> (&str, Option<&str>) {
    let mut in_braces = false;
    for (i, ch) in raw.char_indices() {
        match ch {
            '{' => in_braces = true,
            '}' => in_braces = false,
            '?' if !in_braces => return (&raw[..i], Some(&raw[i + 1..])),
            _ => {}
        }
    }
    (raw, None)
}

pub struct TemplateParser {
    input: String,
    pos: usize,
}

impl TemplateParser {
    /// Split template text into literal runs and placeholders
    pub fn parse(template: &str) -> DescriptionResult<Vec<TemplatePart>> {
        let mut parser = Self {
            input: template.to_string(),
            pos: 0,
        };
        parser.parse_template()
    }

    /// Scan a raw template attribute into its template text and parameter list.
    ///
    /// Query pairs whose value is a single placeholder, or holds no placeholder at all, become
    /// appended parameters. Pairs mixing text and placeholders stay in the template text. Every
    /// recognized placeholder left in the text yields one inline parameter per kind.
    pub fn scan(raw: &str) -> DescriptionResult<ScannedTemplate> {
        let (base, query) = split_query(raw.trim());

        let mut kept_pairs = Vec::new();
        let mut appended = Vec::new();

        for segment in query.into_iter().flat_map(|q| q.split('&')) {
            if segment.is_empty() {
                continue;
            }
            let value = segment.split_once('=').map(|(_, v)| v).unwrap_or(segment);
            let placeholders = Self::parse(value)?
                .into_iter()
                .filter(|part| matches!(part, TemplatePart::Placeholder(_)))
                .count();

            if placeholders == 0 {
                appended.push(Parameter::from_query_pair(segment)?);
                continue;
            }

            let param = Parameter::from_query_pair(segment).ok();
            match param {
                Some(param) if param.kind().is_some() => appended.push(param),
                _ => kept_pairs.push(segment),
            }
        }

        let mut text = base.to_string();
        if !kept_pairs.is_empty() {
            text.push('?');
            text.push_str(&kept_pairs.join("&"));
        }

        let parts = Self::parse(&text)?;
        let mut parameters: Vec<Parameter> = Vec::new();
        for part in &parts {
            let TemplatePart::Placeholder(placeholder) = part else {
                continue;
            };
            let Some(kind) = placeholder.kind() else {
                continue;
            };
            match parameters.iter_mut().find(|p| p.kind() == Some(kind)) {
                // a kind required at any occurrence is required everywhere
                Some(existing) => {
                    if !placeholder.optional {
                        existing.minimum = 1;
                    }
                }
                None => parameters.push(Parameter::inline(kind, placeholder.optional)),
            }
        }
        parameters.extend(appended);

        Ok(ScannedTemplate {
            template: Self::render_text(&parts),
            parameters,
        })
    }

    /// Rebuild template text from parts, using canonical placeholder names
    pub fn render_text(parts: &[TemplatePart]) -> String {
        parts
            .iter()
            .map(|part| match part {
                TemplatePart::Literal(s) => s.clone(),
                TemplatePart::Placeholder(p) => p.canonical_text(),
            })
            .collect()
    }

    fn parse_template(&mut self) -> DescriptionResult<Vec<TemplatePart>> {
        let mut parts = Vec::new();
        let mut literal_buf = String::new();

        while let Some(ch) = self.peek_char() {
            if ch == '{' {
                // Start of placeholder - flush literal buffer first
                if !literal_buf.is_empty() {
                    parts.push(TemplatePart::Literal(std::mem::take(&mut literal_buf)));
                }
                let placeholder = self.parse_placeholder()?;
                parts.push(TemplatePart::Placeholder(placeholder));
            } else {
                literal_buf.push(self.consume_char()?);
            }
        }

        if !literal_buf.is_empty() {
            parts.push(TemplatePart::Literal(literal_buf));
        }

        Ok(parts)
    }

    fn parse_placeholder(&mut self) -> DescriptionResult<Placeholder> {
        let start = self.pos;
        self.expect_char('{')?;

        let mut name = String::new();
        while let Some(ch) = self.peek_char() {
            if ch.is_alphanumeric() || matches!(ch, '_' | ':' | '-' | '.') {
                name.push(self.consume_char()?);
            } else {
                break;
            }
        }

        let optional = if self.peek_char() == Some('?') {
            self.consume_char()?;
            true
        } else {
            false
        };

        if name.is_empty() || self.peek_char() != Some('}') {
            let end = self.input[start..]
                .find('}')
                .map(|i| start + i + 1)
                .unwrap_or(self.input.len());
            return Err(DescriptionError::invalid_attribute(
                "template",
                &self.input[start..end],
            ));
        }
        self.consume_char()?;

        Ok(Placeholder { name, optional })
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn consume_char(&mut self) -> DescriptionResult<char> {
        let ch = self.peek_char().ok_or_else(|| {
            DescriptionError::invalid_attribute("template", &self.input)
        })?;
        self.pos += ch.len_utf8();
        Ok(ch)
    }

    fn expect_char(&mut self, expected: char) -> DescriptionResult<()> {
        match self.peek_char() {
            Some(ch) if ch == expected => {
                self.consume_char()?;
                Ok(())
            }
            _ => Err(DescriptionError::invalid_attribute("template", &self.input)),
        }
    }
}
