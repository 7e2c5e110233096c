use crate::error::{BarError, Result};
use std::str::FromStr;

/// A format string like `"{artist} - {title}"`, parsed once against a fixed
/// field set `F`.
///
/// `{{` and `}}` produce literal braces.  Unknown field names and unbalanced
/// braces are rejected at parse time.
#[derive(Debug, Clone, PartialEq)]
pub struct Template<F> {
    parts: Vec<Part<F>>,
}

#[derive(Debug, Clone, PartialEq)]
enum Part<F> {
    Literal(String),
    Field(F),
}

impl<F> Template<F>
where
    F: FromStr + Copy,
{
    pub fn parse(format: &str) -> Result<Self> {
        let mut parts = Vec::new();
        let mut literal = String::new();
        let mut chars = format.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some('{') | None => {
                                return Err(BarError::Config(format!(
                                    "unclosed '{{' in format string '{format}'"
                                )))
                            }
                            Some(ch) => name.push(ch),
                        }
                    }
                    let field = name.trim().parse::<F>().map_err(|_| {
                        BarError::Config(format!("unknown field '{{{name}}}' in format string"))
                    })?;
                    if !literal.is_empty() {
                        parts.push(Part::Literal(std::mem::take(&mut literal)));
                    }
                    parts.push(Part::Field(field));
                }
                '}' => {
                    return Err(BarError::Config(format!(
                        "unmatched '}}' in format string '{format}'"
                    )))
                }
                _ => literal.push(c),
            }
        }

        if !literal.is_empty() {
            parts.push(Part::Literal(literal));
        }
        Ok(Self { parts })
    }

    /// Substitute every field through `resolve`; `None` renders as empty.
    pub fn render(&self, mut resolve: impl FnMut(F) -> Option<String>) -> String {
        let mut out = String::new();
        for part in &self.parts {
            match part {
                Part::Literal(s) => out.push_str(s),
                Part::Field(f) => {
                    if let Some(v) = resolve(*f) {
                        out.push_str(&v);
                    }
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Field {
        Artist,
        Title,
    }

    impl FromStr for Field {
        type Err = ();

        fn from_str(s: &str) -> std::result::Result<Self, ()> {
            match s {
                "artist" => Ok(Self::Artist),
                "title" => Ok(Self::Title),
                _ => Err(()),
            }
        }
    }

    #[test]
    fn renders_fields_and_literals() {
        let t = Template::<Field>::parse("{artist} - {title}").unwrap();
        let out = t.render(|f| match f {
            Field::Artist => Some("Air".into()),
            Field::Title => Some("La femme d'argent".into()),
        });
        assert_eq!(out, "Air - La femme d'argent");
    }

    #[test]
    fn missing_fields_render_empty() {
        let t = Template::<Field>::parse("[{artist}]").unwrap();
        assert_eq!(t.render(|_| None), "[]");
    }

    #[test]
    fn escaped_braces_are_literal() {
        let t = Template::<Field>::parse("{{{title}}}").unwrap();
        assert_eq!(t.render(|_| Some("x".into())), "{x}");
    }

    #[test]
    fn unknown_field_is_config_error() {
        let err = Template::<Field>::parse("{genre}").unwrap_err();
        assert!(matches!(err, BarError::Config(_)));
    }

    #[test]
    fn unbalanced_braces_are_config_errors() {
        assert!(Template::<Field>::parse("{title").is_err());
        assert!(Template::<Field>::parse("title}").is_err());
    }
}
