//! Name templates for convention chains.

use std::fmt;

use crate::util::{Error, Result};

/// Placeholder accepted in a template.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Field {
    Scene,
    Loc,
    Shot,
    Role,
    Env,
}

impl Field {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "scene" => Some(Self::Scene),
            "loc" => Some(Self::Loc),
            "shot" => Some(Self::Shot),
            "role" => Some(Self::Role),
            "env" => Some(Self::Env),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Scene => "scene",
            Self::Loc => "loc",
            Self::Shot => "shot",
            Self::Role => "role",
            Self::Env => "env",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Piece {
    Literal(String),
    Field(Field),
}

/// One name in a convention chain, e.g. `MODEL-{scene}-{shot}`.
///
/// Recognized placeholders: `{scene}`, `{loc}`, `{shot}`, `{role}`, `{env}`,
/// plus `{base}` as shorthand for `{scene}-{loc}`. Unknown placeholders are
/// rejected at parse time, not at expansion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameTemplate {
    pieces: Vec<Piece>,
}

/// Values available when expanding a template. Chains only ever use the
/// fields their level needs, so all fields are optional; expanding a
/// placeholder with no value is an error.
#[derive(Clone, Copy, Debug, Default)]
pub struct TemplateArgs<'a> {
    pub scene: Option<&'a str>,
    pub loc: Option<&'a str>,
    pub shot: Option<&'a str>,
    pub role: Option<&'a str>,
    pub env: Option<&'a str>,
}

impl NameTemplate {
    /// Parse template text.
    pub fn parse(text: &str) -> Result<Self> {
        let mut pieces = Vec::new();
        let mut rest = text;
        while let Some(open) = rest.find('{') {
            if open > 0 {
                push_literal(&mut pieces, &rest[..open]);
            }
            let after = &rest[open + 1..];
            let Some(close) = after.find('}') else {
                return Err(Error::template(format!("unclosed '{{' in '{text}'")));
            };
            let name = &after[..close];
            if name == "base" {
                pieces.push(Piece::Field(Field::Scene));
                push_literal(&mut pieces, "-");
                pieces.push(Piece::Field(Field::Loc));
            } else if let Some(field) = Field::parse(name) {
                pieces.push(Piece::Field(field));
            } else {
                return Err(Error::template(format!(
                    "unknown placeholder '{{{name}}}' in '{text}'"
                )));
            }
            rest = &after[close + 1..];
        }
        if !rest.is_empty() {
            push_literal(&mut pieces, rest);
        }
        if pieces.is_empty() {
            return Err(Error::template("empty template"));
        }
        Ok(Self { pieces })
    }

    /// Expand with the given values.
    pub fn expand(&self, args: &TemplateArgs) -> Result<String> {
        let mut out = String::new();
        for piece in &self.pieces {
            match piece {
                Piece::Literal(text) => out.push_str(text),
                Piece::Field(field) => {
                    let value = match field {
                        Field::Scene => args.scene,
                        Field::Loc => args.loc,
                        Field::Shot => args.shot,
                        Field::Role => args.role,
                        Field::Env => args.env,
                    };
                    let Some(value) = value else {
                        return Err(Error::MissingTemplateField(field.name()));
                    };
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

fn push_literal(pieces: &mut Vec<Piece>, text: &str) {
    if let Some(Piece::Literal(last)) = pieces.last_mut() {
        last.push_str(text);
    } else {
        pieces.push(Piece::Literal(text.to_string()));
    }
}

impl fmt::Display for NameTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for piece in &self.pieces {
            match piece {
                Piece::Literal(text) => f.write_str(text)?,
                Piece::Field(field) => write!(f, "{{{}}}", field.name())?,
            }
        }
        Ok(())
    }
}
