use std::fmt;
use std::str::FromStr;

use crate::data_type::{CollectionKind, DataType, DataTypeRef};
use crate::error::TypeError;
use crate::value_type::ValueType;

/// CQL type text.
///
/// ```text
///   type   := scalar
///           | "frozen" "<" type ">"
///           | ("list" | "set") "<" type ">"
///           | "map" "<" type "," type ">"
///           | "tuple" "<" type ("," type)* ">"
///           | [keyspace "."] name "<" field ("," field)* ">"   (user type)
///   field  := ident ":" type
/// ```
///
/// Whitespace between tokens is ignored and keywords are
/// case-insensitive. `frozen<...>` only affects server-side mutation
/// semantics, so it is unwrapped.
impl FromStr for DataType {
  type Err = TypeError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let mut parser = Parser { src: s, pos: 0 };
    let ty = parser.parse_type(0)?;
    parser.skip_ws();
    if parser.pos != s.len() {
      return Err(parser.error("trailing characters after type"));
    }
    Ok(DataTypeRef::unwrap_or_clone(ty))
  }
}

struct Parser<'s> {
  src: &'s str,
  pos: usize,
}

impl Parser<'_> {
  fn error(&self, reason: &str) -> TypeError {
    TypeError::InvalidTypeSyntax {
      position: self.pos,
      reason: reason.to_string(),
    }
  }

  fn skip_ws(&mut self) {
    let rest = &self.src[self.pos..];
    self.pos += rest.len() - rest.trim_start().len();
  }

  fn peek(&mut self) -> Option<char> {
    self.skip_ws();
    self.src[self.pos..].chars().next()
  }

  fn eat(&mut self, expected: char) -> Result<(), TypeError> {
    if self.peek() == Some(expected) {
      self.pos += expected.len_utf8();
      Ok(())
    } else {
      Err(self.error(&format!("expected '{expected}'")))
    }
  }

  /// An identifier, optionally keyspace-qualified (`ks.name`).
  fn ident(&mut self) -> Result<&str, TypeError> {
    self.skip_ws();
    let start = self.pos;
    let len = self.src[start..]
      .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '.'))
      .unwrap_or(self.src.len() - start);
    if len == 0 {
      return Err(self.error("expected a type name"));
    }
    self.pos += len;
    Ok(&self.src[start..start + len])
  }

  fn parse_type(&mut self, depth: usize) -> Result<DataTypeRef, TypeError> {
    if depth > crate::option::MAX_NESTING_DEPTH {
      return Err(TypeError::NestingTooDeep {
        limit: crate::option::MAX_NESTING_DEPTH,
      });
    }

    let name = self.ident()?.to_ascii_lowercase();
    if self.peek() != Some('<') {
      let Some(scalar) = ValueType::from_name(&name) else {
        return Err(self.error(&format!("unknown type '{name}'")));
      };
      return DataType::primitive(scalar);
    }
    self.eat('<')?;

    let ty = match name.as_str() {
      "frozen" => self.type_args(depth, "frozen", 1)?.remove(0),
      "list" => DataType::list(self.type_args(depth, "list", 1)?.remove(0)),
      "set" => DataType::set(self.type_args(depth, "set", 1)?.remove(0)),
      "map" => {
        let mut args = self.type_args(depth, "map", CollectionKind::Map.arity())?;
        let value = args.remove(1);
        DataType::map(args.remove(0), value)
      }
      "tuple" => {
        let args = self.type_list(depth)?;
        if args.is_empty() {
          return Err(self.error("tuple needs at least one component"));
        }
        DataType::tuple(args)
      }
      _ => self.user_type(&name, depth)?,
    };
    self.eat('>')?;
    Ok(ty)
  }

  fn type_list(&mut self, depth: usize) -> Result<Vec<DataTypeRef>, TypeError> {
    let mut args = vec![self.parse_type(depth + 1)?];
    while self.peek() == Some(',') {
      self.eat(',')?;
      args.push(self.parse_type(depth + 1)?);
    }
    Ok(args)
  }

  fn type_args(
    &mut self,
    depth: usize,
    name: &'static str,
    expected: usize,
  ) -> Result<Vec<DataTypeRef>, TypeError> {
    let args = self.type_list(depth)?;
    if args.len() == expected {
      Ok(args)
    } else {
      Err(TypeError::WrongArity {
        name,
        expected,
        found: args.len(),
      })
    }
  }

  fn user_type(&mut self, qualified: &str, depth: usize) -> Result<DataTypeRef, TypeError> {
    let (keyspace, type_name) = qualified.rsplit_once('.').unwrap_or(("", qualified));
    let mut fields = Vec::new();
    loop {
      let field = self.ident()?.to_string();
      self.eat(':')?;
      fields.push((field, self.parse_type(depth + 1)?));
      if self.peek() != Some(',') {
        break;
      }
      self.eat(',')?;
    }
    Ok(DataType::user_type(keyspace, type_name, fields))
  }
}

impl fmt::Display for DataType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Primitive(ty) => write!(f, "{ty}"),
      Self::Collection {
        kind,
        primary,
        secondary,
      } => {
        write!(f, "{}<{primary}", kind.value_type())?;
        if let Some(secondary) = secondary {
          write!(f, ", {secondary}")?;
        }
        f.write_str(">")
      }
      Self::Tuple { types } => {
        f.write_str("tuple<")?;
        for (i, ty) in types.iter().enumerate() {
          if i > 0 {
            f.write_str(", ")?;
          }
          write!(f, "{ty}")?;
        }
        f.write_str(">")
      }
      Self::UserType {
        keyspace,
        type_name,
        fields,
      } => {
        if !keyspace.is_empty() {
          write!(f, "{keyspace}.")?;
        }
        write!(f, "{type_name}<")?;
        for (i, field) in fields.iter().enumerate() {
          if i > 0 {
            f.write_str(", ")?;
          }
          write!(f, "{}: {}", field.name, field.data_type)?;
        }
        f.write_str(">")
      }
    }
  }
}
