use rust_decimal::Decimal;
use serde_json::Value as JsonValue;
use std::{
    fmt::{self, Display},
    str::FromStr,
};
use time::{Date, OffsetDateTime, format_description::well_known::Rfc3339, macros::format_description};

/// Largest decimal precision a field may declare.
///
/// Generated records hold decimals as `rust_decimal::Decimal`, which carries
/// at most 28 significant digits.
pub const MAX_DECIMAL_PRECISION: u32 = 28;

///
/// LogicalType
///
/// Closed set of field types a schema document may declare. Parameters that
/// affect storage (string length, decimal precision/scale) are carried per
/// field.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[remain::sorted]
pub enum LogicalType {
    Boolean,
    Date,
    Decimal { precision: u32, scale: u32 },
    Integer,
    String { max_length: Option<u32> },
    Timestamp,
}

impl LogicalType {
    /// Whether a `"now"` default is meaningful for this type.
    #[must_use]
    pub const fn supports_now(self) -> bool {
        matches!(self, Self::Timestamp)
    }
}

impl Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean => f.write_str("boolean"),
            Self::Date => f.write_str("date"),
            Self::Decimal { precision, scale } => write!(f, "decimal({precision},{scale})"),
            Self::Integer => f.write_str("integer"),
            Self::String { max_length: None } => f.write_str("string"),
            Self::String {
                max_length: Some(len),
            } => write!(f, "string({len})"),
            Self::Timestamp => f.write_str("timestamp"),
        }
    }
}

///
/// TypeParseError
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TypeParseError {
    /// The type name is not part of the enumeration.
    Unknown,
    /// The type name is known but its parameters are not acceptable.
    Invalid(String),
}

impl FromStr for LogicalType {
    type Err = TypeParseError;

    // Grammar: `name` or `name(arg, ...)` with unsigned integer arguments.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (name, args) = match s.split_once('(') {
            Some((name, rest)) => {
                let inner = rest
                    .strip_suffix(')')
                    .ok_or_else(|| TypeParseError::Invalid("missing closing ')'".to_string()))?;
                (name.trim(), Some(parse_args(inner)?))
            }
            None => (s, None),
        };

        match (name, args.as_deref()) {
            ("boolean", None) => Ok(Self::Boolean),
            ("date", None) => Ok(Self::Date),
            ("integer", None) => Ok(Self::Integer),
            ("timestamp", None) => Ok(Self::Timestamp),
            ("string", None) => Ok(Self::String { max_length: None }),
            ("string", Some([len])) => {
                if *len == 0 {
                    return Err(TypeParseError::Invalid(
                        "string length must be at least 1".to_string(),
                    ));
                }
                Ok(Self::String {
                    max_length: Some(*len),
                })
            }
            ("decimal", Some([precision, scale])) => {
                let (precision, scale) = (*precision, *scale);
                if precision == 0 || precision > MAX_DECIMAL_PRECISION {
                    return Err(TypeParseError::Invalid(format!(
                        "decimal precision must be between 1 and {MAX_DECIMAL_PRECISION}"
                    )));
                }
                if scale > precision {
                    return Err(TypeParseError::Invalid(format!(
                        "decimal scale {scale} exceeds precision {precision}"
                    )));
                }
                Ok(Self::Decimal { precision, scale })
            }
            ("decimal", None) => Err(TypeParseError::Invalid(
                "decimal requires precision and scale, e.g. decimal(15,4)".to_string(),
            )),
            ("boolean" | "date" | "integer" | "timestamp", Some(_)) => Err(
                TypeParseError::Invalid(format!("type '{name}' takes no parameters")),
            ),
            ("string" | "decimal", Some(args)) => Err(TypeParseError::Invalid(format!(
                "unexpected number of parameters ({})",
                args.len()
            ))),
            _ => Err(TypeParseError::Unknown),
        }
    }
}

fn parse_args(inner: &str) -> Result<Vec<u32>, TypeParseError> {
    inner
        .split(',')
        .map(|arg| {
            let arg = arg.trim();
            arg.parse::<u32>()
                .map_err(|_| TypeParseError::Invalid(format!("parameter '{arg}' is not an unsigned integer")))
        })
        .collect()
}

///
/// DefaultValue
///
/// A validated column default. Built only by `DefaultValue::from_json`, which
/// guarantees the value fits the field's logical type.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DefaultValue {
    Now,
    Bool(bool),
    Int(i64),
    Decimal(Decimal),
    Text(String),
    Date(Date),
    /// Canonical RFC 3339 text of the instant.
    Timestamp(String),
}

impl DefaultValue {
    /// Interpret a JSON default against the declared field type.
    pub fn from_json(ty: LogicalType, value: &JsonValue) -> Result<Self, String> {
        if value.as_str() == Some("now") {
            return if ty.supports_now() {
                Ok(Self::Now)
            } else {
                Err(format!("'now' is only supported for timestamp fields, not {ty}"))
            };
        }

        match ty {
            LogicalType::Boolean => value
                .as_bool()
                .map(Self::Bool)
                .ok_or_else(|| format!("expected a boolean, found {value}")),

            LogicalType::Integer => value
                .as_i64()
                .map(Self::Int)
                .ok_or_else(|| format!("expected a 64-bit integer, found {value}")),

            LogicalType::Decimal { precision, scale } => {
                let text = match value {
                    JsonValue::Number(n) => n.to_string(),
                    JsonValue::String(s) => s.clone(),
                    _ => return Err(format!("expected a decimal number, found {value}")),
                };
                parse_decimal(&text, precision, scale).map(Self::Decimal)
            }

            LogicalType::String { max_length } => {
                let text = value
                    .as_str()
                    .ok_or_else(|| format!("expected a string, found {value}"))?;
                if let Some(max) = max_length {
                    let len = text.chars().count();
                    if len > max as usize {
                        return Err(format!("length {len} exceeds max length {max}"));
                    }
                }
                Ok(Self::Text(text.to_string()))
            }

            LogicalType::Date => {
                let text = value
                    .as_str()
                    .ok_or_else(|| format!("expected a YYYY-MM-DD string, found {value}"))?;
                Date::parse(text, format_description!("[year]-[month]-[day]"))
                    .map(Self::Date)
                    .map_err(|e| format!("'{text}' is not a YYYY-MM-DD date: {e}"))
            }

            LogicalType::Timestamp => {
                let text = value
                    .as_str()
                    .ok_or_else(|| format!("expected \"now\" or an RFC 3339 string, found {value}"))?;
                let instant = OffsetDateTime::parse(text, &Rfc3339)
                    .map_err(|e| format!("'{text}' is not an RFC 3339 timestamp: {e}"))?;
                instant
                    .format(&Rfc3339)
                    .map(Self::Timestamp)
                    .map_err(|e| format!("'{text}' cannot be represented: {e}"))
            }
        }
    }

    /// Canonical text form, as stored in generated model metadata.
    #[must_use]
    pub fn canonical_text(&self) -> String {
        match self {
            Self::Now => "now".to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Int(n) => n.to_string(),
            Self::Decimal(d) => d.to_string(),
            Self::Text(s) | Self::Timestamp(s) => s.clone(),
            Self::Date(d) => format!("{:04}-{:02}-{:02}", d.year(), u8::from(d.month()), d.day()),
        }
    }

    /// SQL expression for a `DEFAULT` clause.
    #[must_use]
    pub fn sql_literal(&self) -> String {
        match self {
            Self::Now => "CURRENT_TIMESTAMP".to_string(),
            Self::Bool(true) => "TRUE".to_string(),
            Self::Bool(false) => "FALSE".to_string(),
            Self::Int(_) | Self::Decimal(_) => self.canonical_text(),
            Self::Text(_) | Self::Date(_) | Self::Timestamp(_) => {
                format!("'{}'", self.canonical_text().replace('\'', "''"))
            }
        }
    }
}

// Parse a decimal literal and check it fits NUMERIC(precision, scale).
fn parse_decimal(text: &str, precision: u32, scale: u32) -> Result<Decimal, String> {
    let value = Decimal::from_str_exact(text.trim())
        .map_err(|e| format!("'{text}' is not a decimal number: {e}"))?;

    if value.scale() > scale {
        return Err(format!(
            "'{text}' has {} fractional digits, field allows {scale}",
            value.scale()
        ));
    }

    let int_digits = value.trunc().abs().to_string().trim_start_matches('0').len();
    let max_int_digits = (precision - scale) as usize;
    if int_digits > max_int_digits {
        return Err(format!(
            "'{text}' has {int_digits} integer digits, field allows {max_int_digits}"
        ));
    }

    Ok(value)
}

///
/// TESTS
///
