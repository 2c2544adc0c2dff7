//! Built-in validators.
//!
//! [`ValidatorKind`] is the factory registered with
//! [`DynamicFields::add_validator`](dynaform_fields::DynamicFields::add_validator);
//! it binds its arguments positionally or by keyword and produces a [`Rule`].
//! Messages may interpolate the validator's own parameters with `%(name)s` or
//! `%(name)d`.

use dynaform_fields::{Arguments, ValidatorFactory};
use regex::Regex;
use serde_json::Value;

use crate::field::BoundField;
use crate::form::FormInstance;

/// Outcome of a single rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Check {
    Pass,
    /// Record the error and continue with the next rule.
    Fail(String),
    /// Clear the field's errors, record the message if any, stop the chain.
    Stop(Option<String>),
}

/// A numeric bound that remembers how it was written.
#[derive(Debug, Clone, PartialEq)]
pub struct Bound {
    pub value: f64,
    pub display: String,
}

/// A constructed validator.
#[derive(Debug, Clone)]
pub enum Rule {
    InputRequired {
        message: Option<String>,
    },
    DataRequired {
        message: Option<String>,
    },
    Optional,
    EqualTo {
        fieldname: String,
        message: Option<String>,
    },
    Length {
        min: i64,
        max: i64,
        message: Option<String>,
    },
    NumberRange {
        min: Option<Bound>,
        max: Option<Bound>,
        message: Option<String>,
    },
    AnyOf {
        values: Vec<Value>,
        message: Option<String>,
    },
    NoneOf {
        values: Vec<Value>,
        message: Option<String>,
    },
    Regexp {
        regex: Regex,
        message: Option<String>,
    },
}

const REQUIRED: &str = "This field is required.";

impl Rule {
    pub fn input_required() -> Self {
        Rule::InputRequired { message: None }
    }

    pub fn data_required() -> Self {
        Rule::DataRequired { message: None }
    }

    pub fn check(&self, form: &FormInstance, field: &BoundField) -> Check {
        match self {
            Rule::InputRequired { message } => {
                if field.raw().is_some_and(|raw| !raw.is_empty()) {
                    Check::Pass
                } else {
                    Check::Stop(Some(message.as_deref().unwrap_or(REQUIRED).to_string()))
                }
            }
            Rule::DataRequired { message } => {
                if truthy(field.data()) {
                    Check::Pass
                } else {
                    Check::Stop(Some(message.as_deref().unwrap_or(REQUIRED).to_string()))
                }
            }
            Rule::Optional => {
                if field.raw().is_some_and(|raw| !raw.trim().is_empty()) {
                    Check::Pass
                } else {
                    Check::Stop(None)
                }
            }
            Rule::EqualTo { fieldname, message } => {
                let Some(other) = form.field(fieldname) else {
                    return Check::Fail(format!("Invalid field name '{fieldname}'."));
                };
                if field.data() == other.data() {
                    return Check::Pass;
                }
                Check::Fail(interpolate(
                    message
                        .as_deref()
                        .unwrap_or("Field must be equal to %(other_name)s."),
                    &[
                        ("other_label", other.label()),
                        ("other_name", fieldname.as_str()),
                    ],
                ))
            }
            Rule::Length { min, max, message } => {
                let length = match field.data() {
                    Value::Null => 0,
                    Value::String(s) => s.chars().count() as i64,
                    other => other.to_string().chars().count() as i64,
                };
                if length >= *min && (*max == -1 || length <= *max) {
                    return Check::Pass;
                }
                let default = if *max == -1 {
                    plural(
                        *min,
                        "Field must be at least %(min)d character long.",
                        "Field must be at least %(min)d characters long.",
                    )
                } else if *min == -1 {
                    plural(
                        *max,
                        "Field cannot be longer than %(max)d character.",
                        "Field cannot be longer than %(max)d characters.",
                    )
                } else if min == max {
                    plural(
                        *max,
                        "Field must be exactly %(max)d character long.",
                        "Field must be exactly %(max)d characters long.",
                    )
                } else {
                    "Field must be between %(min)d and %(max)d characters long."
                };
                let (min, max, length) = (min.to_string(), max.to_string(), length.to_string());
                Check::Fail(interpolate(
                    message.as_deref().unwrap_or(default),
                    &[("min", &min), ("max", &max), ("length", &length)],
                ))
            }
            Rule::NumberRange { min, max, message } => {
                let in_range = field.data().as_f64().is_some_and(|n| {
                    min.as_ref().map_or(true, |b| n >= b.value)
                        && max.as_ref().map_or(true, |b| n <= b.value)
                });
                if in_range {
                    return Check::Pass;
                }
                let default = match (min, max) {
                    (Some(_), Some(_)) => "Number must be between %(min)s and %(max)s.",
                    (Some(_), None) => "Number must be at least %(min)s.",
                    _ => "Number must be at most %(max)s.",
                };
                let show = |b: &Option<Bound>| {
                    b.as_ref()
                        .map_or_else(|| "None".to_string(), |b| b.display.clone())
                };
                let (min, max) = (show(min), show(max));
                Check::Fail(interpolate(
                    message.as_deref().unwrap_or(default),
                    &[("min", &min), ("max", &max)],
                ))
            }
            Rule::AnyOf { values, message } => {
                if values.contains(field.data()) {
                    return Check::Pass;
                }
                Check::Fail(interpolate(
                    message
                        .as_deref()
                        .unwrap_or("Invalid value, must be one of: %(values)s."),
                    &[("values", join(values).as_str())],
                ))
            }
            Rule::NoneOf { values, message } => {
                if !values.contains(field.data()) {
                    return Check::Pass;
                }
                Check::Fail(interpolate(
                    message
                        .as_deref()
                        .unwrap_or("Invalid value, can't be any of: %(values)s."),
                    &[("values", join(values).as_str())],
                ))
            }
            Rule::Regexp { regex, message } => {
                let text = match field.data() {
                    Value::Null => String::new(),
                    other => display(other),
                };
                if regex.is_match(&text) {
                    return Check::Pass;
                }
                Check::Fail(message.as_deref().unwrap_or("Invalid input.").to_string())
            }
        }
    }
}

/// Validator factories available to forms and configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatorKind {
    InputRequired,
    DataRequired,
    Optional,
    EqualTo,
    Length,
    NumberRange,
    AnyOf,
    NoneOf,
    Regexp,
}

impl ValidatorKind {
    pub const ALL: [ValidatorKind; 9] = [
        ValidatorKind::InputRequired,
        ValidatorKind::DataRequired,
        ValidatorKind::Optional,
        ValidatorKind::EqualTo,
        ValidatorKind::Length,
        ValidatorKind::NumberRange,
        ValidatorKind::AnyOf,
        ValidatorKind::NoneOf,
        ValidatorKind::Regexp,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValidatorKind::InputRequired => "input_required",
            ValidatorKind::DataRequired => "data_required",
            ValidatorKind::Optional => "optional",
            ValidatorKind::EqualTo => "equal_to",
            ValidatorKind::Length => "length",
            ValidatorKind::NumberRange => "number_range",
            ValidatorKind::AnyOf => "any_of",
            ValidatorKind::NoneOf => "none_of",
            ValidatorKind::Regexp => "regexp",
        }
    }
}

impl ValidatorFactory for ValidatorKind {
    type Validator = Rule;

    fn name(&self) -> &str {
        self.as_str()
    }

    fn construct(&self, args: Arguments) -> Result<Rule, String> {
        match self {
            ValidatorKind::InputRequired => Ok(Rule::InputRequired {
                message: opt_string(&args, 0, "message")?,
            }),
            ValidatorKind::DataRequired => Ok(Rule::DataRequired {
                message: opt_string(&args, 0, "message")?,
            }),
            ValidatorKind::Optional => Ok(Rule::Optional),
            ValidatorKind::EqualTo => Ok(Rule::EqualTo {
                fieldname: opt_string(&args, 0, "fieldname")?
                    .ok_or("missing argument 'fieldname'")?,
                message: opt_string(&args, 1, "message")?,
            }),
            ValidatorKind::Length => {
                let min = opt_int(&args, 0, "min")?.unwrap_or(-1);
                let max = opt_int(&args, 1, "max")?.unwrap_or(-1);
                if min == -1 && max == -1 {
                    return Err("at least one of 'min' or 'max' must be given".into());
                }
                if max != -1 && min > max {
                    return Err("'min' cannot be more than 'max'".into());
                }
                Ok(Rule::Length {
                    min,
                    max,
                    message: opt_string(&args, 2, "message")?,
                })
            }
            ValidatorKind::NumberRange => Ok(Rule::NumberRange {
                min: opt_bound(&args, 0, "min")?,
                max: opt_bound(&args, 1, "max")?,
                message: opt_string(&args, 2, "message")?,
            }),
            ValidatorKind::AnyOf => Ok(Rule::AnyOf {
                values: values(&args)?,
                message: opt_string(&args, 1, "message")?,
            }),
            ValidatorKind::NoneOf => Ok(Rule::NoneOf {
                values: values(&args)?,
                message: opt_string(&args, 1, "message")?,
            }),
            ValidatorKind::Regexp => {
                let pattern = opt_string(&args, 0, "regex")?
                    .ok_or("missing argument 'regex'")?;
                let regex = Regex::new(&format!("^(?:{pattern})"))
                    .map_err(|e| format!("invalid regex '{pattern}': {e}"))?;
                Ok(Rule::Regexp {
                    regex,
                    message: opt_string(&args, 2, "message")?,
                })
            }
        }
    }
}

// --- Argument helpers ---

fn opt_string(args: &Arguments, index: usize, name: &str) -> Result<Option<String>, String> {
    match args.param(index, name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(format!("argument '{name}' must be a string, got {other}")),
    }
}

fn opt_int(args: &Arguments, index: usize, name: &str) -> Result<Option<i64>, String> {
    match args.param(index, name) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_i64()
            .map(Some)
            .ok_or_else(|| format!("argument '{name}' must be an integer, got {value}")),
    }
}

fn opt_bound(args: &Arguments, index: usize, name: &str) -> Result<Option<Bound>, String> {
    match args.param(index, name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64().map(|value| Bound {
            value,
            display: n.to_string(),
        })),
        Some(other) => Err(format!("argument '{name}' must be a number, got {other}")),
    }
}

fn values(args: &Arguments) -> Result<Vec<Value>, String> {
    match args.param(0, "values") {
        Some(Value::Array(values)) => Ok(values.clone()),
        Some(other) => Err(format!("argument 'values' must be a list, got {other}")),
        None => Err("missing argument 'values'".into()),
    }
}

// --- Message helpers ---

/// Replace `%(name)s` and `%(name)d` with the matching parameter.
pub fn interpolate<S: AsRef<str>>(message: &str, params: &[(&str, S)]) -> String {
    params.iter().fold(message.to_string(), |text, (name, value)| {
        text.replace(&format!("%({name})s"), value.as_ref())
            .replace(&format!("%({name})d"), value.as_ref())
    })
}

fn plural(n: i64, one: &'static str, many: &'static str) -> &'static str {
    if n == 1 {
        one
    } else {
        many
    }
}

fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn join(values: &[Value]) -> String {
    values.iter().map(display).collect::<Vec<_>>().join(", ")
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
