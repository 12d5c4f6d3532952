//! Request schemas checked against the raw body before it is trusted.
//!
//! Checks run on the undecoded bytes, not on the decoded struct: decoding
//! fills absent fields with defaults and would hide a missing field.
//! Rules are evaluated in declaration order and the first violation wins.
//! Unknown fields are ignored; `null` counts as absent.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::record::{Action, EntityKind};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("malformed payload: {0}")]
    Malformed(String),
    #[error("payload must be a JSON object")]
    NotAnObject,
    #[error("field '{field}' is required")]
    MissingField { field: &'static str },
    #[error("field '{field}' must be {expected}")]
    TypeMismatch { field: &'static str, expected: &'static str },
    #[error("field '{field}' has length {len}, expected {}", describe_len(.min, .max))]
    Length { field: &'static str, len: usize, min: usize, max: Option<usize> },
    #[error("field '{field}' is {value}, expected {min}..={max}")]
    Range { field: &'static str, value: i64, min: i64, max: i64 },
}

impl ValidationError {
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::Malformed(_) | ValidationError::NotAnObject => None,
            ValidationError::MissingField { field }
            | ValidationError::TypeMismatch { field, .. }
            | ValidationError::Length { field, .. }
            | ValidationError::Range { field, .. } => Some(*field),
        }
    }
}

fn describe_len(min: &usize, max: &Option<usize>) -> String {
    match *max {
        Some(max) if max == *min => format!("exactly {min}"),
        Some(max) => format!("{min}..={max}"),
        None => format!("at least {min}"),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Length bounds in characters.
    String { min: usize, max: Option<usize> },
    Integer { min: i64, max: i64 },
    Boolean,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub name: &'static str,
    pub required: bool,
    pub ty: FieldType,
}

impl FieldRule {
    pub const fn string(name: &'static str, min: usize, max: Option<usize>) -> Self {
        Self { name, required: false, ty: FieldType::String { min, max } }
    }

    pub const fn integer(name: &'static str, min: i64, max: i64) -> Self {
        Self { name, required: false, ty: FieldType::Integer { min, max } }
    }

    pub const fn boolean(name: &'static str) -> Self {
        Self { name, required: false, ty: FieldType::Boolean }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn check(&self, value: Option<&Value>) -> Result<(), ValidationError> {
        let value = match value {
            None | Some(Value::Null) if self.required => {
                return Err(ValidationError::MissingField { field: self.name })
            }
            None | Some(Value::Null) => return Ok(()),
            Some(v) => v,
        };

        match self.ty {
            FieldType::String { min, max } => {
                let s = value.as_str().ok_or(ValidationError::TypeMismatch {
                    field: self.name,
                    expected: "a string",
                })?;
                let len = s.chars().count();
                if len < min || max.is_some_and(|max| len > max) {
                    return Err(ValidationError::Length { field: self.name, len, min, max });
                }
            }
            FieldType::Integer { min, max } => {
                let n = value.as_i64().ok_or(ValidationError::TypeMismatch {
                    field: self.name,
                    expected: "an integer",
                })?;
                if n < min || n > max {
                    return Err(ValidationError::Range { field: self.name, value: n, min, max });
                }
            }
            FieldType::Boolean => {
                if !value.is_boolean() {
                    return Err(ValidationError::TypeMismatch { field: self.name, expected: "a boolean" });
                }
            }
        }
        Ok(())
    }
}

/// Ordered set of rules for one action on one entity kind.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub fields: &'static [FieldRule],
}

impl Schema {
    pub fn validate_bytes(&self, data: &[u8]) -> Result<(), ValidationError> {
        let value: Value =
            serde_json::from_slice(data).map_err(|e| ValidationError::Malformed(e.to_string()))?;
        self.validate_value(&value)
    }

    pub fn validate_value(&self, value: &Value) -> Result<(), ValidationError> {
        let obj: &Map<String, Value> = value.as_object().ok_or(ValidationError::NotAnObject)?;
        for rule in self.fields {
            rule.check(obj.get(rule.name))?;
        }
        Ok(())
    }
}

const ID: FieldRule = FieldRule::string("id", 1, None).required();

const LAST_NAME: FieldRule = FieldRule::string("last_name", 1, Some(20)).required();
const FIRST_NAME: FieldRule = FieldRule::string("first_name", 1, Some(20)).required();
const PATRONYMIC: FieldRule = FieldRule::string("patronymic", 1, Some(20)).required();
const AGE: FieldRule = FieldRule::integer("age", 1, 120);
const REGISTRATION_DATE: FieldRule = FieldRule::string("registration_date", 10, Some(10)).required();

const NAME: FieldRule = FieldRule::string("name", 1, Some(20)).required();
const ADDRESS: FieldRule = FieldRule::string("address", 1, Some(50)).required();
const ACTIVE: FieldRule = FieldRule::boolean("active").required();
const OWNER: FieldRule = FieldRule::string("owner", 1, Some(20));

static CLIENT_LIST: [FieldRule; 1] = [LAST_NAME];
static CLIENT_CREATE: [FieldRule; 5] = [LAST_NAME, FIRST_NAME, PATRONYMIC, AGE, REGISTRATION_DATE];
static CLIENT_UPDATE: [FieldRule; 6] = [ID, LAST_NAME, FIRST_NAME, PATRONYMIC, AGE, REGISTRATION_DATE];

static MARKET_LIST: [FieldRule; 1] = [NAME];
static MARKET_CREATE: [FieldRule; 4] = [NAME, ADDRESS, ACTIVE, OWNER];
static MARKET_UPDATE: [FieldRule; 5] = [ID, NAME, ADDRESS, ACTIVE, OWNER];

static DELETE: [FieldRule; 1] = [ID];

impl EntityKind {
    pub fn schema(self, action: Action) -> Schema {
        let fields: &'static [FieldRule] = match (self, action) {
            (EntityKind::Client, Action::List) => &CLIENT_LIST,
            (EntityKind::Client, Action::Create) => &CLIENT_CREATE,
            (EntityKind::Client, Action::Update) => &CLIENT_UPDATE,
            (EntityKind::Market, Action::List) => &MARKET_LIST,
            (EntityKind::Market, Action::Create) => &MARKET_CREATE,
            (EntityKind::Market, Action::Update) => &MARKET_UPDATE,
            (_, Action::Delete) => &DELETE,
        };
        Schema { fields }
    }

    pub fn validate(self, action: Action, data: &[u8]) -> Result<(), ValidationError> {
        self.schema(action).validate_bytes(data)
    }

    pub fn validate_for_list(self, data: &[u8]) -> Result<(), ValidationError> {
        self.validate(Action::List, data)
    }

    pub fn validate_for_create(self, data: &[u8]) -> Result<(), ValidationError> {
        self.validate(Action::Create, data)
    }

    pub fn validate_for_update(self, data: &[u8]) -> Result<(), ValidationError> {
        self.validate(Action::Update, data)
    }

    pub fn validate_for_delete(self, data: &[u8]) -> Result<(), ValidationError> {
        self.validate(Action::Delete, data)
    }
}
