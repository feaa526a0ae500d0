//! Structured query predicates.
//!
//! The filter and scope builders do not talk to a database. They return a
//! [`Predicate`], a small closed tree that can be handed to two consumers:
//!
//! - **A relational store**: [`Predicate::to_json`] renders the ORM-style `where`
//!   document (`{"isProject": false, "status": {"not": "ARCHIVED"}}`).
//! - **An in-process store**: [`Predicate::matches`] evaluates the same tree
//!   against any [`Queryable`] record.
//!
//! ## JSON Shape
//!
//! | Predicate | JSON |
//! |-----------|------|
//! | `field == v` | `{"field": v}` |
//! | `field != v` | `{"field": {"not": v}}` |
//! | `field in [..]` | `{"field": {"in": [..]}}` |
//! | `field contains s` | `{"field": {"contains": s, "mode": "insensitive"}}` |
//! | `And[a, b]` | keys of `a` and `b` merged; `{"AND": [a, b]}` on a key clash |
//! | `Or[a, b]` | `{"OR": [a, b]}` |
//! | `relation.some(a)` | `{"relation": {"some": a}}` |

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// A record the in-process stores can evaluate predicates against.
pub trait Queryable {
    /// Value of a scalar field, `Null` when unset or unknown.
    fn field(&self, name: &str) -> Value;

    /// Records on the far side of a to-many relation.
    fn related(&self, _relation: &str) -> Vec<&dyn Queryable> {
        Vec::new()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Equals(Value),
    NotEquals(Value),
    In(Vec<Value>),
    Contains { needle: String, insensitive: bool },
}

impl Condition {
    fn matches(&self, actual: &Value) -> bool {
        match self {
            Condition::Equals(expected) => actual == expected,
            Condition::NotEquals(expected) => actual != expected,
            Condition::In(options) => options.contains(actual),
            Condition::Contains {
                needle,
                insensitive,
            } => {
                let Value::String(haystack) = actual else {
                    return false;
                };
                if *insensitive {
                    haystack.to_lowercase().contains(&needle.to_lowercase())
                } else {
                    haystack.contains(needle.as_str())
                }
            }
        }
    }

    fn to_json(&self) -> Value {
        match self {
            Condition::Equals(value) => value.clone(),
            Condition::NotEquals(value) => single("not", value.clone()),
            Condition::In(values) => single("in", Value::Array(values.clone())),
            Condition::Contains {
                needle,
                insensitive,
            } => {
                let mut map = Map::new();
                map.insert("contains".into(), Value::from(needle.as_str()));
                if *insensitive {
                    map.insert("mode".into(), Value::from("insensitive"));
                }
                Value::Object(map)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
    Field {
        field: String,
        condition: Condition,
    },
    /// At least one related record matches.
    Some {
        relation: String,
        predicate: Box<Predicate>,
    },
}

impl Predicate {
    pub fn field(field: impl Into<String>, condition: Condition) -> Self {
        Predicate::Field {
            field: field.into(),
            condition,
        }
    }

    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::field(field, Condition::Equals(value.into()))
    }

    pub fn ne(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::field(field, Condition::NotEquals(value.into()))
    }

    pub fn one_of<I, V>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::field(
            field,
            Condition::In(values.into_iter().map(Into::into).collect()),
        )
    }

    /// Case-insensitive substring match.
    pub fn contains(field: impl Into<String>, needle: impl Into<String>) -> Self {
        Self::field(
            field,
            Condition::Contains {
                needle: needle.into(),
                insensitive: true,
            },
        )
    }

    pub fn some(relation: impl Into<String>, predicate: Predicate) -> Self {
        Predicate::Some {
            relation: relation.into(),
            predicate: Box::new(predicate),
        }
    }

    /// Direct children of an `And`/`Or`; empty for leaves.
    pub fn clauses(&self) -> &[Predicate] {
        match self {
            Predicate::And(clauses) | Predicate::Or(clauses) => clauses,
            _ => &[],
        }
    }

    pub fn matches(&self, record: &dyn Queryable) -> bool {
        match self {
            Predicate::And(clauses) => clauses.iter().all(|c| c.matches(record)),
            Predicate::Or(clauses) => clauses.iter().any(|c| c.matches(record)),
            Predicate::Field { field, condition } => condition.matches(&record.field(field)),
            Predicate::Some {
                relation,
                predicate,
            } => record
                .related(relation)
                .into_iter()
                .any(|related| predicate.matches(related)),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Predicate::And(clauses) => merge_and(clauses),
            Predicate::Or(clauses) => single(
                "OR",
                Value::Array(clauses.iter().map(Predicate::to_json).collect()),
            ),
            Predicate::Field { field, condition } => single(field, condition.to_json()),
            Predicate::Some {
                relation,
                predicate,
            } => single(relation, single("some", predicate.to_json())),
        }
    }
}

impl Serialize for Predicate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

fn single(key: &str, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(key.to_string(), value);
    Value::Object(map)
}

fn merge_and(clauses: &[Predicate]) -> Value {
    let rendered: Vec<Value> = clauses.iter().map(Predicate::to_json).collect();
    let mut merged = Map::new();
    let mut clash = false;
    for value in &rendered {
        match value {
            Value::Object(map) if !map.keys().any(|key| merged.contains_key(key)) => {
                for (key, inner) in map {
                    merged.insert(key.clone(), inner.clone());
                }
            }
            _ => {
                clash = true;
                break;
            }
        }
    }
    if clash {
        single("AND", Value::Array(rendered))
    } else {
        Value::Object(merged)
    }
}
