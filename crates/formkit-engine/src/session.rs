//! Live preview of a schema: values, derived recomputation, validation.

use crate::builder::validate_schema;
use crate::error::EngineError;
use crate::validate::check_field;
use formkit_expr::{eval, parse, Expr, FnScope, Value};
use formkit_graph::DependencyGraph;
use formkit_schema::{FieldId, FormSchema, SchemaId};
use formkit_store::SchemaRepository;
use indexmap::IndexMap;
use std::collections::HashMap;
use tracing::warn;

/// Result of a submit attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// All rules passed; the final values
    Accepted(IndexMap<FieldId, Value>),
    /// At least one rule failed; the per-field messages
    Rejected(IndexMap<FieldId, String>),
}

/// One preview of a schema.
///
/// Owns the values and errors maps for its lifetime; both are discarded with
/// the session. Formulas are compiled once at load, and derived fields are
/// recomputed in dependency order on every change, so a derived field
/// reading another derived field sees the value computed earlier in the
/// same pass.
#[derive(Debug)]
pub struct PreviewSession {
    schema: FormSchema,
    values: IndexMap<FieldId, Value>,
    errors: IndexMap<FieldId, String>,
    evaluation_order: Vec<FieldId>,
    programs: HashMap<FieldId, Expr>,
}

impl PreviewSession {
    /// Start a session over a schema.
    ///
    /// Validates the schema (including dependency cycles), compiles every
    /// formula, and initializes values from field defaults.
    pub fn new(schema: FormSchema) -> Result<Self, EngineError> {
        validate_schema(&schema)?;

        let evaluation_order = DependencyGraph::build(&schema.fields)?.evaluation_order()?;

        let mut programs = HashMap::new();
        for field in schema.derived_fields() {
            let formula = field.formula.as_deref().unwrap_or_default();
            let expr = parse(formula).map_err(|source| EngineError::Formula {
                field: field.id.clone(),
                source,
            })?;
            programs.insert(field.id.clone(), expr);
        }

        let values = schema
            .fields
            .iter()
            .map(|f| (f.id.clone(), Value::from_default(&f.default_value)))
            .collect();

        let mut session = Self {
            schema,
            values,
            errors: IndexMap::new(),
            evaluation_order,
            programs,
        };
        session.recompute_derived();
        Ok(session)
    }

    /// Load a saved schema and start a session over it
    pub fn load(repo: &dyn SchemaRepository, id: &SchemaId) -> Result<Self, EngineError> {
        let schema = repo
            .load(id)?
            .ok_or(EngineError::SchemaNotFound(*id))?;
        Self::new(schema)
    }

    /// The schema under preview
    #[inline]
    #[must_use]
    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    /// Current values, in field order
    #[inline]
    #[must_use]
    pub fn values(&self) -> &IndexMap<FieldId, Value> {
        &self.values
    }

    /// Current value of one field
    #[must_use]
    pub fn value(&self, id: &FieldId) -> Option<&Value> {
        self.values.get(id)
    }

    /// Validation messages from the last submit
    #[inline]
    #[must_use]
    pub fn errors(&self) -> &IndexMap<FieldId, String> {
        &self.errors
    }

    /// Record a user-entered value and recompute derived fields.
    ///
    /// Unknown ids are ignored; so are derived fields, whose values only
    /// ever come from their formulas.
    pub fn set_value(&mut self, id: &FieldId, value: Value) {
        let Some(field) = self.schema.field(id) else {
            return;
        };
        if field.is_derived {
            return;
        }
        self.values.insert(id.clone(), value);
        self.recompute_derived();
    }

    /// Recompute every derived field, upstream first.
    ///
    /// A failing formula leaves that field's value unchanged for the pass.
    fn recompute_derived(&mut self) {
        for id in &self.evaluation_order {
            let Some(field) = self.schema.field(id) else {
                continue;
            };
            let Some(program) = self.programs.get(id) else {
                continue;
            };

            let result = {
                let values = &self.values;
                let parents = &field.parent_field_ids;
                let scope = FnScope(|name: &str| -> Option<Value> {
                    parents
                        .iter()
                        .find(|p| p.as_str() == name)
                        .and_then(|p| values.get(p))
                        .cloned()
                });
                eval(program, &scope)
            };

            match result {
                Ok(value) => {
                    self.values.insert(id.clone(), value);
                }
                Err(err) => {
                    warn!(field = %id, error = %err, "derived field evaluation failed");
                }
            }
        }
    }

    /// Run every field's rules; returns whether the form is clean.
    ///
    /// The errors map is rebuilt wholesale on each call.
    pub fn validate(&mut self) -> bool {
        let mut errors = IndexMap::new();
        for field in &self.schema.fields {
            let value = self.values.get(&field.id).unwrap_or(&Value::Empty);
            if let Some(message) = check_field(field, value) {
                errors.insert(field.id.clone(), message);
            }
        }
        self.errors = errors;
        self.errors.is_empty()
    }

    /// Validate and either hand back the final values or the error map
    pub fn submit(&mut self) -> SubmitOutcome {
        if self.validate() {
            SubmitOutcome::Accepted(self.values.clone())
        } else {
            SubmitOutcome::Rejected(self.errors.clone())
        }
    }
}
