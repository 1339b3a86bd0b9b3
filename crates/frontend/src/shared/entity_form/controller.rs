//! Form state controller for entity create screens.
//!
//! Owns the record being edited. Field edits arrive as [`FormMessage`]s and
//! never validate; validation runs once per `submit`. At most one submission
//! is in flight at a time.

use contracts::shared::metadata::FieldMetadata;
use contracts::shared::record::{FieldErrors, FieldValue, Record};
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use super::gateway::SubmissionGateway;
use super::navigation::NavigationEffect;
use super::service::ApiError;
use crate::system::auth::guard::AccessPermit;

/// Record validator for one entity type
pub type Validator = fn(&Record) -> FieldErrors;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Validating,
    Submitting,
}

/// Input to the controller
#[derive(Debug, Clone, PartialEq)]
pub enum FormMessage {
    FieldChanged { name: String, value: FieldValue },
    /// Upstream defaults changed identity (e.g. a preselected supplier arrived)
    Reseed(Record),
}

/// What one `submit` call did
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Another submission was in flight, or the form was disposed
    Skipped,
    /// The permit does not cover creating this entity
    Denied,
    Invalid(FieldErrors),
    Created(String),
    Failed(ApiError),
}

/// Immutable view of the form for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct FormSnapshot {
    pub record: Record,
    pub errors: FieldErrors,
    pub form_error: Option<ApiError>,
    pub phase: FormPhase,
    pub dirty: BTreeSet<String>,
}

struct FormState {
    record: Record,
    defaults: Record,
    errors: FieldErrors,
    form_error: Option<ApiError>,
    phase: FormPhase,
    dirty: BTreeSet<String>,
    disposed: bool,
}

#[derive(Clone)]
pub struct FormController {
    permit: AccessPermit,
    fields: &'static [FieldMetadata],
    validator: Validator,
    gateway: SubmissionGateway,
    navigation: NavigationEffect,
    state: Rc<RefCell<FormState>>,
    on_change: Option<Rc<dyn Fn()>>,
}

impl FormController {
    pub fn new(
        permit: AccessPermit,
        fields: &'static [FieldMetadata],
        validator: Validator,
        gateway: SubmissionGateway,
        navigation: NavigationEffect,
        defaults: Record,
    ) -> Self {
        let defaults = normalize(fields, &defaults);
        Self {
            permit,
            fields,
            validator,
            gateway,
            navigation,
            state: Rc::new(RefCell::new(FormState {
                record: defaults.clone(),
                defaults,
                errors: FieldErrors::new(),
                form_error: None,
                phase: FormPhase::Idle,
                dirty: BTreeSet::new(),
                disposed: false,
            })),
            on_change: None,
        }
    }

    /// Callback invoked after every state change
    pub fn with_observer(mut self, on_change: Rc<dyn Fn()>) -> Self {
        self.on_change = Some(on_change);
        self
    }

    pub fn fields(&self) -> &'static [FieldMetadata] {
        self.fields
    }

    /// Replace record and defaults wholesale
    pub fn initialize(&self, defaults: Record) {
        self.apply(FormMessage::Reseed(defaults));
    }

    pub fn set_field(&self, name: &str, value: FieldValue) {
        self.apply(FormMessage::FieldChanged {
            name: name.to_string(),
            value,
        });
    }

    pub fn apply(&self, message: FormMessage) {
        {
            let mut state = self.state.borrow_mut();
            if state.disposed {
                return;
            }

            match message {
                FormMessage::FieldChanged { name, value } => {
                    if !state.record.set(&name, value) {
                        log::warn!("ignoring change to unknown field '{}'", name);
                        return;
                    }
                    state.dirty.insert(name);
                }
                FormMessage::Reseed(defaults) => {
                    let defaults = normalize(self.fields, &defaults);
                    state.record = defaults.clone();
                    state.defaults = defaults;
                    state.errors = FieldErrors::new();
                    state.form_error = None;
                    state.dirty.clear();
                }
            }
        }
        self.notify();
    }

    /// Validate, then create the record through the gateway.
    ///
    /// On success the record resets to its defaults before the navigation
    /// effect runs. On failure the entered values are kept and the error is
    /// exposed at form level.
    pub async fn submit(&self) -> SubmitOutcome {
        let record = match self.begin_submit() {
            Ok(record) => record,
            Err(outcome) => return outcome,
        };

        let result = self.gateway.create(&record).await;
        self.finish_submit(result)
    }

    fn begin_submit(&self) -> Result<Record, SubmitOutcome> {
        let outcome = {
            let mut state = self.state.borrow_mut();
            if state.disposed || state.phase != FormPhase::Idle {
                log::debug!("submit ignored in phase {:?}", state.phase);
                return Err(SubmitOutcome::Skipped);
            }

            state.form_error = None;

            if !self.permit.allows_create(self.gateway.collection()) {
                log::warn!("create {} refused: not permitted", self.gateway.collection());
                state.form_error = Some(ApiError::Unauthorized);
                Err(SubmitOutcome::Denied)
            } else {
                state.phase = FormPhase::Validating;
                let errors = (self.validator)(&state.record);
                state.errors = errors.clone();

                if errors.is_empty() {
                    state.phase = FormPhase::Submitting;
                    Ok(state.record.clone())
                } else {
                    log::debug!("{} has {} invalid field(s)", self.gateway.collection(), errors.len());
                    state.phase = FormPhase::Idle;
                    Err(SubmitOutcome::Invalid(errors))
                }
            }
        };
        self.notify();
        outcome
    }

    fn finish_submit(&self, result: Result<String, ApiError>) -> SubmitOutcome {
        if self.state.borrow().disposed {
            return match result {
                Ok(id) => SubmitOutcome::Created(id),
                Err(e) => SubmitOutcome::Failed(e),
            };
        }

        match result {
            Ok(id) => {
                {
                    let mut state = self.state.borrow_mut();
                    state.record = state.defaults.clone();
                    state.errors = FieldErrors::new();
                    state.dirty.clear();
                    state.phase = FormPhase::Idle;
                }
                self.notify();
                self.navigation.after_create();
                SubmitOutcome::Created(id)
            }
            Err(e) => {
                log::error!("Failed to create {}: {}", self.gateway.collection(), e);
                {
                    let mut state = self.state.borrow_mut();
                    state.form_error = Some(e.clone());
                    state.phase = FormPhase::Idle;
                }
                self.notify();
                SubmitOutcome::Failed(e)
            }
        }
    }

    /// Leave the form. Record and errors are not touched.
    pub fn cancel(&self) {
        self.navigation.cancel();
    }

    /// Stop all further state changes, including pending completions
    pub fn dispose(&self) {
        self.state.borrow_mut().disposed = true;
    }

    pub fn snapshot(&self) -> FormSnapshot {
        let state = self.state.borrow();
        FormSnapshot {
            record: state.record.clone(),
            errors: state.errors.clone(),
            form_error: state.form_error.clone(),
            phase: state.phase,
            dirty: state.dirty.clone(),
        }
    }

    pub fn value(&self, name: &str) -> FieldValue {
        self.state
            .borrow()
            .record
            .get(name)
            .cloned()
            .unwrap_or(FieldValue::Null)
    }

    pub fn error(&self, name: &str) -> Option<String> {
        self.state.borrow().errors.get(name).map(str::to_string)
    }

    pub fn form_error(&self) -> Option<ApiError> {
        self.state.borrow().form_error.clone()
    }

    pub fn phase(&self) -> FormPhase {
        self.state.borrow().phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase() == FormPhase::Submitting
    }

    pub fn is_dirty(&self, name: &str) -> bool {
        self.state.borrow().dirty.contains(name)
    }

    fn notify(&self) {
        if self.state.borrow().disposed {
            return;
        }
        if let Some(on_change) = &self.on_change {
            on_change();
        }
    }
}

/// Defaults restricted to the schema, with `Null` for missing fields
fn normalize(fields: &[FieldMetadata], defaults: &Record) -> Record {
    Record::from_defaults(fields, defaults.iter().map(|(name, value)| (name, value.clone())))
}
