// src/schema/types.rs

/// Declarative description of one Application field.
///
/// Validator rules use a compact string grammar, checked at validation time:
/// `min_len:N`, `max_len:N`, `regex:PAT`, `min:X`, `max:X`,
/// `max:current_year` (int fields), `positive` (number fields),
/// `not_past` (date fields). A malformed rule is a schema problem, not a
/// user input problem.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,

    pub validators: &'static [&'static str],

    /// For select fields.
    pub choices: Option<&'static [&'static str]>,

    /// Conditional requirement: the field becomes required when the named
    /// sibling currently holds the given value. Evaluated against the full
    /// record, so it must be re-checked whenever the peer changes.
    pub required_if: Option<RequiredIf>,

    /// Shown instead of the generic message when a `regex:` rule fails.
    pub pattern_hint: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredIf {
    pub peer: &'static str,
    pub equals: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Multiline,
    Number,
    Int,
    Date,
    Select,
}

impl FieldSpec {
    pub const fn new(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            kind,
            required: false,
            validators: &[],
            choices: None,
            required_if: None,
            pattern_hint: None,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn validators(mut self, rules: &'static [&'static str]) -> Self {
        self.validators = rules;
        self
    }

    pub const fn choices(mut self, choices: &'static [&'static str]) -> Self {
        self.choices = Some(choices);
        self
    }

    pub const fn required_if(mut self, peer: &'static str, equals: &'static str) -> Self {
        self.required_if = Some(RequiredIf { peer, equals });
        self
    }

    pub const fn pattern_hint(mut self, hint: &'static str) -> Self {
        self.pattern_hint = Some(hint);
        self
    }

    /// Character budget of a counter-bound multiline field, from its
    /// `max_len:` rule.
    pub fn max_chars(&self) -> Option<usize> {
        self.validators
            .iter()
            .find_map(|r| r.strip_prefix("max_len:"))
            .and_then(|n| n.parse::<usize>().ok())
    }
}

/// One step of the wizard: an ordered group of fields.
#[derive(Debug, Clone)]
pub struct SectionSpec {
    pub id: &'static str,
    pub title: &'static str,
    pub fields: Vec<FieldSpec>,
}

/// The full form schema: the ordered union of the per-section schemas.
#[derive(Debug, Clone)]
pub struct FormSchema {
    pub sections: Vec<SectionSpec>,
}

impl FormSchema {
    pub fn step_count(&self) -> usize {
        self.sections.len()
    }

    pub fn section(&self, index: usize) -> Option<&SectionSpec> {
        self.sections.get(index)
    }

    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.all_fields().find(|f| f.key == key)
    }

    /// All fields in declaration order across sections.
    pub fn all_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.sections.iter().flat_map(|s| s.fields.iter())
    }

    /// Fields whose requirement depends on the given field.
    pub fn dependents_of(&self, key: &str) -> Vec<&FieldSpec> {
        self.all_fields()
            .filter(|f| f.required_if.map(|r| r.peer == key).unwrap_or(false))
            .collect()
    }
}

// ======================================================
// Unit Tests
// ======================================================
