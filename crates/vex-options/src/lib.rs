//! Options parsing shim for the vex command line.
//!
//! Parsing itself is delegated to [`vex_docarg`]: the grammar docstring
//! below is compiled and matched against argv, and the resulting raw option
//! map is re-keyed into normalized field names (`--always-copy` becomes
//! `always_copy`, `<virtual_environment_name>` becomes
//! `virtual_environment_name`) behind the [`Options`] wrapper.
//!
//! The wrapper is built in two phases: the normalized map is constructed
//! first, then wrapped in a fixed-shape object whose fields can be replaced
//! but never added or removed.

use std::fmt;
use std::ops::{Index, IndexMut};

use indexmap::IndexMap;
use thiserror::Error;
use vex_docarg::{Grammar, GrammarError, RawMatches, UsageError};

pub use vex_docarg::RawValue as Value;

/// Default command-line grammar for vex.
///
/// The first usage pattern is the normal invocation; the alternatives let
/// `--list`/`--version` run without naming a virtual environment.
pub const DEFAULT_GRAMMAR: &str = "\
Manages virtual environments

Usage: vex [options] <virtual_environment_name> [<rest>]
       vex [options] --list PREFIX
       vex [options] --version

Options:
       --always-copy         Use copies instead of creating symlinks
       --config PATH         Configuration file to read
       --cwd PATH            Path to run command in
    -l --list PREFIX         List virtual environment currently created
    -m --make                Make the virtual environment
       --path PATH           Open a specific path
    -p --python VERSION      Use a specific python version
    -r --remove              Remove the virtual environment
       --shell-config SHELL  Shell to use
       --site-packages       Allow system site package imports
    -V --version             Display version of vex
    -X --exit                Run a make/remove command and immediately exit
";

#[derive(Debug, Error)]
pub enum OptionsError {
    /// Read or write of a field the grammar does not define.
    #[error("key not found: {0}")]
    UnknownKey(String),

    /// argv did not match the grammar.
    #[error(transparent)]
    Usage(#[from] UsageError),

    /// The grammar docstring itself is malformed.
    #[error(transparent)]
    Grammar(#[from] GrammarError),
}

/// Normalize a raw grammar token into a field name: strip the leading dash
/// run, strip one pair of wrapping angle brackets, and replace hyphens with
/// underscores. Idempotent.
pub fn normalize_key(raw: &str) -> String {
    let key = raw.trim_start_matches('-');
    let key = key
        .strip_prefix('<')
        .and_then(|k| k.strip_suffix('>'))
        .unwrap_or(key);
    key.replace('-', "_")
}

/// Parsed options with normalized field names.
///
/// The field set is fixed at construction: values can be replaced through
/// [`Options::set`] or subscript assignment, but keys are never inserted or
/// removed afterwards.
#[derive(Debug, Clone)]
pub struct Options {
    options: IndexMap<String, Value>,
}

impl Options {
    /// Build from the parser's raw matches, normalizing every key and
    /// keeping values unchanged.
    ///
    /// Normalization is assumed injective over the grammar in use; should
    /// two raw keys collide, the later raw entry wins.
    pub fn from_raw(raw: RawMatches) -> Self {
        let mut options = IndexMap::new();
        for (key, value) in raw {
            options.insert(normalize_key(&key), value);
        }
        Self { options }
    }

    /// Read a field by its normalized name.
    pub fn get(&self, key: &str) -> Result<&Value, OptionsError> {
        self.options
            .get(key)
            .ok_or_else(|| OptionsError::UnknownKey(key.to_string()))
    }

    /// Replace the value of an existing field. Never inserts.
    pub fn set(&mut self, key: &str, value: Value) -> Result<(), OptionsError> {
        match self.options.get_mut(key) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(OptionsError::UnknownKey(key.to_string())),
        }
    }

    /// Boolean view of a field: switch state, or presence for value fields.
    pub fn flag(&self, key: &str) -> Result<bool, OptionsError> {
        Ok(match self.get(key)? {
            Value::Switch(on) => *on,
            Value::Str(value) => value.is_some(),
            Value::List(values) => !values.is_empty(),
        })
    }

    /// String view of a value-taking field (`None` when absent).
    pub fn value(&self, key: &str) -> Result<Option<&str>, OptionsError> {
        Ok(match self.get(key)? {
            Value::Str(value) => value.as_deref(),
            Value::Switch(_) | Value::List(_) => None,
        })
    }

    /// List view of a repeating field.
    pub fn values(&self, key: &str) -> Result<&[String], OptionsError> {
        Ok(match self.get(key)? {
            Value::List(values) => values.as_slice(),
            Value::Switch(_) | Value::Str(_) => &[],
        })
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.options.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

impl Index<&str> for Options {
    type Output = Value;

    /// Subscript read. Panics with the map's native missing-key error on an
    /// unknown field, unlike the fallible [`Options::get`].
    fn index(&self, key: &str) -> &Value {
        &self.options[key]
    }
}

impl IndexMut<&str> for Options {
    /// Subscript write. Replaces the value of an existing field; panics
    /// with "key not found" on an unknown one (no insertion).
    fn index_mut(&mut self, key: &str) -> &mut Value {
        match self.options.get_mut(key) {
            Some(slot) => slot,
            None => panic!("key not found: {key}"),
        }
    }
}

impl fmt::Display for Options {
    /// Diagnostic rendering: `<Options make:true, python:3.10, ...>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Options")?;
        for (i, (key, value)) in self.options.iter().enumerate() {
            if i == 0 {
                write!(f, " ")?;
            } else {
                write!(f, ", ")?;
            }
            write!(f, "{key}:")?;
            match value {
                Value::Switch(on) => write!(f, "{on}")?,
                Value::Str(Some(value)) => write!(f, "{value}")?,
                Value::Str(None) => write!(f, "none")?,
                Value::List(values) => write!(f, "[{}]", values.join(", "))?,
            }
        }
        write!(f, ">")
    }
}

/// Parse argv against [`DEFAULT_GRAMMAR`].
pub fn parse(argv: &[String]) -> Result<Options, OptionsError> {
    parse_with_grammar(argv, DEFAULT_GRAMMAR)
}

/// Parse argv against an explicit grammar docstring.
///
/// Pure: no environment variables, files, or other side effects. Usage and
/// grammar errors from the parser propagate unchanged.
pub fn parse_with_grammar(argv: &[String], grammar: &str) -> Result<Options, OptionsError> {
    let grammar = Grammar::parse(grammar)?;
    let raw = grammar.parse_argv(argv)?;
    tracing::debug!(fields = raw.len(), "parsed command-line options");
    Ok(Options::from_raw(raw))
}
