//! Docstring-driven option grammar parsing.
//!
//! A grammar is an ordinary help docstring with a `Usage:` section and an
//! `Options:` section. `Grammar::parse` compiles the text into flag
//! definitions and usage patterns; `Grammar::parse_argv` matches an argv
//! slice against it and produces a [`RawMatches`] map keyed by the literal
//! grammar tokens (`--always-copy`, `<virtual_environment_name>`, ...).
//!
//! This crate is kept small and dependency-free so the surrounding tool can
//! treat it as a narrow collaborator: grammar text in, raw option map out.

use std::fmt;

/// Malformed grammar text (a programming error, not a user error).
#[derive(Debug, Clone)]
pub struct GrammarError {
    message: String,
}

impl GrammarError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid grammar: {}", self.message)
    }
}

impl std::error::Error for GrammarError {}

/// argv does not match the grammar. Carries the rendered usage section so
/// callers can surface it verbatim.
#[derive(Debug, Clone)]
pub struct UsageError {
    message: String,
    usage: String,
}

impl UsageError {
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn usage(&self) -> &str {
        &self.usage
    }
}

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n\n{}", self.message, self.usage)
    }
}

impl std::error::Error for UsageError {}

/// A parsed option value.
///
/// Mirrors the docopt result dict: boolean flags are always present as
/// `Switch`, value-taking flags and positionals as `Str` (with `None` when
/// absent and no default applies), repeating positionals as `List`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    Switch(bool),
    Str(Option<String>),
    List(Vec<String>),
}

/// Raw option map produced by [`Grammar::parse_argv`].
///
/// Keys are the grammar's literal tokens. Entry order follows the grammar:
/// declared options first, then positionals in first-appearance order.
#[derive(Debug, Clone, Default)]
pub struct RawMatches {
    entries: Vec<(String, RawValue)>,
}

impl RawMatches {
    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, key: String, value: RawValue) {
        self.entries.push((key, value));
    }
}

impl IntoIterator for RawMatches {
    type Item = (String, RawValue);
    type IntoIter = std::vec::IntoIter<(String, RawValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[derive(Debug, Clone)]
struct OptDef {
    short: Option<String>,
    long: Option<String>,
    takes_value: bool,
    default_value: Option<String>,
}

impl OptDef {
    /// Canonical raw-map key: the long token, or the short one when no long
    /// form exists.
    fn key(&self) -> &str {
        self.long
            .as_deref()
            .or(self.short.as_deref())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
struct Slot {
    name: String,
    required: bool,
    repeating: bool,
}

#[derive(Debug, Clone)]
struct Pattern {
    slots: Vec<Slot>,
    required_flags: Vec<String>,
    optional_flags: Vec<String>,
    allow_extra: bool,
}

/// A compiled option grammar.
#[derive(Debug, Clone)]
pub struct Grammar {
    options: Vec<OptDef>,
    patterns: Vec<Pattern>,
    // Positional tokens in first-appearance order across all patterns,
    // with whether any pattern marks them repeating.
    positionals: Vec<(String, bool)>,
    usage_text: String,
}

impl Grammar {
    /// Compile a docstring grammar.
    pub fn parse(text: &str) -> Result<Self, GrammarError> {
        let mut options = parse_options_section(text)?;
        let (pattern_lines, usage_text) = extract_usage_section(text)?;

        let mut patterns = Vec::new();
        for line in &pattern_lines {
            patterns.push(parse_pattern(line, &mut options)?);
        }

        let mut positionals: Vec<(String, bool)> = Vec::new();
        for pattern in &patterns {
            for slot in &pattern.slots {
                match positionals.iter_mut().find(|(n, _)| n == &slot.name) {
                    Some(entry) => entry.1 = entry.1 || slot.repeating,
                    None => positionals.push((slot.name.clone(), slot.repeating)),
                }
            }
        }

        Ok(Self {
            options,
            patterns,
            positionals,
            usage_text,
        })
    }

    /// The usage section as it appeared in the grammar text.
    pub fn usage(&self) -> &str {
        &self.usage_text
    }

    /// Parse an argv slice against this grammar.
    ///
    /// The result contains every grammar key. Flags repeated in argv keep
    /// the last value.
    pub fn parse_argv(&self, argv: &[String]) -> Result<RawMatches, UsageError> {
        let mut explicit: Vec<String> = Vec::new();
        let mut switches: Vec<String> = Vec::new();
        let mut values: Vec<(String, String)> = Vec::new();
        let mut positionals: Vec<String> = Vec::new();

        let mut i = 0usize;
        let mut after_separator = false;
        while i < argv.len() {
            let arg = argv[i].as_str();

            if !after_separator && arg == "--" {
                after_separator = true;
                i += 1;
                continue;
            }

            if !after_separator && arg.starts_with("--") {
                let (name, attached) = match arg.split_once('=') {
                    Some((name, value)) => (name, Some(value)),
                    None => (arg, None),
                };
                let def = self.resolve_long(name)?;
                let key = def.key().to_string();

                if let Some(value) = attached {
                    if !def.takes_value {
                        return Err(self.usage_error(format!(
                            "flag does not take a value: {name}"
                        )));
                    }
                    push_unique(&mut explicit, &key);
                    values.push((key, value.to_string()));
                    i += 1;
                    continue;
                }

                push_unique(&mut explicit, &key);
                if def.takes_value {
                    let Some(value) = argv.get(i + 1) else {
                        return Err(
                            self.usage_error(format!("missing value for {name}"))
                        );
                    };
                    values.push((key, value.clone()));
                    i += 2;
                } else {
                    push_unique(&mut switches, &key);
                    i += 1;
                }
                continue;
            }

            if !after_separator && arg.starts_with('-') && arg != "-" {
                // Stacked shorts: -rX, attached value: -p3.10.
                let chars: Vec<char> = arg.chars().skip(1).collect();
                let mut k = 0usize;
                let mut consumed_next = false;
                while k < chars.len() {
                    let flag = format!("-{}", chars[k]);
                    let Some(def) = self
                        .options
                        .iter()
                        .find(|d| d.short.as_deref() == Some(flag.as_str()))
                    else {
                        return Err(self.usage_error(format!("unknown flag: {flag}")));
                    };
                    let key = def.key().to_string();
                    push_unique(&mut explicit, &key);
                    if def.takes_value {
                        let rest: String = chars[k + 1..].iter().collect();
                        if !rest.is_empty() {
                            values.push((key, rest));
                        } else {
                            let Some(value) = argv.get(i + 1) else {
                                return Err(self.usage_error(format!(
                                    "missing value for {flag}"
                                )));
                            };
                            values.push((key, value.clone()));
                            consumed_next = true;
                        }
                        break;
                    }
                    push_unique(&mut switches, &key);
                    k += 1;
                }
                i += if consumed_next { 2 } else { 1 };
                continue;
            }

            positionals.push(arg.to_string());
            i += 1;
        }

        let assignments = self
            .patterns
            .iter()
            .find_map(|p| match_pattern(p, &explicit, &positionals))
            .ok_or_else(|| {
                self.usage_error("arguments do not match any usage pattern")
            })?;

        let mut matches = RawMatches::default();
        for def in &self.options {
            let key = def.key().to_string();
            let value = if def.takes_value {
                match values.iter().rev().find(|(k, _)| k == &key) {
                    Some((_, v)) => RawValue::Str(Some(v.clone())),
                    None => RawValue::Str(def.default_value.clone()),
                }
            } else {
                RawValue::Switch(switches.contains(&key))
            };
            matches.push(key, value);
        }
        for (name, repeating) in &self.positionals {
            let value = match assignments.iter().find(|(n, _)| n == name) {
                Some((_, v)) => v.clone(),
                None if *repeating => RawValue::List(Vec::new()),
                None => RawValue::Str(None),
            };
            matches.push(name.clone(), value);
        }

        Ok(matches)
    }

    /// Resolve a long flag, accepting any unambiguous prefix.
    fn resolve_long(&self, name: &str) -> Result<&OptDef, UsageError> {
        if name.len() <= 2 {
            return Err(self.usage_error(format!("unknown flag: {name}")));
        }
        if let Some(def) = self
            .options
            .iter()
            .find(|d| d.long.as_deref() == Some(name))
        {
            return Ok(def);
        }

        let candidates: Vec<&OptDef> = self
            .options
            .iter()
            .filter(|d| d.long.as_deref().is_some_and(|l| l.starts_with(name)))
            .collect();
        match candidates.as_slice() {
            [] => Err(self.usage_error(format!("unknown flag: {name}"))),
            [def] => Ok(*def),
            _ => {
                let names: Vec<&str> =
                    candidates.iter().filter_map(|d| d.long.as_deref()).collect();
                Err(self.usage_error(format!(
                    "ambiguous flag {name}, could be any of: {}",
                    names.join(", ")
                )))
            }
        }
    }

    fn usage_error(&self, message: impl Into<String>) -> UsageError {
        UsageError {
            message: message.into(),
            usage: self.usage_text.clone(),
        }
    }
}

fn push_unique(list: &mut Vec<String>, key: &str) {
    if !list.iter().any(|k| k == key) {
        list.push(key.to_string());
    }
}

/// Try to match collected flags and positionals against one usage pattern,
/// returning positional assignments on success.
fn match_pattern(
    pattern: &Pattern,
    explicit: &[String],
    positionals: &[String],
) -> Option<Vec<(String, RawValue)>> {
    for flag in &pattern.required_flags {
        if !explicit.iter().any(|k| k == flag) {
            return None;
        }
    }
    if !pattern.allow_extra {
        for key in explicit {
            if !pattern.required_flags.contains(key)
                && !pattern.optional_flags.contains(key)
            {
                return None;
            }
        }
    }

    let mut assignments = Vec::new();
    let mut idx = 0usize;
    for slot in &pattern.slots {
        if slot.repeating {
            let rest: Vec<String> = positionals[idx..].to_vec();
            if slot.required && rest.is_empty() {
                return None;
            }
            idx = positionals.len();
            assignments.push((slot.name.clone(), RawValue::List(rest)));
        } else if idx < positionals.len() {
            assignments.push((
                slot.name.clone(),
                RawValue::Str(Some(positionals[idx].clone())),
            ));
            idx += 1;
        } else if slot.required {
            return None;
        }
    }
    if idx != positionals.len() {
        return None;
    }
    Some(assignments)
}

/// Collect usage pattern lines and the verbatim usage text.
fn extract_usage_section(text: &str) -> Result<(Vec<String>, String), GrammarError> {
    let mut lines = text.lines();
    let mut pattern_lines = Vec::new();
    let mut usage_lines = Vec::new();

    for line in lines.by_ref() {
        let trimmed = line.trim();
        if trimmed.to_ascii_lowercase().starts_with("usage:") {
            usage_lines.push(line.trim_end().to_string());
            let first = trimmed["usage:".len()..].trim();
            if !first.is_empty() {
                pattern_lines.push(first.to_string());
            }
            break;
        }
    }
    if usage_lines.is_empty() {
        return Err(GrammarError::new("no usage section"));
    }

    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            break;
        }
        usage_lines.push(line.trim_end().to_string());
        pattern_lines.push(trimmed.to_string());
    }

    if pattern_lines.is_empty() {
        return Err(GrammarError::new("usage section declares no patterns"));
    }
    Ok((pattern_lines, usage_lines.join("\n")))
}

/// Parse the `Options:` section into flag definitions.
fn parse_options_section(text: &str) -> Result<Vec<OptDef>, GrammarError> {
    let mut options: Vec<OptDef> = Vec::new();
    let mut in_section = false;

    for line in text.lines() {
        let trimmed = line.trim();
        if !in_section {
            if trimmed.to_ascii_lowercase().starts_with("options:") {
                in_section = true;
            }
            continue;
        }
        if trimmed.is_empty() {
            break;
        }
        if !trimmed.starts_with('-') {
            // Help text wrapped onto a continuation line.
            continue;
        }

        let def = parse_option_line(trimmed)?;
        for prev in &options {
            if prev.long.is_some() && prev.long == def.long {
                return Err(GrammarError::new(format!(
                    "duplicate flag declaration: {}",
                    def.long.as_deref().unwrap_or_default()
                )));
            }
            if prev.short.is_some() && prev.short == def.short {
                return Err(GrammarError::new(format!(
                    "duplicate flag declaration: {}",
                    def.short.as_deref().unwrap_or_default()
                )));
            }
        }
        options.push(def);
    }

    Ok(options)
}

/// Parse one `Options:` line, e.g. `-l --list PREFIX  List environments`.
fn parse_option_line(line: &str) -> Result<OptDef, GrammarError> {
    let (decl, help) = match line.split_once("  ") {
        Some((decl, help)) => (decl, help.trim()),
        None => (line, ""),
    };

    let mut def = OptDef {
        short: None,
        long: None,
        takes_value: false,
        default_value: None,
    };

    let decl = decl.replace(',', " ");
    for token in decl.split_whitespace() {
        if token.starts_with("--") {
            let (name, placeholder) = match token.split_once('=') {
                Some((name, p)) => (name, Some(p)),
                None => (token, None),
            };
            if def.long.is_some() {
                return Err(GrammarError::new(format!(
                    "option declares two long forms: {line}"
                )));
            }
            def.long = Some(name.to_string());
            if placeholder.is_some() {
                def.takes_value = true;
            }
        } else if token.starts_with('-') && token.len() > 1 {
            if def.short.is_some() {
                return Err(GrammarError::new(format!(
                    "option declares two short forms: {line}"
                )));
            }
            def.short = Some(token.to_string());
        } else if is_placeholder(token) {
            def.takes_value = true;
        } else {
            return Err(GrammarError::new(format!(
                "unexpected token '{token}' in option declaration: {line}"
            )));
        }
    }

    if def.short.is_none() && def.long.is_none() {
        return Err(GrammarError::new(format!(
            "option declaration names no flag: {line}"
        )));
    }

    // docopt convention: `[default: X]` in the help text.
    if let Some(start) = help.find("[default:") {
        let rest = &help[start + "[default:".len()..];
        if let Some(end) = rest.find(']') {
            def.default_value = Some(rest[..end].trim().to_string());
            def.takes_value = true;
        }
    }

    Ok(def)
}

/// A value placeholder: `<word>` or an UPPERCASE word like `PATH`.
fn is_placeholder(token: &str) -> bool {
    if token.starts_with('<') && token.ends_with('>') && token.len() > 2 {
        return true;
    }
    !token.is_empty()
        && token.chars().any(|c| c.is_ascii_uppercase())
        && token
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-' || c == '_')
}

/// Parse one usage pattern line. Flags named in the pattern but absent from
/// the `Options:` section are declared implicitly as booleans.
fn parse_pattern(line: &str, options: &mut Vec<OptDef>) -> Result<Pattern, GrammarError> {
    let mut slots: Vec<Slot> = Vec::new();
    let mut required_flags = Vec::new();
    let mut optional_flags = Vec::new();
    let mut allow_extra = false;

    let mut tokens = line.split_whitespace();
    // First token is the program name.
    tokens.next();

    let mut prev_value_flag = false;
    for token in tokens {
        if token == "[options]" {
            allow_extra = true;
            prev_value_flag = false;
            continue;
        }

        let (inner, optional) = if token.starts_with('[') && token.ends_with(']') {
            (&token[1..token.len() - 1], true)
        } else if token.starts_with('[') || token.ends_with(']') {
            return Err(GrammarError::new(format!(
                "unsupported usage grouping: {token}"
            )));
        } else {
            (token, false)
        };
        let (inner, repeating) = match inner.strip_suffix("...") {
            Some(inner) => (inner, true),
            None => (inner, false),
        };

        if inner.starts_with('-') && inner.len() > 1 {
            let name = inner.split_once('=').map(|(n, _)| n).unwrap_or(inner);
            let (key, takes_value) = declare_pattern_flag(options, name);
            if optional {
                push_unique(&mut optional_flags, &key);
            } else {
                push_unique(&mut required_flags, &key);
            }
            prev_value_flag = takes_value;
            continue;
        }

        if inner.starts_with('<') && inner.ends_with('>') && inner.len() > 2 {
            slots.push(Slot {
                name: inner.to_string(),
                required: !optional,
                repeating,
            });
            prev_value_flag = false;
            continue;
        }

        if is_placeholder(inner) && prev_value_flag {
            // Value placeholder spelled out after a literal flag, e.g.
            // `vex -l PREFIX`. Arity already comes from the options section.
            prev_value_flag = false;
            continue;
        }

        return Err(GrammarError::new(format!("unsupported usage token: {token}")));
    }

    // A repeating slot absorbs the remainder, so nothing may follow it.
    if slots.iter().rev().skip(1).any(|s| s.repeating) {
        return Err(GrammarError::new(format!(
            "repeating positional must come last: {line}"
        )));
    }

    Ok(Pattern {
        slots,
        required_flags,
        optional_flags,
        allow_extra,
    })
}

fn declare_pattern_flag(options: &mut Vec<OptDef>, name: &str) -> (String, bool) {
    let is_long = name.starts_with("--");
    if let Some(def) = options.iter().find(|d| {
        if is_long {
            d.long.as_deref() == Some(name)
        } else {
            d.short.as_deref() == Some(name)
        }
    }) {
        return (def.key().to_string(), def.takes_value);
    }

    options.push(OptDef {
        short: (!is_long).then(|| name.to_string()),
        long: is_long.then(|| name.to_string()),
        takes_value: false,
        default_value: None,
    });
    (name.to_string(), false)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRAMMAR: &str = "\
Tracks pending work items

Usage: todo [options] <item> [<tag>...]
       todo [options] --list
       todo [options] --version

Options:
       --always-copy    Copy instead of linking
       --color WHEN     Colorize output [default: auto]
    -l --list           List known items
    -o --output PATH    Write report to PATH
    -q --quiet          Suppress output
    -V --version        Display version
";

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    fn grammar() -> Grammar {
        Grammar::parse(GRAMMAR).expect("grammar should compile")
    }

    #[test]
    fn every_grammar_key_is_present_with_defaults() {
        let m = grammar().parse_argv(&argv(&["fix the roof"])).unwrap();
        assert_eq!(m.get("--always-copy"), Some(&RawValue::Switch(false)));
        assert_eq!(
            m.get("--color"),
            Some(&RawValue::Str(Some("auto".to_string())))
        );
        assert_eq!(m.get("--list"), Some(&RawValue::Switch(false)));
        assert_eq!(m.get("--output"), Some(&RawValue::Str(None)));
        assert_eq!(
            m.get("<item>"),
            Some(&RawValue::Str(Some("fix the roof".to_string())))
        );
        assert_eq!(m.get("<tag>"), Some(&RawValue::List(Vec::new())));
    }

    #[test]
    fn long_flags_take_separate_or_attached_values() {
        let g = grammar();
        let m = g
            .parse_argv(&argv(&["item", "--output", "out.txt"]))
            .unwrap();
        assert_eq!(
            m.get("--output"),
            Some(&RawValue::Str(Some("out.txt".to_string())))
        );

        let m = g.parse_argv(&argv(&["item", "--output=out.txt"])).unwrap();
        assert_eq!(
            m.get("--output"),
            Some(&RawValue::Str(Some("out.txt".to_string())))
        );
    }

    #[test]
    fn repeated_flag_keeps_last_value() {
        let m = grammar()
            .parse_argv(&argv(&["item", "-o", "a.txt", "--output", "b.txt"]))
            .unwrap();
        assert_eq!(
            m.get("--output"),
            Some(&RawValue::Str(Some("b.txt".to_string())))
        );
    }

    #[test]
    fn stacked_shorts_and_attached_value() {
        let m = grammar().parse_argv(&argv(&["item", "-qoout.txt"])).unwrap();
        assert_eq!(m.get("--quiet"), Some(&RawValue::Switch(true)));
        assert_eq!(
            m.get("--output"),
            Some(&RawValue::Str(Some("out.txt".to_string())))
        );
    }

    #[test]
    fn unambiguous_long_prefix_resolves() {
        let m = grammar().parse_argv(&argv(&["item", "--qui"])).unwrap();
        assert_eq!(m.get("--quiet"), Some(&RawValue::Switch(true)));
    }

    #[test]
    fn ambiguous_long_prefix_is_a_usage_error() {
        let g = Grammar::parse(
            "Usage: p [options]\n\nOptions:\n       --verbose  a\n       --version  b\n",
        )
        .unwrap();
        let err = g.parse_argv(&argv(&["--ver"])).unwrap_err();
        assert!(err.message().contains("ambiguous flag --ver"));
        let m = g.parse_argv(&argv(&["--verb"])).unwrap();
        assert_eq!(m.get("--verbose"), Some(&RawValue::Switch(true)));
    }

    #[test]
    fn separator_forces_positional_interpretation() {
        let m = grammar()
            .parse_argv(&argv(&["--", "--quiet", "t1"]))
            .unwrap();
        assert_eq!(m.get("--quiet"), Some(&RawValue::Switch(false)));
        assert_eq!(
            m.get("<item>"),
            Some(&RawValue::Str(Some("--quiet".to_string())))
        );
        assert_eq!(
            m.get("<tag>"),
            Some(&RawValue::List(vec!["t1".to_string()]))
        );
    }

    #[test]
    fn repeating_slot_absorbs_remaining_positionals() {
        let m = grammar()
            .parse_argv(&argv(&["item", "home", "urgent"]))
            .unwrap();
        assert_eq!(
            m.get("<tag>"),
            Some(&RawValue::List(vec![
                "home".to_string(),
                "urgent".to_string()
            ]))
        );
    }

    #[test]
    fn alternative_pattern_waives_required_positional() {
        let m = grammar().parse_argv(&argv(&["--list"])).unwrap();
        assert_eq!(m.get("--list"), Some(&RawValue::Switch(true)));
        assert_eq!(m.get("<item>"), Some(&RawValue::Str(None)));
    }

    #[test]
    fn empty_argv_matches_no_pattern() {
        let err = grammar().parse_argv(&argv(&[])).unwrap_err();
        assert!(err.message().contains("do not match"));
        assert!(err.usage().starts_with("Usage:"));
    }

    #[test]
    fn unknown_flag_is_a_usage_error() {
        let err = grammar()
            .parse_argv(&argv(&["item", "--bogus"]))
            .unwrap_err();
        assert!(err.message().contains("unknown flag: --bogus"));
    }

    #[test]
    fn missing_value_is_a_usage_error() {
        let err = grammar()
            .parse_argv(&argv(&["item", "--output"]))
            .unwrap_err();
        assert!(err.message().contains("missing value for --output"));
    }

    #[test]
    fn boolean_flag_rejects_attached_value() {
        let err = grammar()
            .parse_argv(&argv(&["item", "--quiet=yes"]))
            .unwrap_err();
        assert!(err.message().contains("does not take a value"));
    }

    #[test]
    fn usage_error_display_carries_usage_text() {
        let err = grammar().parse_argv(&argv(&[])).unwrap_err();
        let rendered = err.to_string();
        assert!(rendered.contains("Usage: todo [options] <item> [<tag>...]"));
    }

    #[test]
    fn grammar_without_usage_section_is_rejected() {
        let err = Grammar::parse("Options:\n    -q --quiet  Hush\n").unwrap_err();
        assert!(err.message().contains("no usage section"));
    }

    #[test]
    fn duplicate_declaration_is_rejected() {
        let err = Grammar::parse(
            "Usage: p [options]\n\nOptions:\n    -q --quiet  a\n    -q --silent  b\n",
        )
        .unwrap_err();
        assert!(err.message().contains("duplicate flag declaration"));
    }

    #[test]
    fn short_only_flag_is_keyed_by_its_short_token() {
        let g = Grammar::parse(
            "Usage: p [options] <x>\n\nOptions:\n    -n COUNT  Repeat count\n",
        )
        .unwrap();
        let m = g.parse_argv(&argv(&["-n", "3", "val"])).unwrap();
        assert_eq!(m.get("-n"), Some(&RawValue::Str(Some("3".to_string()))));
        assert_eq!(m.get("<x>"), Some(&RawValue::Str(Some("val".to_string()))));
    }
}
