//! Test harness for running scalar cases with stochastic variations

use crate::common::{Gen, ScalarCase};
use yscalar_core::{scalar, Error, Scalar, ScalarStyle, Value};

/// Result of running a case
#[derive(Debug)]
pub struct CaseResult {
    pub passed: bool,
    pub input: Vec<u8>,
    pub expected: Vec<String>,
    pub actual: Vec<String>,
    pub seed: u64,
}

impl CaseResult {
    pub fn print_failure(&self, name: &str) {
        eprintln!("FAILED: {}", name);
        eprintln!("  input:    {:?}", String::from_utf8_lossy(&self.input));
        eprintln!("  expected: {:?}", self.expected);
        eprintln!("  actual:   {:?}", self.actual);
        if self.seed != 0 {
            eprintln!("  replay:   YSCALAR_TEST_SEED={}", self.seed);
        }
    }
}

fn style(name: Option<&str>) -> ScalarStyle {
    match name {
        None | Some("plain") => ScalarStyle::Plain,
        Some("single") => ScalarStyle::SingleQuoted,
        Some("double") => ScalarStyle::DoubleQuoted,
        Some("literal") => ScalarStyle::Literal,
        Some("folded") => ScalarStyle::Folded,
        Some("any") => ScalarStyle::Any,
        Some(other) => panic!("unknown style {:?}", other),
    }
}

fn error_name(err: &Error) -> &'static str {
    match err {
        Error::InvalidValue => "invalid",
        Error::Range => "range",
        Error::MalformedEncoding => "malformed",
        Error::Unsupported => "unsupported",
        Error::UnderlyingFailure(_) => "underlying",
    }
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn describe<T>(result: Result<T, Error>, ok: impl FnOnce(T) -> Vec<String>) -> Vec<String> {
    match result {
        Ok(value) => ok(value),
        Err(err) => vec!["error".into(), error_name(&err).into()],
    }
}

fn describe_value(value: Value<'_>) -> Vec<String> {
    match value {
        Value::Null => vec!["null".into()],
        Value::Bool(b) => vec!["bool".into(), b.to_string()],
        Value::Integer(i) => vec!["int".into(), i.to_string()],
        Value::UnsignedInteger(u) => vec!["uint".into(), u.to_string()],
        Value::String(s) => vec!["str".into(), text(s)],
        Value::Binary(data) => vec!["binary".into(), text(&data)],
    }
}

/// Apply the case's parse to a scalar and describe the outcome
fn evaluate(case: &ScalarCase, scalar: &Scalar<'_>) -> Vec<String> {
    match case.parse.as_deref() {
        None => describe(Value::resolve(scalar), describe_value),
        Some("null") => describe(scalar::parse_null(scalar), |()| vec!["null".into()]),
        Some("bool") => describe(scalar::parse_boolean(scalar), |b| {
            vec!["bool".into(), b.to_string()]
        }),
        Some("int") => describe(scalar::parse_integer(scalar), |i| {
            vec!["int".into(), i.to_string()]
        }),
        Some("uint") => describe(scalar::parse_unsigned_integer(scalar), |u| {
            vec!["uint".into(), u.to_string()]
        }),
        Some("str") => describe(scalar::parse_string(scalar), |s| vec!["str".into(), text(s)]),
        Some("binary") => describe(scalar::parse_binary(scalar), |data| {
            vec!["binary".into(), text(&data)]
        }),
        Some(other) => panic!("unknown parse {:?}", other),
    }
}

fn run_input(case: &ScalarCase, input: Vec<u8>, seed: u64) -> CaseResult {
    let actual = {
        let mut scalar = Scalar::styled(input.as_slice(), style(case.style.as_deref()));
        if let Some(tag) = &case.tag {
            scalar = scalar.with_tag(tag.as_str());
        }
        evaluate(case, &scalar)
    };
    CaseResult {
        passed: actual == case.expect,
        expected: case.expect.clone(),
        actual,
        input,
        seed,
    }
}

/// Run a single case (canonical, no variations)
pub fn run_case(case: &ScalarCase) -> CaseResult {
    run_input(case, case.value.as_bytes().to_vec(), 0)
}

/// Run a case with stochastic variations
///
/// Binary payloads get whitespace injected around every symbol, which must
/// not change the decoded bytes. Other cases run canonically.
pub fn run_with_variations(case: &ScalarCase, gen: &mut Gen) -> CaseResult {
    if case.parse.as_deref() != Some("binary") {
        return run_case(case);
    }
    let input = gen.inject_spaces(case.value.as_bytes());
    run_input(case, input, gen.seed)
}
