//! Outline test file parser and runner.
//!
//! Parses the `tests/extract/*.test` format:
//!
//! ```text
//! # test: default_import
//! # expect: ok
//! ---
//! import foo from "foo";
//! ---
//! import default from foo
//! ===
//! ```
//!
//! `# expect: error` cases hold a substring of the expected error message.

use crate::{TestResult, TestSummary};

/// A single outline test case.
#[derive(Debug, Clone)]
pub struct OutlineTestCase {
    /// Test name from the `# test: name` line.
    pub name: String,
    /// Line number where the test starts (1-indexed).
    pub line_number: usize,
    /// The input source code.
    pub input: String,
    /// What we expect from extraction.
    pub expected: Expectation,
}

/// What we expect from an input.
#[derive(Debug, Clone, PartialEq)]
pub enum Expectation {
    /// Expected rendering, compared line by line after trimming.
    Ok(String),
    /// Expected substring of the error message.
    Error(String),
}

/// Parse the *.test file format into test cases.
pub fn parse_outline_tests(content: &str) -> Vec<OutlineTestCase> {
    let mut cases = Vec::new();
    let lines: Vec<&str> = content.lines().collect();
    let mut i = 0;

    while i < lines.len() {
        let Some(name) = lines[i].trim().strip_prefix("# test:") else {
            i += 1;
            continue;
        };
        let name = name.trim().to_string();
        let start_line = i + 1;
        i += 1;

        // Optional expect line: # expect: ok | error
        let mut expect_ok = true;
        if let Some(expect) = lines.get(i).and_then(|l| l.trim().strip_prefix("# expect:")) {
            expect_ok = expect.trim() == "ok";
            i += 1;
        }

        // Skip to first ---
        while i < lines.len() && lines[i].trim() != "---" {
            i += 1;
        }
        i += 1;

        // Collect input until next ---
        let mut input_lines = Vec::new();
        while i < lines.len() && lines[i].trim() != "---" {
            input_lines.push(lines[i]);
            i += 1;
        }
        i += 1;

        // Collect expected until ===
        let mut expected_lines = Vec::new();
        while i < lines.len() && lines[i].trim() != "===" {
            expected_lines.push(lines[i]);
            i += 1;
        }
        i += 1;

        let expected_str = expected_lines.join("\n").trim().to_string();
        cases.push(OutlineTestCase {
            name,
            line_number: start_line,
            input: input_lines.join("\n"),
            expected: if expect_ok {
                Expectation::Ok(expected_str)
            } else {
                Expectation::Error(expected_str)
            },
        });
    }

    cases
}

impl OutlineTestCase {
    /// Run this case through `render`, which returns the outline text or an
    /// error message.
    pub fn run<F>(&self, render: F) -> TestResult
    where
        F: Fn(&str) -> Result<String, String>,
    {
        match (render(&self.input), &self.expected) {
            (Ok(actual), Expectation::Ok(expected)) => {
                if normalize(&actual) == normalize(expected) {
                    TestResult::Pass
                } else {
                    TestResult::Fail {
                        expected: expected.clone(),
                        actual,
                    }
                }
            }
            (Ok(actual), Expectation::Error(expected)) => TestResult::Fail {
                expected: format!("error containing {expected:?}"),
                actual,
            },
            (Err(message), Expectation::Error(expected)) => {
                if message.contains(expected.as_str()) {
                    TestResult::Pass
                } else {
                    TestResult::Fail {
                        expected: format!("error containing {expected:?}"),
                        actual: message,
                    }
                }
            }
            (Err(message), Expectation::Ok(_)) => TestResult::Error { message },
        }
    }
}

/// Run all cases and collect a summary.
pub fn run_outline_tests<F>(cases: &[OutlineTestCase], render: F) -> TestSummary
where
    F: Fn(&str) -> Result<String, String>,
{
    let mut summary = TestSummary::new();
    for case in cases {
        summary.record(&case.name, case.line_number, case.run(&render));
    }
    summary
}

fn normalize(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}
