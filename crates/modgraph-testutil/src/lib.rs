//! Test utilities for modgraph.
//!
//! Provides parsers and runners for the test file formats used in the project:
//! - `tests/extract/*.test`: source snippets with their expected outline
//! - `tests/fixtures/*.fixture`: multi-file source trees written to disk
//!
//! Nothing here depends on the kernel; runners take the code under test as
//! a closure so the kernel can use this crate from its own tests.

pub mod cases;
pub mod fixtures;

use std::fmt;

/// The result of running a single test case.
#[derive(Debug, Clone)]
pub enum TestResult {
    /// Test passed.
    Pass,
    /// Test failed with expected vs actual mismatch.
    Fail { expected: String, actual: String },
    /// Error running the test.
    Error { message: String },
}

/// Summary of running multiple test cases.
#[derive(Debug, Default)]
pub struct TestSummary {
    pub passed: usize,
    pub failed: usize,
    pub errors: usize,
    pub failures: Vec<TestFailure>,
}

/// A single test failure with context.
#[derive(Debug, Clone)]
pub struct TestFailure {
    pub name: String,
    pub line: usize,
    pub result: TestResult,
}

impl TestSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, name: impl Into<String>, line: usize, result: TestResult) {
        match &result {
            TestResult::Pass => {
                self.passed += 1;
                return;
            }
            TestResult::Fail { .. } => self.failed += 1,
            TestResult::Error { .. } => self.errors += 1,
        }
        self.failures.push(TestFailure {
            name: name.into(),
            line,
            result,
        });
    }

    pub fn total(&self) -> usize {
        self.passed + self.failed + self.errors
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.errors == 0
    }
}

impl fmt::Display for TestSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n{}", "═".repeat(60))?;
        writeln!(f, "Test Summary: {} total", self.total())?;
        writeln!(
            f,
            "  ✓ {} passed  ✗ {} failed  ⚠ {} errors",
            self.passed, self.failed, self.errors
        )?;

        if !self.failures.is_empty() {
            writeln!(f, "\nFailures:")?;
            for failure in &self.failures {
                writeln!(f, "\n  {} (line {})", failure.name, failure.line)?;
                match &failure.result {
                    TestResult::Fail { expected, actual } => {
                        writeln!(f, "    expected: {}", expected)?;
                        writeln!(f, "    actual:   {}", actual)?;
                    }
                    TestResult::Error { message } => {
                        writeln!(f, "    error: {}", message)?;
                    }
                    TestResult::Pass => {}
                }
            }
        }
        writeln!(f, "{}", "═".repeat(60))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts_and_keeps_failures() {
        let mut summary = TestSummary::new();
        summary.record("a", 1, TestResult::Pass);
        summary.record(
            "b",
            5,
            TestResult::Fail {
                expected: "x".into(),
                actual: "y".into(),
            },
        );
        summary.record("c", 9, TestResult::Error { message: "boom".into() });

        assert_eq!(summary.total(), 3);
        assert!(!summary.all_passed());
        assert_eq!(summary.failures.len(), 2);
        let rendered = summary.to_string();
        assert!(rendered.contains("b (line 5)"));
        assert!(rendered.contains("error: boom"));
    }
}
