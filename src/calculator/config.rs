use crate::{Calculator, Error, ProjectRef, RepoSource};

/// Configuration for the version calculation.
///
/// Built with consuming setters and applied with
/// [`build_calculator`](CalculatorConfig::build_calculator).
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct CalculatorConfig {
    /// Literal prefix identifying version tags [default: "v"]
    pub(crate) prefix: String,
    /// Skip test projects [default: true]
    pub(crate) skip_tests: bool,
    /// Skip projects that do not produce a package [default: true]
    pub(crate) skip_non_packable: bool,
    /// Optional: override all calculation with this version
    pub(crate) force_version: Option<String>,
    /// Append base and branch detail to the rationale [default: false]
    pub(crate) debug: bool,
    /// Append tag and diff detail to the rationale [default: false]
    pub(crate) extra_debug: bool,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        CalculatorConfig {
            prefix: String::from("v"),
            skip_tests: true,
            skip_non_packable: true,
            force_version: None,
            debug: false,
            extra_debug: false,
        }
    }
}

impl CalculatorConfig {
    /// Create a configuration with the default settings.
    pub fn new() -> CalculatorConfig {
        CalculatorConfig::default()
    }

    /// Set the tag prefix.
    pub fn set_prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.to_string();
        self
    }

    /// Set whether test projects short-circuit to a skipped decision.
    pub fn set_skip_tests(mut self, skip: bool) -> Self {
        self.skip_tests = skip;
        self
    }

    /// Set whether non-packable projects short-circuit to a skipped decision.
    pub fn set_skip_non_packable(mut self, skip: bool) -> Self {
        self.skip_non_packable = skip;
        self
    }

    /// Force the output version, bypassing all calculation.
    pub fn set_force_version(mut self, version: &str) -> Self {
        self.force_version = Some(version.to_string());
        self
    }

    /// Enable verbose rationale text. Never alters the decision.
    pub fn set_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Enable very verbose rationale text. Never alters the decision.
    pub fn set_extra_debug(mut self, extra_debug: bool) -> Self {
        self.extra_debug = extra_debug;
        self
    }

    /// Apply the config and calculate the version for `project`.
    pub fn build_calculator(
        self,
        repo: &dyn RepoSource,
        project: &ProjectRef,
    ) -> Result<Calculator, Error> {
        Calculator::init(self, repo, project)
    }
}
