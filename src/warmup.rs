use std::fmt::{self, Display, Formatter};

use tracing::{debug, error, info_span};

type BoxedCheck<T> = Box<dyn Fn(&T) -> Result<(), anyhow::Error> + Send + Sync>;

/// Post-construction checks run against a resolved root value.
///
/// The engine itself never runs these; a caller resolves the root with
/// [`make`](crate::Registry::make) and then decides, based on the report,
/// whether to proceed.
pub struct Warmup<T> {
    checks: Vec<(String, BoxedCheck<T>)>,
}

impl<T> Default for Warmup<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Warmup<T> {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    #[must_use]
    pub fn check(mut self, name: impl Into<String>, check: impl Fn(&T) -> Result<(), anyhow::Error> + Send + Sync + 'static) -> Self {
        self.checks.push((name.into(), Box::new(check)));
        self
    }

    /// Runs every check in registration order. Failures don't short-circuit:
    /// the report carries one outcome per check.
    pub fn run(&self, value: &T) -> WarmupReport {
        let span = info_span!("warmup");
        let _guard = span.enter();

        let mut outcomes = Vec::with_capacity(self.checks.len());
        for (name, check) in &self.checks {
            let result = check(value);
            match &result {
                Ok(()) => debug!(check = %name, "Passed"),
                Err(err) => error!(check = %name, "{}", err),
            }
            outcomes.push(WarmupOutcome {
                name: name.clone(),
                result,
            });
        }

        WarmupReport { outcomes }
    }
}

pub struct WarmupOutcome {
    pub name: String,
    pub result: Result<(), anyhow::Error>,
}

pub struct WarmupReport {
    outcomes: Vec<WarmupOutcome>,
}

impl WarmupReport {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.outcomes.iter().all(|outcome| outcome.result.is_ok())
    }

    #[must_use]
    pub fn outcomes(&self) -> &[WarmupOutcome] {
        &self.outcomes
    }

    pub fn failures(&self) -> impl Iterator<Item = &WarmupOutcome> {
        self.outcomes.iter().filter(|outcome| outcome.result.is_err())
    }
}

impl Display for WarmupReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let failed = self.failures().count();
        write!(f, "{} passed, {} failed", self.outcomes.len() - failed, failed)
    }
}
