//! Spending advice from a text-generation service
//!
//! The advisor receives the selected period's budget, spending and
//! consolidated groups, and always resolves to some text: either the model's
//! tip or a fixed localized fallback.

mod gemini;
mod prompt;

pub use gemini::GeminiAdvisor;
pub use prompt::{build_prompt, keep_tracking_message, stay_focused_message, TOP_GROUPS};

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::{AdvisorySettings, Locale};
use crate::models::Money;
use crate::services::ConsolidatedGroup;

/// Spending summary sent to an advisor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisoryRequest {
    pub budget: Money,
    pub spent: Money,
    /// Consolidated groups, largest total first
    pub groups: Vec<ConsolidatedGroup>,
}

impl AdvisoryRequest {
    pub fn new(budget: Money, spent: Money, groups: Vec<ConsolidatedGroup>) -> Self {
        Self {
            budget,
            spent,
            groups,
        }
    }

    pub fn remaining(&self) -> Money {
        self.budget - self.spent
    }

    /// The groups included in a prompt
    pub fn top_groups(&self) -> &[ConsolidatedGroup] {
        &self.groups[..self.groups.len().min(TOP_GROUPS)]
    }
}

/// Something that turns a spending summary into a short tip.
///
/// Implementations never fail; errors resolve to a fallback message.
#[async_trait]
pub trait Advisor: Send + Sync {
    async fn advise(&self, request: &AdvisoryRequest) -> String;
}

/// Advisor used when no API key is configured
#[derive(Debug, Clone, Copy)]
pub struct OfflineAdvisor {
    locale: Locale,
}

impl OfflineAdvisor {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }
}

#[async_trait]
impl Advisor for OfflineAdvisor {
    async fn advise(&self, _request: &AdvisoryRequest) -> String {
        debug!("No advisory API key configured");
        stay_focused_message(self.locale).to_string()
    }
}

/// Pick the advisor for the current configuration
pub fn advisor_from_settings(settings: &AdvisorySettings, locale: Locale) -> Box<dyn Advisor> {
    let Some(api_key) = settings.api_key() else {
        return Box::new(OfflineAdvisor::new(locale));
    };

    match GeminiAdvisor::new(settings, api_key, locale) {
        Ok(advisor) => Box::new(advisor),
        Err(e) => {
            warn!(error = %e, "Could not build advisory client");
            Box::new(OfflineAdvisor::new(locale))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(description: &str, cents: i64) -> ConsolidatedGroup {
        ConsolidatedGroup {
            description: description.to_string(),
            total: Money::from_cents(cents),
            count: 1,
        }
    }

    #[test]
    fn test_top_groups_caps_at_five() {
        let groups = (1..=7).map(|i| group(&format!("g{}", i), 100 * i)).collect();
        let request = AdvisoryRequest::new(Money::from_cents(10000), Money::from_cents(2800), groups);
        assert_eq!(request.top_groups().len(), 5);
        assert_eq!(request.remaining(), Money::from_cents(7200));
    }

    #[test]
    fn test_top_groups_with_fewer_groups() {
        let request = AdvisoryRequest::new(Money::zero(), Money::from_cents(100), vec![group("Uber", 100)]);
        assert_eq!(request.top_groups().len(), 1);
    }

    #[tokio::test]
    async fn test_offline_advisor_returns_fallback() {
        let advisor = OfflineAdvisor::new(Locale::PtBr);
        let request = AdvisoryRequest::new(Money::from_cents(100000), Money::from_cents(500), vec![]);
        assert_eq!(
            advisor.advise(&request).await,
            "Mantenha o foco nos seus objetivos financeiros!"
        );
    }

    #[test]
    fn test_missing_key_selects_offline_advisor() {
        let settings = AdvisorySettings {
            api_key_env: "MONEYFLOW_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..AdvisorySettings::default()
        };
        let advisor = advisor_from_settings(&settings, Locale::EnUs);
        let request = AdvisoryRequest::new(Money::zero(), Money::from_cents(100), vec![]);
        let runtime = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        assert_eq!(
            runtime.block_on(advisor.advise(&request)),
            "Stay focused on your financial goals!"
        );
    }
}
