//! Single-retry fallback across two language providers.
//!
//! Wraps a primary and a secondary implementation: every call tries the
//! primary, and on any primary failure retries exactly once against the
//! secondary. This is a one-shot failover to a different implementation,
//! not a retry loop; a secondary failure is the caller's error.

use async_trait::async_trait;
use log::*;
use notes_ai::traits::language;
use notes_ai::traits::language::Provider as _;
use notes_ai::Error;
use std::sync::Arc;

pub struct FallbackProvider {
    primary: Arc<dyn language::Provider>,
    secondary: Arc<dyn language::Provider>,
}

impl FallbackProvider {
    pub fn new(primary: Arc<dyn language::Provider>, secondary: Arc<dyn language::Provider>) -> Self {
        Self { primary, secondary }
    }
}

#[async_trait]
impl language::Provider for FallbackProvider {
    async fn translate(
        &self,
        content: &str,
        target_language: &str,
        source_language: Option<&str>,
    ) -> Result<String, Error> {
        match self
            .primary
            .translate(content, target_language, source_language)
            .await
        {
            Ok(translated) => Ok(translated),
            Err(err) => {
                warn!(
                    "Primary provider {} failed to translate; retrying once against {}: {err}",
                    self.primary.provider_id(),
                    self.secondary.provider_id()
                );
                self.secondary
                    .translate(content, target_language, source_language)
                    .await
            }
        }
    }

    async fn detect_language(&self, content: &str) -> Result<String, Error> {
        match self.primary.detect_language(content).await {
            Ok(code) => Ok(code),
            Err(err) => {
                warn!(
                    "Primary provider {} failed to detect language; retrying once against {}: {err}",
                    self.primary.provider_id(),
                    self.secondary.provider_id()
                );
                self.secondary.detect_language(content).await
            }
        }
    }

    fn provider_id(&self) -> &str {
        "fallback"
    }

    async fn verify_credentials(&self) -> Result<bool, Error> {
        match self.primary.verify_credentials().await {
            Ok(true) => Ok(true),
            _ => self.secondary.verify_credentials().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notes_ai::traits::language::Provider as _;

    mockall::mock! {
        LanguageProvider {}

        #[async_trait]
        impl language::Provider for LanguageProvider {
            #[mockall::concretize]
            async fn translate(
                &self,
                content: &str,
                target_language: &str,
                source_language: Option<&str>,
            ) -> Result<String, Error>;
            async fn detect_language(&self, content: &str) -> Result<String, Error>;
            fn provider_id(&self) -> &str;
            async fn verify_credentials(&self) -> Result<bool, Error>;
        }
    }

    #[tokio::test]
    async fn primary_success_never_touches_the_secondary() {
        let mut primary = MockLanguageProvider::new();
        primary
            .expect_translate()
            .times(1)
            .returning(|_, _, _| Ok("Hola".to_string()));

        // No expectations on the secondary: any call panics the test.
        let secondary = MockLanguageProvider::new();

        let provider = FallbackProvider::new(Arc::new(primary), Arc::new(secondary));
        let translated = provider.translate("Hello", "Spanish", None).await.unwrap();

        assert_eq!(translated, "Hola");
    }

    #[tokio::test]
    async fn primary_failure_retries_exactly_once_against_the_secondary() {
        let mut primary = MockLanguageProvider::new();
        primary
            .expect_translate()
            .times(1)
            .returning(|_, _, _| Err(Error::Network("connection refused".to_string())));
        primary.expect_provider_id().return_const("ollama".to_string());

        let mut secondary = MockLanguageProvider::new();
        secondary
            .expect_translate()
            .times(1)
            .returning(|_, _, _| Ok("Hola".to_string()));
        secondary
            .expect_provider_id()
            .return_const("openai".to_string());

        let provider = FallbackProvider::new(Arc::new(primary), Arc::new(secondary));
        let translated = provider.translate("Hello", "Spanish", None).await.unwrap();

        assert_eq!(translated, "Hola");
    }

    #[tokio::test]
    async fn secondary_failure_is_surfaced_to_the_caller() {
        let mut primary = MockLanguageProvider::new();
        primary
            .expect_detect_language()
            .times(1)
            .returning(|_| Err(Error::Network("connection refused".to_string())));
        primary.expect_provider_id().return_const("ollama".to_string());

        let mut secondary = MockLanguageProvider::new();
        secondary
            .expect_detect_language()
            .times(1)
            .returning(|_| Err(Error::Provider("quota exhausted".to_string())));
        secondary
            .expect_provider_id()
            .return_const("openai".to_string());

        let provider = FallbackProvider::new(Arc::new(primary), Arc::new(secondary));
        let err = provider.detect_language("Hello").await.unwrap_err();

        assert!(matches!(err, Error::Provider(text) if text.contains("quota")));
    }
}
