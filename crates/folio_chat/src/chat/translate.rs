//! 回答翻译
//!
//! 复用补全服务做翻译。翻译失败不致命：直接返回原文，
//! 请求整体照常成功。

use anyhow::Result;
use futures::future::join_all;
use tracing::warn;

use super::language::LanguageCode;
use super::provider::CompletionProvider;

const TRANSLATE_SYSTEM_PROMPT: &str =
    "You are a translator. Translate the user's text faithfully. \
     Output only the translated text, with no explanation and no quotes.";

/// 翻译单段文本，目标是英文或翻译失败时返回原文
pub async fn translate_answer(provider: &dyn CompletionProvider, text: &str, lang: LanguageCode) -> String {
    if lang == LanguageCode::En || text.trim().is_empty() {
        return text.to_string();
    }

    match translate_one(provider, text, lang).await {
        Ok(translated) => translated,
        Err(e) => {
            warn!("翻译失败，返回原文: {}", e);
            text.to_string()
        }
    }
}

/// 并发翻译多段互相独立的文本，全部成功才返回 Ok
///
/// 任一段失败则整批失败，由调用方决定回退（通常是保留原文）
pub async fn translate_many(
    provider: &dyn CompletionProvider,
    texts: &[String],
    lang: LanguageCode,
) -> Result<Vec<String>> {
    if lang == LanguageCode::En {
        return Ok(texts.to_vec());
    }

    let futures = texts.iter().map(|text| translate_one(provider, text, lang));
    join_all(futures).await.into_iter().collect()
}

async fn translate_one(provider: &dyn CompletionProvider, text: &str, lang: LanguageCode) -> Result<String> {
    let instruction = format!("Translate the following text into {}:\n\n{}", lang.english_name(), text);
    provider.complete(TRANSLATE_SYSTEM_PROMPT, &instruction).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use async_trait::async_trait;

    /// 把输入前面加上目标语言标记的桩翻译器
    struct EchoProvider;

    #[async_trait]
    impl CompletionProvider for EchoProvider {
        async fn complete(&self, _system_prompt: &str, question: &str) -> Result<String> {
            Ok(format!("[translated] {}", question))
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl CompletionProvider for FailingProvider {
        async fn complete(&self, _system_prompt: &str, _question: &str) -> Result<String> {
            Err(anyhow!("upstream down"))
        }
    }

    #[tokio::test]
    async fn test_english_target_skips_translation() {
        let answer = translate_answer(&EchoProvider, "hello", LanguageCode::En).await;
        assert_eq!(answer, "hello");
    }

    #[tokio::test]
    async fn test_translation_failure_returns_original() {
        let answer = translate_answer(&FailingProvider, "hello", LanguageCode::Ko).await;
        assert_eq!(answer, "hello");
    }

    #[tokio::test]
    async fn test_translate_answer_goes_through_provider() {
        let answer = translate_answer(&EchoProvider, "hello", LanguageCode::Ja).await;
        assert!(answer.contains("hello"));
        assert!(answer.starts_with("[translated]"));
    }

    #[tokio::test]
    async fn test_translate_many_preserves_order() {
        let texts = vec!["one".to_string(), "two".to_string()];
        let translated = translate_many(&EchoProvider, &texts, LanguageCode::Ko).await.unwrap();
        assert_eq!(translated.len(), 2);
        assert!(translated[0].contains("one"));
        assert!(translated[1].contains("two"));
    }

    #[tokio::test]
    async fn test_translate_many_fails_as_batch() {
        let texts = vec!["one".to_string(), "two".to_string()];
        assert!(translate_many(&FailingProvider, &texts, LanguageCode::Ko).await.is_err());
    }
}
