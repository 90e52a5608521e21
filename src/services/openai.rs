//! OpenAI Roast Generator
//!
//! Production `RoastGenerator` implementation over the chat-completions API
//! in JSON mode. Builds the prompt from the fetched signals, asks for a
//! fixed JSON shape, and validates the parsed result before caching.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::error::{ApiError, Result};
use crate::models::{GithubSignals, Intensity, RoastResult};
use crate::services::RoastGenerator;

const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

const SYSTEM_PROMPT: &str = "You are a helpful assistant that analyzes GitHub profiles and \
provides roasts, advice, and personality insights. Always respond with valid JSON only.";

// == Wire Types ==

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

// == Client ==
pub struct OpenAiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(http: reqwest::Client, api_key: String, model: String) -> Self {
        Self {
            http,
            base_url: OPENAI_API_BASE.to_string(),
            api_key,
            model,
        }
    }

    /// Overrides the API base URL (tests against a local stub).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn tone_instruction(intensity: Intensity) -> &'static str {
        match intensity {
            Intensity::Mild => "light-hearted and friendly",
            Intensity::Medium => "playfully critical but constructive",
            Intensity::Spicy => "sharp and witty but still respectful",
        }
    }

    fn build_prompt(signals: &GithubSignals, intensity: Intensity) -> String {
        let repo_list = signals
            .top_repos
            .iter()
            .map(|repo| {
                let mut line = format!(
                    "- {} ({}, {} stars, {} forks, updated {})",
                    repo.name,
                    repo.language.as_deref().unwrap_or("No language"),
                    repo.stars,
                    repo.forks,
                    repo.updated_at
                );
                if let Some(description) = &repo.description {
                    line.push_str(&format!(" - {}", description));
                }
                if let Some(snippet) = &repo.readme_snippet {
                    let excerpt: String = snippet.chars().take(300).collect();
                    line.push_str(&format!("\n  README snippet: {}...", excerpt));
                }
                line
            })
            .collect::<Vec<_>>()
            .join("\n");

        let mut profile_lines = format!(
            "- Public repos: {}\n- Followers: {}\n- Account created: {}",
            signals.profile.public_repos, signals.profile.followers, signals.profile.created_at
        );
        if let Some(bio) = &signals.profile.bio {
            profile_lines.push_str(&format!("\n- Bio: {}", bio));
        }
        if let Some(location) = &signals.profile.location {
            profile_lines.push_str(&format!("\n- Location: {}", location));
        }
        if let Some(company) = &signals.profile.company {
            profile_lines.push_str(&format!("\n- Company: {}", company));
        }

        format!(
            "You are analyzing a GitHub developer profile. Generate a {} roast, serious \
improvement advice, and a developer personality profile.\n\n\
GitHub Profile Data:\n{}\n\n\
Top Repositories:\n{}\n\n\
IMPORTANT CONSTRAINTS:\n\
1. Output MUST be valid JSON only, no markdown formatting, no code blocks.\n\
2. The roast should be tech-focused and avoid guessing personal attributes or doxxing.\n\
3. Advice must reference only observed signals (repos, languages, recency, activity patterns).\n\
4. Keep roast length to 2-4 sentences.\n\
5. Provide 3-7 improvement advice bullets.\n\
6. Personality profile should be based on code patterns, not personal traits.\n\n\
Output format (JSON only):\n\
{{\n\
  \"roast\": \"string\",\n\
  \"advice\": [\"string\", \"string\", ...],\n\
  \"profile\": {{\n\
    \"archetype\": \"string (e.g., 'The Experimentalist', 'The Maintainer', 'The Specialist', etc.)\",\n\
    \"strengths\": [\"string\", \"string\", ...],\n\
    \"blind_spots\": [\"string\", \"string\", ...]\n\
  }}\n\
}}",
            Self::tone_instruction(intensity),
            profile_lines,
            repo_list
        )
    }

    fn parse_result(content: &str) -> Result<RoastResult> {
        let result: RoastResult = serde_json::from_str(content)
            .map_err(|e| ApiError::Generation(format!("returned invalid JSON: {}", e)))?;

        if result.roast.is_empty() {
            return Err(ApiError::Generation("empty roast in response".to_string()));
        }
        if result.advice.is_empty() {
            return Err(ApiError::Generation("no advice in response".to_string()));
        }
        Ok(result)
    }
}

#[async_trait]
impl RoastGenerator for OpenAiClient {
    async fn generate(
        &self,
        signals: &GithubSignals,
        intensity: Intensity,
    ) -> Result<RoastResult> {
        let prompt = Self::build_prompt(signals, intensity);
        debug!(model = %self.model, intensity = intensity.as_str(), "Requesting roast generation");

        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": prompt },
            ],
            "response_format": { "type": "json_object" },
            "temperature": intensity.temperature(),
        });

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Generation(format!("request failed: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ApiError::Generation("rate limit exceeded".to_string()));
        }
        if !status.is_success() {
            return Err(ApiError::Generation(format!(
                "unexpected status {}",
                status
            )));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Generation(format!("malformed completion response: {}", e)))?;

        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or_else(|| ApiError::Generation("empty response".to_string()))?;

        Self::parse_result(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProfileSignals, RepoSignals};

    fn sample_signals() -> GithubSignals {
        GithubSignals {
            profile: ProfileSignals {
                public_repos: 42,
                followers: 7,
                created_at: "2014-03-10T00:00:00Z".to_string(),
                bio: Some("Full-stack enthusiast".to_string()),
                location: None,
                company: Some("@acme".to_string()),
            },
            top_repos: vec![RepoSignals {
                name: "todo-app".to_string(),
                language: Some("JavaScript".to_string()),
                stars: 3,
                forks: 1,
                updated_at: "2021-08-01T00:00:00Z".to_string(),
                description: Some("Yet another todo app".to_string()),
                readme_snippet: Some("# Todo App\nThe best todo app.".to_string()),
            }],
        }
    }

    #[test]
    fn test_build_prompt_includes_signals() {
        let prompt = OpenAiClient::build_prompt(&sample_signals(), Intensity::Medium);

        assert!(prompt.contains("playfully critical but constructive"));
        assert!(prompt.contains("Public repos: 42"));
        assert!(prompt.contains("todo-app (JavaScript, 3 stars, 1 forks"));
        assert!(prompt.contains("Bio: Full-stack enthusiast"));
        assert!(prompt.contains("README snippet: # Todo App"));
        // Absent optional fields stay out of the prompt
        assert!(!prompt.contains("Location:"));
    }

    #[test]
    fn test_tone_instruction_per_intensity() {
        assert_eq!(
            OpenAiClient::tone_instruction(Intensity::Mild),
            "light-hearted and friendly"
        );
        assert_eq!(
            OpenAiClient::tone_instruction(Intensity::Spicy),
            "sharp and witty but still respectful"
        );
    }

    #[test]
    fn test_parse_result_valid() {
        let content = r#"{
            "roast": "Forty-two repos, three stars. Quantity has a quality all its own.",
            "advice": ["Consolidate projects", "Add CI"],
            "profile": {"archetype": "The Experimentalist", "strengths": ["breadth"], "blind_spots": ["depth"]}
        }"#;

        let result = OpenAiClient::parse_result(content).unwrap();
        assert_eq!(result.advice.len(), 2);
    }

    #[test]
    fn test_parse_result_invalid_json() {
        let result = OpenAiClient::parse_result("not json at all");
        assert!(matches!(result, Err(ApiError::Generation(_))));
    }

    #[test]
    fn test_parse_result_missing_fields() {
        // Structurally incomplete output is a generation failure
        let result = OpenAiClient::parse_result(r#"{"roast": "ok"}"#);
        assert!(matches!(result, Err(ApiError::Generation(_))));
    }

    #[test]
    fn test_parse_result_empty_roast() {
        let content = r#"{
            "roast": "",
            "advice": ["x"],
            "profile": {"archetype": "a", "strengths": [], "blind_spots": []}
        }"#;
        assert!(matches!(
            OpenAiClient::parse_result(content),
            Err(ApiError::Generation(_))
        ));
    }
}
