use async_trait::async_trait;
use tracing::debug;

use crate::error::AgentResult;
use crate::openrouter::client::OpenRouterClient;
use crate::openrouter::types::ChatMessage;

/// Persona an agent adopts for one task: role, goal, and backstory.
#[derive(Debug, Clone)]
pub struct AgentSpec {
    pub role: String,
    pub goal: String,
    pub backstory: String,
}

impl AgentSpec {
    pub fn new(
        role: impl Into<String>,
        goal: impl Into<String>,
        backstory: impl Into<String>,
    ) -> Self {
        Self {
            role: role.into(),
            goal: goal.into(),
            backstory: backstory.into(),
        }
    }
}

/// One instruction issued to an agent.
#[derive(Debug, Clone)]
pub struct TaskSpec {
    pub description: String,
    pub expected_output: String,
}

impl TaskSpec {
    pub fn new(description: impl Into<String>, expected_output: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            expected_output: expected_output.into(),
        }
    }
}

/// The opaque agent-execution capability: run one task as one agent against
/// an LLM, returning the raw completion text. JSON coercion of the text
/// happens at the [`crate::extract`] seam, not here.
#[async_trait]
pub trait AgentExecutor: Send + Sync {
    async fn execute(
        &self,
        agent: &AgentSpec,
        task: &TaskSpec,
        model: Option<&str>,
    ) -> AgentResult<String>;
}

/// Production executor backed by the OpenRouter chat API.
#[derive(Clone)]
pub struct LlmExecutor {
    client: OpenRouterClient,
    default_model: String,
    temperature: f32,
}

impl LlmExecutor {
    pub fn new(client: OpenRouterClient, default_model: impl Into<String>) -> Self {
        Self {
            client,
            default_model: default_model.into(),
            temperature: 1.0,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    fn system_prompt(agent: &AgentSpec) -> String {
        format!(
            "You are {role}.\n\nYour goal: {goal}\n\nBackground: {backstory}\n\n\
             Answer with exactly the output the task asks for, nothing else.",
            role = agent.role,
            goal = agent.goal,
            backstory = agent.backstory,
        )
    }

    fn user_prompt(task: &TaskSpec) -> String {
        format!(
            "{description}\n\nExpected output: {expected}",
            description = task.description,
            expected = task.expected_output,
        )
    }
}

#[async_trait]
impl AgentExecutor for LlmExecutor {
    async fn execute(
        &self,
        agent: &AgentSpec,
        task: &TaskSpec,
        model: Option<&str>,
    ) -> AgentResult<String> {
        let model = model.unwrap_or(&self.default_model);
        debug!(role = %agent.role, model, "executing agent task");

        let messages = vec![
            ChatMessage::system(Self::system_prompt(agent)),
            ChatMessage::user(Self::user_prompt(task)),
        ];

        self.client
            .chat_completion(messages, model, Some(self.temperature), None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_prompt_carries_agent_identity() {
        let agent = AgentSpec::new("Product Analyst", "extract data", "You analyze products.");
        let prompt = LlmExecutor::system_prompt(&agent);
        assert!(prompt.contains("You are Product Analyst"));
        assert!(prompt.contains("extract data"));
        assert!(prompt.contains("You analyze products."));
    }

    #[test]
    fn test_user_prompt_appends_expected_output() {
        let task = TaskSpec::new("Do the thing", "A JSON object");
        let prompt = LlmExecutor::user_prompt(&task);
        assert!(prompt.starts_with("Do the thing"));
        assert!(prompt.ends_with("Expected output: A JSON object"));
    }
}
