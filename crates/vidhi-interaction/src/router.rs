//! Model and capability routing.
//!
//! Every backend model identifier lives in the router's table; call sites
//! describe the task and receive the model plus tool configuration to
//! execute. Routing is a pure mapping with no side effects.

use vidhi_core::config::ModelSettings;
use vidhi_core::grounding::Coordinates;
use vidhi_core::Turn;

use crate::backend::{BackendRequest, RequestPart, ToolSelection};

/// High-reasoning model for the advice flow.
const DEFAULT_ADVISOR_MODEL: &str = "gemini-3-pro-preview";
/// Fast multimodal model for summarization and grounding.
const DEFAULT_FAST_MODEL: &str = "gemini-2.5-flash";

pub const SYSTEM_INSTRUCTION_ADVISOR: &str = r#"
You are Vidhigya, a trusted and empathetic AI Legal Companion for Indians.
Your mission is to empower the "Common Man" (Aam Aadmi) by explaining their fundamental rights under the Constitution of India, breaking down complex legal jargon into simple language, and providing unbiased procedural options.
IMPORTANT: You are NOT a lawyer. You cannot provide legal advice or representation. Always include a brief disclaimer when discussing specific legal actions.

RESPONSE FORMATTING:
- Use Markdown to structure your response.
- Use **bold** for key legal terms, Article numbers, or emphasis.
- Use lists (bullet points) for steps or options.
- Use headings (###) to separate sections like "The Law", "Your Options", "Next Steps".

Tone:
- Warm, reassuring, and professional.
- Use culturally appropriate greetings like "Namaste".

Focus on:
1. Empathy and clarity.
2. Explaining rights referencing specific Articles of the Constitution (e.g., Art. 14, 19, 21, 32) and relevant codes (IPC/BNS, CrPC/BNSS).
3. Outlining step-by-step options standard in India (e.g., filing an FIR, Writ Petition, PIL, contacting DLSA/NALSA).
4. Keeping language simple (5th-grade reading level where possible).
"#;

pub const SYSTEM_INSTRUCTION_SIMPLIFIER: &str = r#"
You are the Vidhigya Decoder. Your sole job is to take complex legal text or documents provided by the user and rewrite them in plain, simple English suitable for an Indian citizen.
If the text contains Indian legal terms (e.g., Vakalatnama, Stay Order, Decree, Suo Moto), explain them simply in context.

RESPONSE FORMATTING:
- Use Markdown.
- Use **bold** for important warnings or terms.
- Structure your response as:
  ### The Gist
  (A one-sentence summary)

  ### Key Points
  (Bullet points of what matters)

  ### Red Flags
  (Any obligations or risks the user should know)
"#;

/// The kind of work a request performs, used to pick model and tools.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskKind {
    /// Multi-turn legal guidance; needs the strongest reasoning model.
    AdvisoryReasoning,
    /// Document/plain-text simplification; fast multimodal model.
    DocumentSummarization,
    /// Live place lookup with optional spatial bias.
    LocationGrounding { bias: Option<Coordinates> },
}

/// Resolved model identity and capability configuration for one task.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRoute {
    pub model: String,
    pub system_instruction: Option<String>,
    pub tools: ToolSelection,
}

impl ModelRoute {
    /// Builds a backend request from this route.
    pub fn request(&self, history: Vec<Turn>, parts: Vec<RequestPart>) -> BackendRequest {
        BackendRequest {
            model: self.model.clone(),
            system_instruction: self.system_instruction.clone(),
            history,
            parts,
            tools: self.tools.clone(),
        }
    }
}

/// Maps task kinds to backend models and capability sets.
#[derive(Debug, Clone)]
pub struct ModelRouter {
    advisor_model: String,
    fast_model: String,
}

impl Default for ModelRouter {
    fn default() -> Self {
        Self {
            advisor_model: DEFAULT_ADVISOR_MODEL.to_string(),
            fast_model: DEFAULT_FAST_MODEL.to_string(),
        }
    }
}

impl ModelRouter {
    /// Creates a router with the built-in model table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies configured model overrides.
    pub fn with_overrides(settings: &ModelSettings) -> Self {
        let defaults = Self::default();
        Self {
            advisor_model: settings
                .advisor
                .clone()
                .unwrap_or(defaults.advisor_model),
            fast_model: settings.fast.clone().unwrap_or(defaults.fast_model),
        }
    }

    /// Resolves the model and capability configuration for a task.
    pub fn route(&self, kind: TaskKind) -> ModelRoute {
        match kind {
            TaskKind::AdvisoryReasoning => ModelRoute {
                model: self.advisor_model.clone(),
                system_instruction: Some(SYSTEM_INSTRUCTION_ADVISOR.trim().to_string()),
                tools: ToolSelection::default(),
            },
            TaskKind::DocumentSummarization => ModelRoute {
                model: self.fast_model.clone(),
                system_instruction: Some(SYSTEM_INSTRUCTION_SIMPLIFIER.trim().to_string()),
                tools: ToolSelection::default(),
            },
            TaskKind::LocationGrounding { bias } => ModelRoute {
                model: self.fast_model.clone(),
                system_instruction: None,
                tools: ToolSelection {
                    location_search: true,
                    spatial_bias: bias,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advisory_route_uses_reasoning_model_without_tools() {
        let route = ModelRouter::new().route(TaskKind::AdvisoryReasoning);
        assert_eq!(route.model, DEFAULT_ADVISOR_MODEL);
        assert!(!route.tools.location_search);
        let instruction = route.system_instruction.unwrap();
        assert!(instruction.contains("NOT a lawyer"));
    }

    #[test]
    fn summarization_route_pins_the_output_shape() {
        let route = ModelRouter::new().route(TaskKind::DocumentSummarization);
        assert_eq!(route.model, DEFAULT_FAST_MODEL);
        let instruction = route.system_instruction.unwrap();
        for heading in ["### The Gist", "### Key Points", "### Red Flags"] {
            assert!(instruction.contains(heading), "missing {heading}");
        }
    }

    #[test]
    fn grounding_route_enables_location_search() {
        let unbiased = ModelRouter::new().route(TaskKind::LocationGrounding { bias: None });
        assert!(unbiased.tools.location_search);
        assert!(unbiased.tools.spatial_bias.is_none());

        let coords = Coordinates {
            latitude: 18.52,
            longitude: 73.86,
        };
        let biased = ModelRouter::new().route(TaskKind::LocationGrounding {
            bias: Some(coords),
        });
        assert_eq!(biased.tools.spatial_bias, Some(coords));
        assert_eq!(biased.model, DEFAULT_FAST_MODEL);
    }

    #[test]
    fn overrides_replace_models_in_one_place() {
        let settings = vidhi_core::config::ModelSettings {
            advisor: Some("custom-pro".to_string()),
            fast: None,
        };
        let router = ModelRouter::with_overrides(&settings);
        assert_eq!(
            router.route(TaskKind::AdvisoryReasoning).model,
            "custom-pro"
        );
        assert_eq!(
            router.route(TaskKind::DocumentSummarization).model,
            DEFAULT_FAST_MODEL
        );
    }
}
