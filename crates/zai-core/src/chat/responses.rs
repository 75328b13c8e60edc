//! Canned assistant replies.

pub const DEFAULT_RESPONSE: &str = "Great question! You can create an AI experiment in just a few steps. Here's how to get started:

1. **Enter Experiment Details** – Give your experiment a name, choose a share level, and provide a brief description to define its purpose.
2. **Go to the \"Create\" Page** – Navigate to the Create section in Z.AI to begin setting up your experiment.
3. **Design the User Experience** – Set up how users will interact with your experiment. This includes defining inputs, outputs, and behavior.
4. **Configure the Prompt & Parameters** – Customize how the AI will respond by crafting prompts and fine-tuning parameters.
5. **Review & Share** – Once everything is set, save your experiment and share it with the community or keep it private for testing.";

pub const ANALYZE_RESPONSE: &str = "Here are the key patterns I found in your experiment logs:

1. **Response latency** averages 1.2s — well within acceptable range.
2. **Token usage** spikes on longer prompts; consider chunking inputs.
3. **Accuracy scores** are highest when temperature is set to 0.4–0.6.
4. **Error rate** is 2.3%, mostly from malformed JSON inputs.

Recommendations: normalize input lengths and add input validation before sending to the model.";

pub const OPTIMIZE_RESPONSE: &str = "Here are some optimization strategies for your experiment:

1. **Lower temperature** (0.3–0.5) for more consistent, factual responses.
2. **Add system context** describing the use case to reduce off-topic outputs.
3. **Use few-shot examples** in the prompt to guide the model's format.
4. **Cache frequent queries** to reduce API calls and improve response time.
5. **Monitor token usage** and trim verbose prompts where possible.";

const ANALYZE_KEYWORDS: [&str; 3] = ["analyze", "patterns", "logs"];
const OPTIMIZE_KEYWORDS: [&str; 3] = ["optimize", "better results", "debug"];

/// Pick the canned reply for a message. Analysis keywords are checked before
/// optimization keywords; anything else gets the onboarding text.
pub fn get_ai_response(message: &str) -> &'static str {
    let lower = message.to_lowercase();

    if ANALYZE_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return ANALYZE_RESPONSE;
    }
    if OPTIMIZE_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return OPTIMIZE_RESPONSE;
    }
    DEFAULT_RESPONSE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_keywords() {
        assert_eq!(get_ai_response("What patterns do you see in my logs?"), ANALYZE_RESPONSE);
        assert_eq!(get_ai_response("Please ANALYZE this"), ANALYZE_RESPONSE);
    }

    #[test]
    fn test_optimization_keywords() {
        assert_eq!(get_ai_response("How can I optimize this, or debug it?"), OPTIMIZE_RESPONSE);
        assert_eq!(get_ai_response("I want Better Results"), OPTIMIZE_RESPONSE);
    }

    #[test]
    fn test_analysis_wins_over_optimization() {
        assert_eq!(get_ai_response("debug my logs"), ANALYZE_RESPONSE);
    }

    #[test]
    fn test_default_response() {
        assert_eq!(get_ai_response("hello"), DEFAULT_RESPONSE);
        assert_eq!(get_ai_response(""), DEFAULT_RESPONSE);
    }
}
