//! Prompt construction for AI-assisted bulk drafting.

use super::posts::GenerationBrief;

/// Build the instruction sent to the text-generation endpoint.
///
/// The endpoint is asked for bare JSON so the response can be parsed
/// without scraping prose; `parse_generated_posts` still tolerates fenced
/// output from models that ignore the instruction.
pub fn build_generation_prompt(brief: &GenerationBrief) -> String {
    format!(
        r#"Generate {count} social media posts for "{brand}" selling "{product}" targeting "{audience}".

Requirements:
- Use formal, professional tone
- Create engaging captions (max 2200 characters)
- Include relevant hashtags (max 280 characters)
- Generate descriptive image prompts
- Return ONLY valid JSON array, no additional text

Required JSON format:
[
  {{
    "caption": "string",
    "hashtags": "string",
    "platform": "instagram",
    "imagePrompt": "string"
  }}
]

Return only the JSON array with {count} posts. No explanations, no markdown, no additional text."#,
        count = brief.number_of_posts,
        brand = brief.brand_name,
        product = brief.product_description,
        audience = brief.target_audience,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_carries_brief_and_count() {
        let brief = GenerationBrief {
            brand_name: "Acme".to_string(),
            product_description: "rocket skates".to_string(),
            target_audience: "coyotes".to_string(),
            number_of_posts: 3,
        };

        let prompt = build_generation_prompt(&brief);
        assert!(prompt.contains(r#"Generate 3 social media posts for "Acme""#));
        assert!(prompt.contains("rocket skates"));
        assert!(prompt.contains("coyotes"));
        assert!(prompt.contains("imagePrompt"));
    }
}
