use std::fmt::Write;

use crate::models::{
    ContentFeedback, ContentIdea, ContentIdeaRequest, CreativityLevel, UserContentPreferences,
    VariationType,
};

const IDEA_SCHEMA: &str = r##"[
  {
    "id": "unique_id",
    "title": "Content Title",
    "platform": "Instagram",
    "content_type": "video",
    "hook": "Attention-grabbing opening",
    "concept": "Detailed content concept",
    "cta": "Clear call to action",
    "duration": "30-60 seconds",
    "creative_details": {
      "visual_style": "Clean, minimal aesthetic",
      "tone_of_voice": "Conversational and authentic",
      "key_elements": ["product showcase", "lifestyle integration"],
      "color_palette": ["#FF6B6B", "#4ECDC4", "#45B7D1"],
      "shot_types": ["close-up", "wide shot", "over-shoulder"],
      "editing_style": "Quick cuts with smooth transitions",
      "music_mood": "Upbeat and energetic",
      "text_overlay_suggestions": ["Key benefits", "Statistics", "Call to action"]
    },
    "visual_mockup": {
      "thumbnail_description": "Eye-catching thumbnail concept",
      "scene_breakdown": [
        {
          "scene_number": 1,
          "duration": "0-3 seconds",
          "description": "Opening hook scene",
          "visual_elements": ["product", "person"],
          "text_overlay": "Problem statement",
          "voiceover": "Did you know...",
          "transitions": "Quick zoom in"
        }
      ],
      "brand_integration_points": ["Natural product placement", "Logo visibility"],
      "accessibility_notes": ["Captions included", "High contrast text"]
    },
    "trending_elements": {
      "hashtags": [],
      "visual_trends": [],
      "platform_features": []
    },
    "tags": ["educational", "product-demo", "lifestyle"],
    "created_at": "{created_at}"
  }
]"##;

fn creativity_instruction(level: CreativityLevel) -> &'static str {
    match level {
        CreativityLevel::Conservative => {
            "Focus on proven, safe content formats with predictable performance"
        }
        CreativityLevel::Experimental => {
            "Push creative boundaries with innovative formats and emerging trends"
        }
        CreativityLevel::Balanced => {
            "Balance creativity with proven performance, incorporating some trending elements"
        }
    }
}

fn variation_instruction(axis: VariationType) -> &'static str {
    match axis {
        VariationType::Hook => "Create different opening hooks to grab attention",
        VariationType::Visual => "Modify visual elements and presentation style",
        VariationType::Cta => "Change call-to-action approaches and messaging",
        VariationType::PlatformAdaptation => "Adapt content for different platform requirements",
    }
}

pub fn content_ideas_prompt(request: &ContentIdeaRequest, created_at: &str) -> String {
    let brief = &request.brief_data;
    let mut prompt = String::new();

    let _ = write!(
        prompt,
        "<persona>
You are an expert content strategist and viral marketing specialist with deep knowledge of social media trends, platform algorithms, and content creation best practices across all major platforms.
</persona>

<task>
Generate {count} detailed content ideas based on the campaign brief, incorporating current trends, platform-specific optimizations, and creative visual concepts.
</task>

<campaign_brief>
Product: {product}
Audience: {audience}
Goals: {goals}
Budget: {budget}
Platforms: {platforms}
Timeframe: {timeframe}
</campaign_brief>

<creativity_level>
{creativity}
</creativity_level>
",
        count = request.idea_count,
        product = brief.product_description,
        audience = brief.target_audience,
        goals = brief.campaign_goals,
        budget = brief.budget,
        platforms = request.effective_platforms().join(", "),
        timeframe = brief.timeframe,
        creativity = creativity_instruction(request.creativity_level),
    );

    if let Some(types) = request.content_types.as_ref().filter(|t| !t.is_empty()) {
        let _ = write!(
            prompt,
            "\n<content_types>\nOnly use these content types: {}\n</content_types>\n",
            types.join(", ")
        );
    }

    if let Some(prefs) = &request.user_preferences {
        let _ = write!(prompt, "\n<user_preferences>\n{}</user_preferences>\n", preference_lines(prefs));
    }

    let _ = write!(
        prompt,
        "
<output_format>
Return ONLY a valid JSON array of ContentIdea objects with this exact structure:
{schema}
</output_format>

<guidelines>
- Focus on platform-specific best practices and algorithm optimization
- Include detailed visual mockups with scene-by-scene breakdowns
- Ensure content aligns with campaign goals and target audience
- Incorporate current social media trends and features
- Provide actionable creative direction for content creators
- Consider accessibility and inclusivity in content design
- Balance entertainment value with marketing objectives
</guidelines>
",
        schema = IDEA_SCHEMA.replace("{created_at}", created_at),
    );

    prompt
}

fn preference_lines(prefs: &UserContentPreferences) -> String {
    let mut out = String::new();
    if !prefs.preferred_content_types.is_empty() {
        let _ = writeln!(out, "Preferred content types: {}", prefs.preferred_content_types.join(", "));
    }
    if !prefs.avoided_elements.is_empty() {
        let _ = writeln!(out, "Avoid: {}", prefs.avoided_elements.join(", "));
    }
    if !prefs.brand_voice_keywords.is_empty() {
        let _ = writeln!(out, "Brand voice: {}", prefs.brand_voice_keywords.join(", "));
    }
    out
}

pub fn trending_hashtags_prompt(platform: &str, content: &str, niche: &str) -> String {
    format!(
        r##"<task>
Generate trending hashtags for {platform} content about "{content}" in the {niche} niche.
</task>

<output_format>
Return ONLY a valid JSON array of hashtag objects with this structure:
[
  {{
    "hashtag": "#example",
    "trend_score": 85,
    "reach_potential": "high",
    "competition_level": "medium",
    "relevance_score": 90
  }}
]
</output_format>

<guidelines>
- Include 10-15 hashtags with varying popularity levels
- Mix trending, niche-specific, and evergreen hashtags
- Ensure hashtags are relevant to the content and platform
- Provide realistic trend and relevance scores (1-100)
- Consider current social media trends
</guidelines>
"##
    )
}

pub fn variations_prompt(
    original: &ContentIdea,
    axis: VariationType,
    count: u32,
    target_platform: Option<&str>,
) -> String {
    let idea_json = serde_json::to_string(original).unwrap_or_default();
    let mut focus = variation_instruction(axis).to_string();
    if let (VariationType::PlatformAdaptation, Some(platform)) = (axis, target_platform) {
        let _ = write!(focus, "\nTarget platform: {}", platform);
    }

    format!(
        "<task>
Create {count} variations of the content idea focusing on {axis} optimization.
</task>

<original_idea>
{idea_json}
</original_idea>

<variation_focus>
{focus}
</variation_focus>

<output_format>
Return ONLY a valid JSON array of ContentIdea objects with variations.
</output_format>
",
        axis = axis.as_str(),
    )
}

pub fn feedback_prompt(feedback: &[ContentFeedback], current: &UserContentPreferences) -> String {
    let feedback_json = serde_json::to_string(feedback).unwrap_or_default();
    let current_json = serde_json::to_string(current).unwrap_or_default();

    format!(
        r#"<task>
Analyze user feedback and update content preferences for better future recommendations.
</task>

<feedback_data>
{feedback_json}
</feedback_data>

<current_preferences>
{current_json}
</current_preferences>

<output_format>
Return ONLY a valid JSON object with updated preferences:
{{
  "preferred_content_types": ["video", "carousel"],
  "avoided_elements": ["overly_promotional", "long_text"],
  "brand_voice_keywords": ["authentic", "relatable", "educational"],
  "learning_insights": ["User prefers visual content", "Short-form performs better"]
}}
</output_format>
"#
    )
}
