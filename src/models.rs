use serde::{Deserialize, Deserializer, Serialize};
use crate::error::{GatewayError, GatewayResult};

pub const MAX_IDEA_COUNT: u32 = 20;
pub const DEFAULT_IDEA_COUNT: u32 = 5;
pub const MAX_VARIATION_COUNT: u32 = 10;
pub const DEFAULT_VARIATION_COUNT: u32 = 3;

pub const SUPPORTED_PLATFORMS: &[&str] = &["Instagram", "TikTok", "YouTube", "LinkedIn", "Twitter"];

// Campaign brief as the brief form sends it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BriefData {
    pub product_description: String,
    pub target_audience: String,
    #[serde(default)]
    pub campaign_goals: String,
    #[serde(default)]
    pub budget: String,
    #[serde(default)]
    pub platforms: Vec<String>,
    #[serde(default)]
    pub timeframe: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreativityLevel {
    Conservative,
    #[default]
    Balanced,
    Experimental,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContentIdeaRequest {
    pub brief_data: BriefData,
    #[serde(default = "default_idea_count")]
    pub idea_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platforms: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_types: Option<Vec<String>>,
    #[serde(default)]
    pub creativity_level: CreativityLevel,
    #[serde(default = "default_true")]
    pub trend_integration: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_preferences: Option<UserContentPreferences>,
}

fn default_idea_count() -> u32 {
    DEFAULT_IDEA_COUNT
}

fn default_true() -> bool {
    true
}

impl ContentIdeaRequest {
    pub fn new(brief_data: BriefData) -> Self {
        Self {
            brief_data,
            idea_count: DEFAULT_IDEA_COUNT,
            platforms: None,
            content_types: None,
            creativity_level: CreativityLevel::default(),
            trend_integration: true,
            user_preferences: None,
        }
    }

    pub fn validate(&self) -> GatewayResult<()> {
        if self.brief_data.product_description.trim().is_empty() {
            return Err(GatewayError::Validation(
                "brief_data.productDescription must not be empty".into(),
            ));
        }
        if self.brief_data.target_audience.trim().is_empty() {
            return Err(GatewayError::Validation(
                "brief_data.targetAudience must not be empty".into(),
            ));
        }
        if !(1..=MAX_IDEA_COUNT).contains(&self.idea_count) {
            return Err(GatewayError::Validation(format!(
                "idea_count must be between 1 and {}",
                MAX_IDEA_COUNT
            )));
        }
        Ok(())
    }

    // Request override wins over the brief's own list
    pub fn effective_platforms(&self) -> &[String] {
        match &self.platforms {
            Some(p) if !p.is_empty() => p,
            _ => &self.brief_data.platforms,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Video,
    Carousel,
    Story,
    Reel,
    Post,
    Short,
    Live,
}

// Explicit `null` decodes like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One generated content concept.
///
/// The six core fields are required when decoding provider output; `id`
/// and `created_at` are backfilled after parsing when the model leaves
/// them out or sends `null`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContentIdea {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brief_id: Option<i64>,
    pub title: String,
    pub platform: String,
    pub content_type: ContentType,
    pub hook: String,
    pub concept: String,
    pub cta: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creative_details: Option<CreativeDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_mockup: Option<VisualMockup>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub trending_elements: TrendingElements,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance_prediction: Option<PerformancePrediction>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreativeDetails {
    pub visual_style: String,
    pub tone_of_voice: String,
    #[serde(default)]
    pub key_elements: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_palette: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typography_suggestions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shot_types: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editing_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub music_mood: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_overlay_suggestions: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VisualMockup {
    pub thumbnail_description: String,
    #[serde(default)]
    pub scene_breakdown: Vec<SceneBreakdown>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_references: Option<Vec<String>>,
    #[serde(default)]
    pub brand_integration_points: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessibility_notes: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SceneBreakdown {
    pub scene_number: u32,
    pub duration: String,
    pub description: String,
    #[serde(default)]
    pub visual_elements: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_overlay: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voiceover: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transitions: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TrendingElements {
    #[serde(default)]
    pub hashtags: Vec<TrendingHashtag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_trends: Option<Vec<AudioTrend>>,
    #[serde(default)]
    pub visual_trends: Vec<VisualTrend>,
    #[serde(default)]
    pub platform_features: Vec<PlatformFeature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seasonal_relevance: Option<SeasonalRelevance>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReachPotential {
    Low,
    Medium,
    High,
    Viral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendingHashtag {
    pub hashtag: String,
    pub trend_score: f64,
    pub reach_potential: ReachPotential,
    pub competition_level: Level,
    pub relevance_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AudioTrend {
    pub audio_name: String,
    pub trend_score: f64,
    pub genre: String,
    pub mood: String,
    pub usage_instructions: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VisualTrend {
    pub trend_name: String,
    pub description: String,
    pub trend_score: f64,
    pub difficulty_level: Difficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment_needed: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlatformFeature {
    pub feature_name: String,
    pub platform: String,
    pub description: String,
    pub engagement_boost: f64,
    #[serde(default)]
    pub implementation_tips: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeasonalRelevance {
    pub season: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holidays: Option<Vec<String>>,
    #[serde(default)]
    pub seasonal_hooks: Vec<String>,
    #[serde(default)]
    pub timing_recommendations: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct EngagementBand {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ReachEstimate {
    pub organic: u64,
    pub paid: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PerformancePrediction {
    pub engagement_rate_prediction: EngagementBand,
    pub reach_potential: ReachEstimate,
    pub viral_potential_score: f64,
    pub confidence_level: f64,
    pub key_success_factors: Vec<String>,
    pub optimization_suggestions: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserContentPreferences {
    #[serde(default)]
    pub preferred_content_types: Vec<String>,
    #[serde(default)]
    pub avoided_elements: Vec<String>,
    #[serde(default)]
    pub brand_voice_keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learning_insights: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_feedback: Option<Vec<ContentFeedback>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackType {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContentFeedback {
    pub content_idea_id: String,
    pub rating: u8,
    pub feedback_type: FeedbackType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specific_feedback: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub improvement_suggestions: Option<Vec<String>>,
    #[serde(default)]
    pub timestamp: String,
}

impl ContentFeedback {
    pub fn validate(&self) -> GatewayResult<()> {
        if self.content_idea_id.trim().is_empty() {
            return Err(GatewayError::Validation("content_idea_id must not be empty".into()));
        }
        if !(1..=5).contains(&self.rating) {
            return Err(GatewayError::Validation("rating must be between 1 and 5".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariationType {
    Hook,
    Visual,
    Cta,
    PlatformAdaptation,
}

impl VariationType {
    pub fn as_str(self) -> &'static str {
        match self {
            VariationType::Hook => "hook",
            VariationType::Visual => "visual",
            VariationType::Cta => "cta",
            VariationType::PlatformAdaptation => "platform_adaptation",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VariationRequest {
    pub original_idea: ContentIdea,
    pub variation_type: VariationType,
    #[serde(default = "default_variation_count")]
    pub count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_platform: Option<String>,
}

fn default_variation_count() -> u32 {
    DEFAULT_VARIATION_COUNT
}

impl VariationRequest {
    pub fn validate(&self) -> GatewayResult<()> {
        if !(1..=MAX_VARIATION_COUNT).contains(&self.count) {
            return Err(GatewayError::Validation(format!(
                "count must be between 1 and {}",
                MAX_VARIATION_COUNT
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PreferenceLearningRequest {
    pub feedback: Vec<ContentFeedback>,
    #[serde(default)]
    pub preferences: UserContentPreferences,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn brief() -> BriefData {
        BriefData {
            product_description: "Reusable water bottle".into(),
            target_audience: "Students".into(),
            campaign_goals: "Awareness".into(),
            budget: "$5k".into(),
            platforms: vec!["Instagram".into()],
            timeframe: "4 weeks".into(),
        }
    }

    #[test]
    fn request_defaults_apply_on_decode() {
        let req: ContentIdeaRequest = serde_json::from_value(json!({
            "brief_data": {
                "productDescription": "Bottle",
                "targetAudience": "Students",
                "campaignGoals": "",
                "budget": "",
                "platforms": ["TikTok"],
                "timeframe": ""
            }
        }))
        .unwrap();

        assert_eq!(req.idea_count, 5);
        assert_eq!(req.creativity_level, CreativityLevel::Balanced);
        assert!(req.trend_integration);
        assert_eq!(req.effective_platforms(), ["TikTok".to_string()]);
    }

    #[test]
    fn idea_count_bounds() {
        let mut req = ContentIdeaRequest::new(brief());
        req.idea_count = 0;
        assert!(matches!(req.validate(), Err(GatewayError::Validation(_))));
        req.idea_count = 21;
        assert!(req.validate().is_err());
        req.idea_count = 20;
        assert!(req.validate().is_ok());
    }

    #[test]
    fn blank_product_is_rejected() {
        let mut b = brief();
        b.product_description = "  ".into();
        assert!(ContentIdeaRequest::new(b).validate().is_err());
    }

    #[test]
    fn platform_override_wins() {
        let mut req = ContentIdeaRequest::new(brief());
        req.platforms = Some(vec!["YouTube".into()]);
        assert_eq!(req.effective_platforms(), ["YouTube".to_string()]);
    }

    #[test]
    fn idea_missing_required_field_fails_closed() {
        let result: Result<ContentIdea, _> = serde_json::from_value(json!({
            "title": "T",
            "platform": "Instagram",
            "content_type": "video",
            "hook": "H",
            "concept": "C"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn idea_null_optional_fields_decode_as_empty() {
        let idea: ContentIdea = serde_json::from_value(serde_json::json!({
            "id": null,
            "title": "T",
            "platform": "TikTok",
            "content_type": "reel",
            "hook": "h",
            "concept": "c",
            "cta": "a",
            "trending_elements": null,
            "tags": null,
            "created_at": null
        }))
        .unwrap();
        assert!(idea.id.is_empty());
        assert!(idea.created_at.is_empty());
        assert!(idea.tags.is_empty());
        assert_eq!(idea.trending_elements, TrendingElements::default());
    }

    #[test]
    fn feedback_rating_bounds() {
        let mut fb = ContentFeedback {
            content_idea_id: "idea_1".into(),
            rating: 6,
            feedback_type: FeedbackType::Positive,
            specific_feedback: None,
            improvement_suggestions: None,
            timestamp: String::new(),
        };
        assert!(fb.validate().is_err());
        fb.rating = 5;
        assert!(fb.validate().is_ok());
    }

    #[test]
    fn variation_type_wire_names() {
        let v: VariationType = serde_json::from_value(json!("platform_adaptation")).unwrap();
        assert_eq!(v, VariationType::PlatformAdaptation);
        assert_eq!(v.as_str(), "platform_adaptation");
    }
}
