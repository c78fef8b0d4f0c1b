use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;

use crate::cache::make_cache_key;
use crate::error::GatewayResult;
use crate::gateway::{CompletionRequest, Gateway};
use crate::models::{
    BriefData, ContentFeedback, ContentIdea, ContentIdeaRequest, Difficulty, EngagementBand,
    Level, PerformancePrediction, PlatformFeature, ReachEstimate, ReachPotential, TrendingElements,
    TrendingHashtag, UserContentPreferences, VariationRequest, VisualTrend,
};
use crate::parser::{parse_json_array, parse_json_object};
use crate::prompt;

const CONTENT_IDEAS_KIND: &str = "content_ideas";
const DEFAULT_NICHE: &str = "general";

pub struct ContentIdeaService {
    gateway: Arc<Gateway>,
}

impl ContentIdeaService {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &Arc<Gateway> {
        &self.gateway
    }

    /// Generate, parse and enrich content ideas for a brief.
    ///
    /// Identical requests inside the cache TTL reuse the cached provider
    /// output; `caller` is the rate-limit key. The batch may hold fewer ideas
    /// than `idea_count` if the model returned fewer.
    pub async fn generate_content_ideas(
        &self,
        request: &ContentIdeaRequest,
        caller: &str,
    ) -> GatewayResult<Vec<ContentIdea>> {
        request.validate()?;

        let completion = CompletionRequest::new(prompt::content_ideas_prompt(
            request,
            &Utc::now().to_rfc3339(),
        ))
        .cache_key(make_cache_key(CONTENT_IDEAS_KIND, request))
        .rate_limit_key(caller);

        let raw = self.gateway.generate_with_policy(completion).await?;
        let ideas = backfill(parse_json_array::<ContentIdea>(&raw, "content ideas")?);

        if ideas.len() != request.idea_count as usize {
            tracing::info!(
                requested = request.idea_count,
                returned = ideas.len(),
                "provider returned a different number of ideas"
            );
        }

        let enriched = join_all(ideas.into_iter().map(|idea| self.enrich(idea, request))).await;
        Ok(enriched)
    }

    /// Alternative versions of one idea along a single axis; never cached
    pub async fn generate_variations(
        &self,
        request: &VariationRequest,
    ) -> GatewayResult<Vec<ContentIdea>> {
        request.validate()?;

        let prompt = prompt::variations_prompt(
            &request.original_idea,
            request.variation_type,
            request.count,
            request.target_platform.as_deref(),
        );
        let raw = self.gateway.generate(&prompt).await?;
        Ok(backfill(parse_json_array::<ContentIdea>(&raw, "content variations")?))
    }

    /// Hashtags for a platform; any failure degrades to a fixed list
    pub async fn generate_trending_hashtags(
        &self,
        platform: &str,
        content: &str,
        niche: &str,
    ) -> Vec<TrendingHashtag> {
        let prompt = prompt::trending_hashtags_prompt(platform, content, niche);
        let parsed = match self.gateway.generate(&prompt).await {
            Ok(raw) => parse_json_array::<TrendingHashtag>(&raw, "hashtags"),
            Err(e) => Err(e),
        };

        parsed.unwrap_or_else(|e| {
            tracing::warn!(platform, error = %e, "hashtag generation failed, using fallback");
            fallback_hashtags(platform)
        })
    }

    /// Fold feedback into the stored preferences. Keeps `current` on failure.
    pub async fn learn_from_feedback(
        &self,
        feedback: &[ContentFeedback],
        current: &UserContentPreferences,
    ) -> GatewayResult<UserContentPreferences> {
        for item in feedback {
            item.validate()?;
        }

        let prompt = prompt::feedback_prompt(feedback, current);
        let learned = match self.gateway.generate(&prompt).await {
            Ok(raw) => parse_json_object::<UserContentPreferences>(&raw, "preferences"),
            Err(e) => Err(e),
        };

        Ok(learned.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "preference learning failed, keeping current preferences");
            current.clone()
        }))
    }

    async fn enrich(&self, mut idea: ContentIdea, request: &ContentIdeaRequest) -> ContentIdea {
        idea.trending_elements = self
            .trending_elements(&idea.platform, &request.brief_data, request.trend_integration)
            .await;
        idea.performance_prediction = Some(predict_performance(&idea, &request.brief_data));
        idea
    }

    async fn trending_elements(
        &self,
        platform: &str,
        brief: &BriefData,
        with_hashtags: bool,
    ) -> TrendingElements {
        let hashtags = if with_hashtags {
            let content = serde_json::to_string(brief).unwrap_or_default();
            self.generate_trending_hashtags(platform, &content, DEFAULT_NICHE)
                .await
        } else {
            Vec::new()
        };

        TrendingElements {
            hashtags,
            audio_trends: None,
            visual_trends: vec![VisualTrend {
                trend_name: "Transition effects".into(),
                description: "Quick transition between scenes".into(),
                trend_score: 85.0,
                difficulty_level: Difficulty::Medium,
                equipment_needed: None,
            }],
            platform_features: vec![PlatformFeature {
                feature_name: platform_feature_name(platform).into(),
                platform: platform.to_string(),
                description: "Platform-specific feature to boost engagement".into(),
                engagement_boost: 25.0,
                implementation_tips: vec![
                    "Use trending audio".into(),
                    "Add captions".into(),
                    "Optimal timing".into(),
                ],
            }],
            seasonal_relevance: None,
        }
    }
}

fn platform_feature_name(platform: &str) -> &'static str {
    match platform {
        "Instagram" => "Reels",
        "TikTok" => "Effects",
        _ => "Shorts",
    }
}

/// Heuristic estimate; a local stub, so it cannot fail
pub fn predict_performance(_idea: &ContentIdea, _brief: &BriefData) -> PerformancePrediction {
    PerformancePrediction {
        engagement_rate_prediction: EngagementBand {
            low: 2.5,
            medium: 5.2,
            high: 8.7,
        },
        reach_potential: ReachEstimate {
            organic: 10_000,
            paid: 50_000,
        },
        viral_potential_score: 65.0,
        confidence_level: 75.0,
        key_success_factors: vec![
            "Strong hook".into(),
            "Trending audio".into(),
            "Clear CTA".into(),
        ],
        optimization_suggestions: vec![
            "Post during peak hours".into(),
            "Use platform-specific features".into(),
            "Engage with comments quickly".into(),
        ],
    }
}

pub fn fallback_hashtags(platform: &str) -> Vec<TrendingHashtag> {
    vec![
        TrendingHashtag {
            hashtag: format!("#{}", platform.to_lowercase()),
            trend_score: 70.0,
            reach_potential: ReachPotential::Medium,
            competition_level: Level::High,
            relevance_score: 80.0,
        },
        TrendingHashtag {
            hashtag: "#contentcreator".into(),
            trend_score: 65.0,
            reach_potential: ReachPotential::Medium,
            competition_level: Level::Medium,
            relevance_score: 75.0,
        },
    ]
}

// Fill in id and created_at where the model left them blank
fn backfill(ideas: Vec<ContentIdea>) -> Vec<ContentIdea> {
    let now = Utc::now();
    let millis = now.timestamp_millis();
    let stamp = now.to_rfc3339();

    ideas
        .into_iter()
        .enumerate()
        .map(|(index, mut idea)| {
            if idea.id.trim().is_empty() {
                idea.id = format!("idea_{}_{}", millis, index);
            }
            if idea.created_at.trim().is_empty() {
                idea.created_at = stamp.clone();
            }
            idea
        })
        .collect()
}
